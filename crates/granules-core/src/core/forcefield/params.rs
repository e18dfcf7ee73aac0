use crate::core::models::table::{Record, Table};

/// Bond stretching parameters: `V = Kb (b - b0)^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct BondParam {
    pub types: [String; 2],
    pub kb: f64,
    pub b0: f64,
}

/// Angle bending parameters with optional Urey-Bradley 1-3 term.
#[derive(Debug, Clone, PartialEq)]
pub struct AngleParam {
    pub types: [String; 3],
    pub k_theta: f64,
    pub theta0: f64,
    pub k_ub: Option<f64>,
    pub s0: Option<f64>,
}

/// Proper dihedral parameters: `V = Kchi (1 + cos(n chi - delta))`.
#[derive(Debug, Clone, PartialEq)]
pub struct DihedralParam {
    pub types: [String; 4],
    pub k_chi: f64,
    pub multiplicity: i32,
    pub delta: f64,
}

/// Improper dihedral parameters: `V = Kpsi (psi - psi0)^2`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImproperParam {
    pub types: [String; 4],
    pub k_psi: f64,
    /// Column between the force constant and the equilibrium angle, kept verbatim.
    pub unused: String,
    pub psi0: f64,
}

/// Lennard-Jones parameters of one atom type.
///
/// Well depths are stored as positive numbers; the parameter file convention
/// writes them negated.
#[derive(Debug, Clone, PartialEq)]
pub struct NonbondedParam {
    pub atom_type: String,
    pub epsilon: f64,
    pub rmin_half: f64,
    pub epsilon_14: f64,
    pub rmin_half_14: f64,
}

impl Record for BondParam {
    const SCHEMA: &'static str = "PRM/BONDS";
    const COLUMNS: &'static [&'static str] = &["Type1", "Type2", "Kb", "b0"];
}

impl Record for AngleParam {
    const SCHEMA: &'static str = "PRM/ANGLES";
    const COLUMNS: &'static [&'static str] =
        &["Type1", "Type2", "Type3", "Ktheta", "Theta0", "Kub", "S0"];
}

impl Record for DihedralParam {
    const SCHEMA: &'static str = "PRM/DIHEDRALS";
    const COLUMNS: &'static [&'static str] =
        &["Type1", "Type2", "Type3", "Type4", "Kchi", "n", "delta"];
}

impl Record for ImproperParam {
    const SCHEMA: &'static str = "PRM/IMPROPER";
    const COLUMNS: &'static [&'static str] =
        &["Type1", "Type2", "Type3", "Type4", "Kpsi", "unused", "psi0"];
}

impl Record for NonbondedParam {
    const SCHEMA: &'static str = "PRM/NONBONDED";
    const COLUMNS: &'static [&'static str] =
        &["Type", "epsilon", "Rmin2", "epsilon1_4", "Rmin2_1_4"];
}

/// A bonded parameter keyed by an ordered tuple of atom types.
pub trait TypeKeyed {
    fn type_key(&self) -> &[String];

    /// Whether the stored tuple equals `query` read forwards or backwards.
    fn matches_types(&self, query: &[&str]) -> bool {
        let key = self.type_key();
        key.len() == query.len()
            && (key.iter().zip(query).all(|(k, q)| k == q)
                || key.iter().rev().zip(query).all(|(k, q)| k == q))
    }
}

impl TypeKeyed for BondParam {
    fn type_key(&self) -> &[String] {
        &self.types
    }
}

impl TypeKeyed for AngleParam {
    fn type_key(&self) -> &[String] {
        &self.types
    }
}

impl TypeKeyed for DihedralParam {
    fn type_key(&self) -> &[String] {
        &self.types
    }
}

impl TypeKeyed for ImproperParam {
    fn type_key(&self) -> &[String] {
        &self.types
    }
}

fn find_keyed<'a, R: Record + TypeKeyed>(table: &'a Table<R>, query: &[&str]) -> Option<&'a R> {
    table.iter().find(|row| row.matches_types(query))
}

/// The parameter tables of a CHARMM-style force field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForceField {
    pub bonds: Table<BondParam>,
    pub angles: Table<AngleParam>,
    pub dihedrals: Table<DihedralParam>,
    pub impropers: Table<ImproperParam>,
    pub nonbonded: Table<NonbondedParam>,
}

impl ForceField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every table of `other` after the rows already present.
    pub fn merge(&mut self, other: ForceField) {
        self.bonds.append(other.bonds.into_rows());
        self.angles.append(other.angles.into_rows());
        self.dihedrals.append(other.dihedrals.into_rows());
        self.impropers.append(other.impropers.into_rows());
        self.nonbonded.append(other.nonbonded.into_rows());
    }

    /// Bond parameters for a type pair in either order.
    pub fn bond(&self, t1: &str, t2: &str) -> Option<&BondParam> {
        find_keyed(&self.bonds, &[t1, t2])
    }

    /// Angle parameters for a type triple in either direction.
    pub fn angle(&self, t1: &str, t2: &str, t3: &str) -> Option<&AngleParam> {
        find_keyed(&self.angles, &[t1, t2, t3])
    }

    /// All dihedral terms for a type quadruple in either direction.
    ///
    /// Multi-term dihedrals are written as several rows with the same types, so
    /// every match is returned in file order.
    pub fn dihedrals(&self, t1: &str, t2: &str, t3: &str, t4: &str) -> Vec<&DihedralParam> {
        let query = [t1, t2, t3, t4];
        self.dihedrals
            .iter()
            .filter(|row| row.matches_types(&query))
            .collect()
    }

    /// Improper parameters for a type quadruple in either direction.
    pub fn improper(&self, t1: &str, t2: &str, t3: &str, t4: &str) -> Option<&ImproperParam> {
        find_keyed(&self.impropers, &[t1, t2, t3, t4])
    }

    /// Lennard-Jones parameters of an atom type.
    pub fn nonbonded(&self, atom_type: &str) -> Option<&NonbondedParam> {
        self.nonbonded.iter().find(|p| p.atom_type == atom_type)
    }
}
