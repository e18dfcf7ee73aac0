use super::table::{Record, Table};

/// A row of the topology `ATOM` section.
#[derive(Debug, Clone, PartialEq)]
pub struct TopologyAtom {
    pub serial: usize,
    /// Segment identifier column (the record-kind column of the section).
    pub segment: String,
    /// Residue identifier column (the chain column of the section).
    pub residue_id: String,
    pub residue_name: String,
    pub name: String,
    /// Force-field atom type used for parameter lookup.
    pub atom_type: String,
    pub charge: f64,
    pub mass: f64,
    /// Trailing reserved column, kept verbatim.
    pub reserved: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BondRow {
    pub atom1: usize,
    pub atom2: usize,
}

impl BondRow {
    pub fn new(atom1: usize, atom2: usize) -> Self {
        Self { atom1, atom2 }
    }

    pub fn contains(&self, serial: usize) -> bool {
        self.atom1 == serial || self.atom2 == serial
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AngleRow {
    pub atoms: [usize; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DihedralRow {
    pub atoms: [usize; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImproperRow {
    pub atoms: [usize; 4],
}

/// One dihedral of a cross-term; two consecutive rows describe a CMAP pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrossTermRow {
    pub atoms: [usize; 4],
}

impl Record for TopologyAtom {
    const SCHEMA: &'static str = "PSF/ATOM";
    const COLUMNS: &'static [&'static str] = &[
        "ID", "RecName", "ChainID", "ResName", "Name", "Type", "Charge", "Mass", "Unused",
    ];
}

impl Record for BondRow {
    const SCHEMA: &'static str = "PSF/BOND";
    const COLUMNS: &'static [&'static str] = &["atom1", "atom2"];
}

impl Record for AngleRow {
    const SCHEMA: &'static str = "PSF/THETA";
    const COLUMNS: &'static [&'static str] = &["atom1", "atom2", "atom3"];
}

impl Record for DihedralRow {
    const SCHEMA: &'static str = "PSF/PHI";
    const COLUMNS: &'static [&'static str] = &["atom1", "atom2", "atom3", "atom4"];
}

impl Record for ImproperRow {
    const SCHEMA: &'static str = "PSF/IMPHI";
    const COLUMNS: &'static [&'static str] = &["atom1", "atom2", "atom3", "atom4"];
}

impl Record for CrossTermRow {
    const SCHEMA: &'static str = "PSF/CRTERM";
    const COLUMNS: &'static [&'static str] = &["atom1", "atom2", "atom3", "atom4"];
}

/// All sections of a topology file, each in its own table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Topology {
    pub atoms: Table<TopologyAtom>,
    pub bonds: Table<BondRow>,
    pub angles: Table<AngleRow>,
    pub dihedrals: Table<DihedralRow>,
    pub impropers: Table<ImproperRow>,
    pub cross_terms: Table<CrossTermRow>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every section of `other` after the rows already present.
    pub fn merge(&mut self, other: Topology) {
        self.atoms.append(other.atoms.into_rows());
        self.bonds.append(other.bonds.into_rows());
        self.angles.append(other.angles.into_rows());
        self.dihedrals.append(other.dihedrals.into_rows());
        self.impropers.append(other.impropers.into_rows());
        self.cross_terms.append(other.cross_terms.into_rows());
    }

    /// Finds the first topology atom with the given serial.
    pub fn atom(&self, serial: usize) -> Option<&TopologyAtom> {
        self.atoms.iter().find(|a| a.serial == serial)
    }

    /// Iterates over bonds as `(atom1, atom2)` pairs.
    pub fn bond_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.bonds.iter().map(|b| (b.atom1, b.atom2))
    }

    /// Bond, angle, dihedral and improper references to serials absent from the
    /// atom table.
    ///
    /// The readers do not enforce referential integrity; this is the consistency
    /// check downstream consumers can run before relying on the tables.
    pub fn dangling_references(&self) -> Vec<usize> {
        let known: std::collections::HashSet<usize> =
            self.atoms.iter().map(|a| a.serial).collect();

        let referenced = self
            .bonds
            .iter()
            .flat_map(|b| [b.atom1, b.atom2])
            .chain(self.angles.iter().flat_map(|a| a.atoms))
            .chain(self.dihedrals.iter().flat_map(|d| d.atoms))
            .chain(self.impropers.iter().flat_map(|i| i.atoms));

        let mut missing: Vec<usize> = referenced.filter(|s| !known.contains(s)).collect();
        missing.sort_unstable();
        missing.dedup();
        missing
    }
}
