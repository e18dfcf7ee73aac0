use super::table::Record;
use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The kind of coordinate record an atom was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordKind {
    /// Standard `ATOM` record.
    #[default]
    Atom,
    /// `HETATM` record for heteroatoms (ligands, solvent, ions).
    HetAtom,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid coordinate record kind: '{0}'")]
pub struct ParseRecordKindError(pub String);

impl FromStr for RecordKind {
    type Err = ParseRecordKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ATOM" => Ok(Self::Atom),
            "HETATM" | "HETA" => Ok(Self::HetAtom),
            other => Err(ParseRecordKindError(other.to_string())),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atom => "ATOM",
            Self::HetAtom => "HETATM",
        })
    }
}

/// A single row of the coordinate table.
///
/// Every optional column uses `None` for an absent value; the readers never
/// store empty strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomRecord {
    /// Whether the row came from an `ATOM` or a `HETATM` line.
    pub kind: RecordKind,
    /// Atom serial number.
    pub serial: usize,
    /// Atom name (e.g. "CA").
    pub name: Option<String>,
    /// Alternate location indicator.
    pub alt_loc: Option<String>,
    /// Residue name (e.g. "ALA").
    pub residue_name: Option<String>,
    /// Chain identifier.
    pub chain_id: Option<String>,
    /// Residue sequence number.
    pub residue_number: isize,
    /// Residue insertion code.
    pub insertion_code: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub occupancy: Option<f64>,
    pub temp_factor: Option<f64>,
    /// Element column (for NAMD files this also spans the segment name).
    pub element: Option<String>,
    /// Formal charge column, kept verbatim (e.g. "1-").
    pub charge: Option<String>,
}

impl AtomRecord {
    /// The Cartesian position of the atom, if all three coordinates are present.
    pub fn position(&self) -> Option<Point3<f64>> {
        match (self.x, self.y, self.z) {
            (Some(x), Some(y), Some(z)) => Some(Point3::new(x, y, z)),
            _ => None,
        }
    }

    /// Whether the atom can take part in geometric analysis.
    pub fn has_finite_position(&self) -> bool {
        self.position()
            .is_some_and(|p| p.coords.iter().all(|c| c.is_finite()))
    }
}

impl Record for AtomRecord {
    const SCHEMA: &'static str = "PDB/ATOM";
    const COLUMNS: &'static [&'static str] = &[
        "RecName",
        "ID",
        "Name",
        "AltLoc",
        "ResName",
        "ChainID",
        "ResSeq",
        "iCode",
        "x",
        "y",
        "z",
        "Occupancy",
        "TempFactor",
        "Element",
        "Charge",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_kind_parses_both_markers() {
        assert_eq!("ATOM".parse::<RecordKind>(), Ok(RecordKind::Atom));
        assert_eq!("HETATM".parse::<RecordKind>(), Ok(RecordKind::HetAtom));
        assert_eq!(" HETA ".parse::<RecordKind>(), Ok(RecordKind::HetAtom));
        assert!("REMARK".parse::<RecordKind>().is_err());
    }

    #[test]
    fn record_kind_display_matches_file_markers() {
        assert_eq!(RecordKind::Atom.to_string(), "ATOM");
        assert_eq!(RecordKind::HetAtom.to_string(), "HETATM");
    }

    #[test]
    fn position_requires_all_three_coordinates() {
        let mut atom = AtomRecord {
            serial: 1,
            x: Some(1.0),
            y: Some(2.0),
            z: Some(3.0),
            ..Default::default()
        };
        assert_eq!(atom.position(), Some(Point3::new(1.0, 2.0, 3.0)));
        assert!(atom.has_finite_position());

        atom.z = None;
        assert!(atom.position().is_none());
        assert!(!atom.has_finite_position());
    }

    #[test]
    fn non_finite_coordinates_are_not_geometrically_usable() {
        let atom = AtomRecord {
            x: Some(f64::NAN),
            y: Some(0.0),
            z: Some(0.0),
            ..Default::default()
        };
        assert!(atom.position().is_some());
        assert!(!atom.has_finite_position());
    }
}
