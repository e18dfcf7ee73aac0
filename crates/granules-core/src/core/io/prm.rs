use super::FileKind;
use super::error::{FormatErrorKind, ParseError};
use super::traits::{MolecularFile, read_lines};
use super::util::{parse_float, parse_int, prefix4};
use crate::core::forcefield::params::{
    AngleParam, BondParam, DihedralParam, ForceField, ImproperParam, NonbondedParam,
};
use phf::{Set, phf_set};
use std::io::BufRead;
use tracing::debug;

/// Four-character prefixes of the keywords that open a parameter section.
static SECTION_KEYWORDS: Set<&'static str> = phf_set! {
    "BOND", "ANGL", "DIHE", "IMPR", "CMAP", "NONB", "END", "HBON", "NBFI", "ATOM",
};

/// The parameter sections this reader turns into tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrmSection {
    Bonds,
    Angles,
    Dihedrals,
    Impropers,
    Nonbonded,
}

impl PrmSection {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bonds => "BONDS",
            Self::Angles => "ANGLES",
            Self::Dihedrals => "DIHEDRALS",
            Self::Impropers => "IMPROPER",
            Self::Nonbonded => "NONBONDED",
        }
    }
}

/// The whitespace-separated tokens of one data line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataRow<'a> {
    pub line: usize,
    pub tokens: Vec<&'a str>,
}

/// Strips the `!` comment and surrounding whitespace from a raw line.
///
/// Returns `None` for lines with no content left and for `*` title lines.
pub fn clean_line(raw: &str) -> Option<&str> {
    let content = raw.split('!').next().unwrap_or("").trim();
    if content.is_empty() || content.starts_with('*') {
        None
    } else {
        Some(content)
    }
}

fn is_section_keyword(content: &str) -> bool {
    let first = content.split_whitespace().next().unwrap_or("");
    SECTION_KEYWORDS.contains(prefix4(first))
}

/// Collects the data rows of every block of `section`, in file order.
///
/// A block opens on a line whose first four characters match the section
/// name's and runs until the next line starting with a section keyword. That
/// line is left in place and may itself open another block of the same
/// section. A header ending in `-` continues on the following line, which is
/// skipped along with any further continuations.
pub fn read_section(lines: &[String], section: PrmSection) -> Vec<DataRow<'_>> {
    let target = prefix4(section.name());
    let mut rows = Vec::new();
    let mut idx = 0;

    while idx < lines.len() {
        let content = clean_line(&lines[idx]);
        idx += 1;
        let Some(header) = content.filter(|c| prefix4(c) == target) else {
            continue;
        };

        let mut continued = header.ends_with('-');
        while continued && idx < lines.len() {
            continued = clean_line(&lines[idx]).is_some_and(|c| c.ends_with('-'));
            idx += 1;
        }

        while idx < lines.len() {
            let Some(content) = clean_line(&lines[idx]) else {
                idx += 1;
                continue;
            };
            if is_section_keyword(content) {
                break;
            }
            rows.push(DataRow {
                line: idx + 1,
                tokens: content.split_whitespace().collect(),
            });
            idx += 1;
        }
    }
    rows
}

struct RowParser<'r, 'a> {
    row: &'r DataRow<'a>,
    section: PrmSection,
}

impl<'r, 'a> RowParser<'r, 'a> {
    fn new(row: &'r DataRow<'a>, section: PrmSection) -> Self {
        Self { row, section }
    }

    fn error(&self, kind: FormatErrorKind) -> ParseError {
        ParseError::format(FileKind::Parameters, self.row.line, kind)
    }

    fn require(&self, accepted: bool, expected: &'static str) -> Result<(), ParseError> {
        if accepted {
            Ok(())
        } else {
            Err(self.error(FormatErrorKind::WrongFieldCount {
                section: self.section.name(),
                expected,
                found: self.row.tokens.len(),
            }))
        }
    }

    fn len(&self) -> usize {
        self.row.tokens.len()
    }

    fn text(&self, idx: usize) -> String {
        self.row.tokens[idx].to_string()
    }

    fn types<const N: usize>(&self) -> [String; N] {
        std::array::from_fn(|idx| self.text(idx))
    }

    fn float(&self, idx: usize, field: &'static str) -> Result<f64, ParseError> {
        parse_float(self.row.tokens[idx], field).map_err(|kind| self.error(kind))
    }

    fn int(&self, idx: usize, field: &'static str) -> Result<i32, ParseError> {
        parse_int(self.row.tokens[idx], field).map_err(|kind| self.error(kind))
    }
}

fn parse_bond(p: &RowParser<'_, '_>) -> Result<BondParam, ParseError> {
    p.require(p.len() >= 4, "at least 4")?;
    Ok(BondParam {
        types: p.types(),
        kb: p.float(2, "Kb")?,
        b0: p.float(3, "b0")?,
    })
}

fn parse_angle(p: &RowParser<'_, '_>) -> Result<AngleParam, ParseError> {
    p.require(p.len() == 5 || p.len() >= 7, "5 or at least 7")?;
    let (k_ub, s0) = if p.len() >= 7 {
        (Some(p.float(5, "Kub")?), Some(p.float(6, "S0")?))
    } else {
        (None, None)
    };
    Ok(AngleParam {
        types: p.types(),
        k_theta: p.float(3, "Ktheta")?,
        theta0: p.float(4, "Theta0")?,
        k_ub,
        s0,
    })
}

fn parse_dihedral(p: &RowParser<'_, '_>) -> Result<DihedralParam, ParseError> {
    p.require(p.len() >= 7, "at least 7")?;
    Ok(DihedralParam {
        types: p.types(),
        k_chi: p.float(4, "Kchi")?,
        multiplicity: p.int(5, "n")?,
        delta: p.float(6, "delta")?,
    })
}

fn parse_improper(p: &RowParser<'_, '_>) -> Result<ImproperParam, ParseError> {
    p.require(p.len() >= 7, "at least 7")?;
    Ok(ImproperParam {
        types: p.types(),
        k_psi: p.float(4, "Kpsi")?,
        unused: p.text(5),
        psi0: p.float(6, "psi0")?,
    })
}

/// Nonbonded rows store negated well depths; without an explicit 1-4 triple
/// the 1-4 values repeat the primary pair.
fn parse_nonbonded(p: &RowParser<'_, '_>) -> Result<NonbondedParam, ParseError> {
    p.require(p.len() >= 4, "at least 4")?;
    let epsilon = -p.float(2, "epsilon")?;
    let rmin_half = p.float(3, "Rmin2")?;
    let (epsilon_14, rmin_half_14) = if p.len() >= 7 {
        (-p.float(5, "epsilon1_4")?, p.float(6, "Rmin2_1_4")?)
    } else {
        (epsilon, rmin_half)
    };
    Ok(NonbondedParam {
        atom_type: p.text(0),
        epsilon,
        rmin_half,
        epsilon_14,
        rmin_half_14,
    })
}

fn read_table<R>(
    lines: &[String],
    section: PrmSection,
    parse: fn(&RowParser<'_, '_>) -> Result<R, ParseError>,
) -> Result<Vec<R>, ParseError> {
    let rows = read_section(lines, section);
    let parsed = rows
        .iter()
        .map(|row| parse(&RowParser::new(row, section)))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        section = section.name(),
        rows = parsed.len(),
        "Read parameter section."
    );
    Ok(parsed)
}

/// Reader for CHARMM-style parameter files.
///
/// Sections may recur; every block of a section contributes rows in file
/// order. Sections that never appear produce empty tables.
pub struct PrmFile;

impl MolecularFile for PrmFile {
    type Output = ForceField;
    const KIND: FileKind = FileKind::Parameters;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, ParseError> {
        let lines = read_lines(reader)?;

        let bonds = read_table(&lines, PrmSection::Bonds, parse_bond)?;
        let angles = read_table(&lines, PrmSection::Angles, parse_angle)?;
        let dihedrals = read_table(&lines, PrmSection::Dihedrals, parse_dihedral)?;
        let impropers = read_table(&lines, PrmSection::Impropers, parse_improper)?;
        let nonbonded = read_table(&lines, PrmSection::Nonbonded, parse_nonbonded)?;

        let mut forcefield = ForceField::new();
        forcefield.bonds.append(bonds);
        forcefield.angles.append(angles);
        forcefield.dihedrals.append(dihedrals);
        forcefield.impropers.append(impropers);
        forcefield.nonbonded.append(nonbonded);
        Ok(forcefield)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE_PRM: &str = "\
* toy parameters for a benzene ring
*

BONDS
!V(bond) = Kb(b - b0)**2
CA   CA    305.000     1.3750 ! ALLOW   ARO
CA   HP    340.000     1.0800

ANGLES
CA   CA   CA    40.000    120.00   35.00   2.41620
CA   CA   HP    30.000    120.00

DIHEDRALS
CA   CA   CA   CA       3.1000  2   180.00
CA   CA   CA   HP       4.2000  2   180.00

IMPROPER
HE2  HE2  CE2  CE2     3.0        0      0.00

NONBONDED nbxmod  5 atom cdiel fshift vatom vdistance vfswitch -
cutnb 14.0 ctofnb 12.0 ctonnb 10.0 eps 1.0 e14fac 1.0 wmin 1.5

CA     0.000000  -0.070000     1.992400
HP     0.000000  -0.030000     1.358200   0.0  -0.0100   1.1000

HBOND CUTHB 0.5

END
";

    fn to_lines(content: &str) -> Vec<String> {
        content.lines().map(String::from).collect()
    }

    fn read(content: &str) -> Result<ForceField, ParseError> {
        PrmFile::read_from(&mut Cursor::new(content))
    }

    #[test]
    fn reads_every_table() {
        let ff = read(SAMPLE_PRM).unwrap();
        assert_eq!(ff.bonds.len(), 2);
        assert_eq!(ff.angles.len(), 2);
        assert_eq!(ff.dihedrals.len(), 2);
        assert_eq!(ff.impropers.len(), 1);
        assert_eq!(ff.nonbonded.len(), 2);

        let ca_hp = ff.bond("HP", "CA").unwrap();
        assert_eq!(ca_hp.kb, 340.0);
        assert_eq!(ca_hp.b0, 1.08);
        assert_eq!(ff.dihedrals[0].multiplicity, 2);
        assert_eq!(ff.impropers[0].unused, "0");
    }

    #[test]
    fn angles_without_urey_bradley_leave_it_absent() {
        let ff = read(SAMPLE_PRM).unwrap();
        let full = &ff.angles[0];
        assert_eq!(full.k_ub, Some(35.0));
        assert_eq!(full.s0, Some(2.4162));
        let short = ff.angle("HP", "CA", "CA").unwrap();
        assert_eq!(short.k_theta, 30.0);
        assert_eq!(short.k_ub, None);
        assert_eq!(short.s0, None);
    }

    #[test]
    fn nonbonded_epsilons_are_negated_and_defaulted() {
        let ff = read("NONBONDED\nC 0.0 -0.10 1.90\n").unwrap();
        let c = ff.nonbonded("C").unwrap();
        assert_eq!(c.epsilon, 0.10);
        assert_eq!(c.rmin_half, 1.90);
        assert_eq!(c.epsilon_14, 0.10);
        assert_eq!(c.rmin_half_14, 1.90);
    }

    #[test]
    fn nonbonded_explicit_one_four_values_are_used() {
        let ff = read(SAMPLE_PRM).unwrap();
        let hp = ff.nonbonded("HP").unwrap();
        assert_eq!(hp.epsilon, 0.03);
        assert_eq!(hp.epsilon_14, 0.01);
        assert_eq!(hp.rmin_half_14, 1.1);
    }

    #[test]
    fn continuation_line_after_header_is_skipped() {
        let lines = to_lines(SAMPLE_PRM);
        let rows = read_section(&lines, PrmSection::Nonbonded);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tokens[0], "CA");
        assert_eq!(rows[0].line, 23);
    }

    #[test]
    fn recurring_sections_are_concatenated() {
        let content = "\
BONDS
CA CA 305.0 1.375
ANGLES
CA CA CA 40.0 120.0
BONDS
CA HP 340.0 1.08
END
";
        let ff = read(content).unwrap();
        assert_eq!(ff.bonds.len(), 2);
        assert_eq!(ff.bonds[1].types, ["CA".to_string(), "HP".to_string()]);
        assert_eq!(ff.angles.len(), 1);
    }

    #[test]
    fn back_to_back_blocks_of_the_same_section_are_read() {
        let content = "BONDS\nCA CA 305.0 1.375\nBONDS\nCA HP 340.0 1.08\n";
        assert_eq!(read(content).unwrap().bonds.len(), 2);
    }

    #[test]
    fn nbfix_block_terminates_nonbonded() {
        let content = "NONBONDED\nCA 0.0 -0.07 1.99\nNBFIX\nCA HP -0.05 3.2\n";
        assert_eq!(read(content).unwrap().nonbonded.len(), 1);
    }

    #[test]
    fn comment_stripping_is_idempotent() {
        for raw in ["CA CA 305.0 1.375 ! aromatic", "   ! only a comment", "* title", "  "] {
            let once = clean_line(raw);
            assert_eq!(once.and_then(clean_line), once);
        }
        assert_eq!(clean_line("CA CA 305.0 1.375 ! aromatic"), Some("CA CA 305.0 1.375"));
        assert_eq!(clean_line("* title"), None);
    }

    #[test]
    fn missing_sections_give_empty_tables() {
        let ff = read("* nothing\nBONDS\nCA CA 305.0 1.375\n").unwrap();
        assert_eq!(ff.bonds.len(), 1);
        assert!(ff.angles.is_empty());
        assert!(ff.nonbonded.is_empty());
    }

    #[test]
    fn angle_with_six_fields_is_rejected() {
        let err = read("ANGLES\nCA CA CA 40.0 120.0 35.0\n").unwrap_err();
        assert_eq!(
            err.kind(),
            Some(&FormatErrorKind::WrongFieldCount {
                section: "ANGLES",
                expected: "5 or at least 7",
                found: 6
            })
        );
    }

    #[test]
    fn short_bond_row_is_rejected() {
        let err = read("BONDS\nCA CA 305.0\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::Format {
                format: FileKind::Parameters,
                line: 2,
                kind: FormatErrorKind::WrongFieldCount { found: 3, .. }
            }
        ));
    }

    #[test]
    fn non_numeric_multiplicity_is_rejected() {
        let err = read("DIHEDRALS\nX CA CA X 3.1 two 180.0\n").unwrap_err();
        assert!(matches!(
            err.kind(),
            Some(FormatErrorKind::InvalidInt { field: "n", .. })
        ));
    }
}
