use super::FileKind;
use super::error::{FormatErrorKind, ParseError};
use super::traits::MolecularFile;
use super::util::parse_float;
use nalgebra::{Point3, Vector3};
use std::io::BufRead;
use tracing::debug;

const CELL_FIELDS: [&str; 12] = [
    "a_x", "a_y", "a_z", "b_x", "b_y", "b_z", "c_x", "c_y", "c_z", "o_x", "o_y", "o_z",
];

/// Cell geometry from one data line of an extended-system file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellRecord {
    pub basis: [Vector3<f64>; 3],
    pub origin: Point3<f64>,
}

fn parse_cell(line: &str, line_num: usize) -> Result<CellRecord, ParseError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 13 {
        return Err(ParseError::format(
            FileKind::PeriodicBox,
            line_num,
            FormatErrorKind::WrongFieldCount {
                section: "cell",
                expected: "at least 13",
                found: tokens.len(),
            },
        ));
    }

    // Token 0 is the step number.
    let mut values = [0.0; 12];
    for ((value, token), field) in values.iter_mut().zip(&tokens[1..13]).zip(CELL_FIELDS) {
        *value = parse_float(token, field)
            .map_err(|kind| ParseError::format(FileKind::PeriodicBox, line_num, kind))?;
    }
    let vector = |i: usize| Vector3::new(values[i], values[i + 1], values[i + 2]);

    Ok(CellRecord {
        basis: [vector(0), vector(3), vector(6)],
        origin: Point3::from(vector(9)),
    })
}

/// Reader for extended-system (`.xsc`) files.
///
/// Every data line carries a complete cell; the last one in the file is
/// returned. A file with only comments yields `None`.
pub struct XscFile;

impl MolecularFile for XscFile {
    type Output = Option<CellRecord>;
    const KIND: FileKind = FileKind::PeriodicBox;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, ParseError> {
        let mut cell = None;
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let content = line.trim();
            if content.is_empty() || content.starts_with('#') {
                continue;
            }
            cell = Some(parse_cell(content, line_num + 1)?);
        }
        debug!(found = cell.is_some(), "Read periodic cell.");
        Ok(cell)
    }
}
