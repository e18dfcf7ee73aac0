use super::FileKind;
use super::error::{FormatErrorKind, ParseError};
use super::traits::MolecularFile;
use super::util::{parse_float, parse_int};
use crate::core::models::atom::{AtomRecord, RecordKind};
use std::io::BufRead;
use tracing::debug;

/// Widths of the consecutive columns of a coordinate record, left to right.
const COLUMN_WIDTHS: [usize; 15] = [6, 6, 4, 1, 3, 2, 4, 4, 8, 8, 8, 6, 6, 11, 2];
const COLUMN_NAMES: [&str; 15] = [
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
/// Token some writers emit for an empty column.
const ABSENT_PLACEHOLDER: &str = "<0>";

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("").trim()
}

/// Splits a record into its fixed-width fields; empty columns become `None`.
fn split_columns(line: &str) -> [Option<&str>; 15] {
    let mut fields = [None; 15];
    let mut start = 0;
    for (field, width) in fields.iter_mut().zip(COLUMN_WIDTHS) {
        let value = slice_and_trim(line, start, start + width);
        if !value.is_empty() && value != ABSENT_PLACEHOLDER {
            *field = Some(value);
        }
        start += width;
    }
    fields
}

fn is_coordinate_record(line: &str) -> bool {
    line.starts_with("ATOM") || line.starts_with("HETA")
}

fn parse_record(line: &str, line_num: usize) -> Result<AtomRecord, ParseError> {
    let err = |kind| ParseError::format(FileKind::Coordinates, line_num, kind);
    let fields = split_columns(line);
    let text = |idx: usize| fields[idx].map(str::to_string);
    let required = |idx: usize| {
        fields[idx].ok_or(FormatErrorKind::MissingRequiredField {
            field: COLUMN_NAMES[idx],
        })
    };
    let optional_float = |idx: usize| {
        fields[idx]
            .map(|v| parse_float(v, COLUMN_NAMES[idx]))
            .transpose()
    };

    let kind = fields[0]
        .and_then(|name| name.parse::<RecordKind>().ok())
        .unwrap_or_default();
    let serial = required(1)
        .and_then(|v| parse_int(v, COLUMN_NAMES[1]))
        .map_err(err)?;
    let residue_number = required(6)
        .and_then(|v| parse_int(v, COLUMN_NAMES[6]))
        .map_err(err)?;

    Ok(AtomRecord {
        kind,
        serial,
        name: text(2),
        alt_loc: text(3),
        residue_name: text(4),
        chain_id: text(5),
        residue_number,
        insertion_code: text(7),
        x: optional_float(8).map_err(err)?,
        y: optional_float(9).map_err(err)?,
        z: optional_float(10).map_err(err)?,
        occupancy: optional_float(11).map_err(err)?,
        temp_factor: optional_float(12).map_err(err)?,
        element: text(13),
        charge: text(14),
    })
}

/// Reader for fixed-column coordinate files.
///
/// Only `ATOM`/`HETATM` lines are read; every other line is ignored. The
/// output is the complete list of records in file order.
pub struct PdbFile;

impl MolecularFile for PdbFile {
    type Output = Vec<AtomRecord>;
    const KIND: FileKind = FileKind::Coordinates;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, ParseError> {
        let mut records = Vec::new();
        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            if is_coordinate_record(&line) {
                records.push(parse_record(&line, line_num + 1)?);
            }
        }
        debug!(records = records.len(), "Parsed coordinate records.");
        Ok(records)
    }
}
