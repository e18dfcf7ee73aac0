use super::FileKind;
use super::error::{FormatErrorKind, ParseError};
use super::traits::{MolecularFile, read_lines};
use super::util::{parse_float, parse_int};
use crate::core::models::topology::{
    AngleRow, BondRow, CrossTermRow, DihedralRow, ImproperRow, Topology, TopologyAtom,
};
use std::io::BufRead;
use tracing::debug;

/// Layout of one counted section of a topology file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLayout {
    /// Name following the `!N` count marker in the section header.
    pub name: &'static str,
    /// Number of fields in one record.
    pub tuple_len: usize,
    /// Number of records packed on one physical line.
    pub items_per_line: usize,
}

impl SectionLayout {
    const fn new(name: &'static str, tuple_len: usize, items_per_line: usize) -> Self {
        Self {
            name,
            tuple_len,
            items_per_line,
        }
    }

    fn marker(&self) -> String {
        format!("!N{}", self.name)
    }
}

pub const ATOM_SECTION: SectionLayout = SectionLayout::new("ATOM", 9, 1);
pub const BOND_SECTION: SectionLayout = SectionLayout::new("BOND", 2, 4);
pub const ANGLE_SECTION: SectionLayout = SectionLayout::new("THETA", 3, 3);
pub const DIHEDRAL_SECTION: SectionLayout = SectionLayout::new("PHI", 4, 2);
pub const IMPROPER_SECTION: SectionLayout = SectionLayout::new("IMPHI", 4, 2);
pub const CROSS_TERM_SECTION: SectionLayout = SectionLayout::new("CRTERM", 4, 2);

/// One complete record of a section with the line it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTuple<'a> {
    pub line: usize,
    pub fields: Vec<&'a str>,
}

/// Reads the records of one counted section.
///
/// The whole file is scanned from the top for the first line containing the
/// section's `!N<NAME>` marker; its leading token is the record count. Exactly
/// `ceil(count / items_per_line)` lines follow, and their tokens are grouped
/// into records of `tuple_len` fields. Incomplete trailing groups are dropped.
/// A missing header yields no records.
///
/// # Errors
///
/// Returns a format error if the header count is not an integer or the file
/// ends before the declared number of lines.
pub fn read_section<'a>(
    lines: &'a [String],
    layout: &SectionLayout,
) -> Result<Vec<SectionTuple<'a>>, ParseError> {
    let marker = layout.marker();
    let Some(header_idx) = lines.iter().position(|line| line.contains(&marker)) else {
        return Ok(Vec::new());
    };
    let header_line = header_idx + 1;

    let count_token = lines[header_idx].split_whitespace().next().unwrap_or("");
    let count: usize = count_token.parse().map_err(|_| {
        ParseError::format(
            FileKind::Topology,
            header_line,
            FormatErrorKind::InvalidCount {
                section: layout.name,
                value: count_token.to_string(),
            },
        )
    })?;

    let line_count = count.div_ceil(layout.items_per_line);
    let body = &lines[header_idx + 1..];
    if body.len() < line_count {
        return Err(ParseError::format(
            FileKind::Topology,
            header_line,
            FormatErrorKind::TruncatedSection {
                section: layout.name,
                expected: line_count,
                found: body.len(),
            },
        ));
    }

    let mut tuples = Vec::with_capacity(count);
    for (offset, line) in body[..line_count].iter().enumerate() {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        tuples.extend(
            tokens
                .chunks(layout.tuple_len)
                .filter(|chunk| chunk.len() == layout.tuple_len)
                .map(|chunk| SectionTuple {
                    line: header_line + 1 + offset,
                    fields: chunk.to_vec(),
                }),
        );
    }

    debug!(
        section = layout.name,
        declared = count,
        parsed = tuples.len(),
        "Read topology section."
    );
    Ok(tuples)
}

fn parse_ids<const N: usize>(
    tuple: &SectionTuple<'_>,
    section: &'static str,
) -> Result<[usize; N], ParseError> {
    let mut ids = [0usize; N];
    for (id, field) in ids.iter_mut().zip(&tuple.fields) {
        *id = parse_int(field, section)
            .map_err(|kind| ParseError::format(FileKind::Topology, tuple.line, kind))?;
    }
    Ok(ids)
}

fn parse_atom(tuple: &SectionTuple<'_>) -> Result<TopologyAtom, ParseError> {
    let err = |kind| ParseError::format(FileKind::Topology, tuple.line, kind);
    let f = &tuple.fields;
    Ok(TopologyAtom {
        serial: parse_int(f[0], "ID").map_err(err)?,
        segment: f[1].to_string(),
        residue_id: f[2].to_string(),
        residue_name: f[3].to_string(),
        name: f[4].to_string(),
        atom_type: f[5].to_string(),
        charge: parse_float(f[6], "Charge").map_err(err)?,
        mass: parse_float(f[7], "Mass").map_err(err)?,
        reserved: f[8].to_string(),
    })
}

fn read_ids<const N: usize, R>(
    lines: &[String],
    layout: &SectionLayout,
    build: impl Fn([usize; N]) -> R,
) -> Result<Vec<R>, ParseError> {
    read_section(lines, layout)?
        .iter()
        .map(|tuple| parse_ids::<N>(tuple, layout.name).map(&build))
        .collect()
}

/// Reader for counted-section topology files.
///
/// Every section is located independently by rescanning the file, so sections
/// may appear in any order. Sections without a header, or declared with a count
/// of zero, produce empty tables.
pub struct PsfFile;

impl MolecularFile for PsfFile {
    type Output = Topology;
    const KIND: FileKind = FileKind::Topology;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, ParseError> {
        let lines = read_lines(reader)?;
        let mut topology = Topology::new();

        let atoms = read_section(&lines, &ATOM_SECTION)?
            .iter()
            .map(parse_atom)
            .collect::<Result<Vec<_>, _>>()?;
        let bonds = read_ids(&lines, &BOND_SECTION, |[a, b]| BondRow::new(a, b))?;
        let angles = read_ids(&lines, &ANGLE_SECTION, |atoms| AngleRow { atoms })?;
        let dihedrals = read_ids(&lines, &DIHEDRAL_SECTION, |atoms| DihedralRow { atoms })?;
        let impropers = read_ids(&lines, &IMPROPER_SECTION, |atoms| ImproperRow { atoms })?;
        let cross_terms = read_ids(&lines, &CROSS_TERM_SECTION, |atoms| CrossTermRow { atoms })?;

        topology.atoms.append(atoms);
        topology.bonds.append(bonds);
        topology.angles.append(angles);
        topology.dihedrals.append(dihedrals);
        topology.impropers.append(impropers);
        topology.cross_terms.append(cross_terms);
        Ok(topology)
    }
}
