use super::FileKind;
use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error in {format} data on line {line}: {kind}")]
    Format {
        format: FileKind,
        line: usize,
        kind: FormatErrorKind,
    },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatErrorKind {
    #[error("Invalid integer format in field '{field}' (value: '{value}')")]
    InvalidInt { field: &'static str, value: String },
    #[error("Invalid float format in field '{field}' (value: '{value}')")]
    InvalidFloat { field: &'static str, value: String },
    #[error("Required field '{field}' is empty")]
    MissingRequiredField { field: &'static str },
    #[error("Invalid record count in the {section} header (value: '{value}')")]
    InvalidCount { section: &'static str, value: String },
    #[error("Section {section} needs {expected} data lines but only {found} remain")]
    TruncatedSection {
        section: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("{section} record has {found} fields, expected {expected}")]
    WrongFieldCount {
        section: &'static str,
        expected: &'static str,
        found: usize,
    },
}

impl ParseError {
    pub fn format(format: FileKind, line: usize, kind: FormatErrorKind) -> Self {
        Self::Format { format, line, kind }
    }

    /// The format-level cause, if this is not an I/O failure.
    pub fn kind(&self) -> Option<&FormatErrorKind> {
        match self {
            Self::Format { kind, .. } => Some(kind),
            Self::Io(_) => None,
        }
    }
}
