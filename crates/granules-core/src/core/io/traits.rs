use super::FileKind;
use super::error::ParseError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Defines the interface shared by every input file reader.
///
/// Implementors parse one complete file into their typed output. Nothing is
/// committed to a model by the reader itself, so a failed read leaves any
/// previously loaded data untouched.
pub trait MolecularFile {
    /// The typed result of reading one file.
    type Output;

    /// The format this reader handles, used in error reports.
    const KIND: FileKind;

    /// Reads a complete file from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::Format`] if a record cannot be coerced to its typed
    /// representation, or [`ParseError::Io`] if reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, ParseError>;

    /// Reads a complete file from a path.
    ///
    /// The file is opened, consumed and closed before this returns, on success
    /// and on failure alike.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, ParseError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Collects every line of a reader, for formats whose sections are located by
/// rescanning the file from the top.
pub(crate) fn read_lines(reader: &mut impl BufRead) -> Result<Vec<String>, ParseError> {
    reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(ParseError::from)
}
