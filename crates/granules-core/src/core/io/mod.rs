//! Provides readers for the NAMD/CHARMM input file formats.
//!
//! Each format has its own reader implementing [`traits::MolecularFile`]:
//! fixed-column coordinates ([`pdb`]), counted topology sections ([`psf`]),
//! free-form parameter sections ([`prm`]) and the extended-system cell record
//! ([`xsc`]). Files are dispatched to a reader by their extension through
//! [`FileKind::from_path`].

pub mod error;
pub mod pdb;
pub mod prm;
pub mod psf;
pub mod traits;
pub(crate) mod util;
pub mod xsc;

use phf::{Map, phf_map};
use std::fmt;
use std::path::Path;

/// The input file formats understood by the readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Fixed-column atomic coordinates (`.pdb`).
    Coordinates,
    /// Bonded topology (`.psf`).
    Topology,
    /// Force-field parameters (`.prm`).
    Parameters,
    /// Periodic cell of an extended-system file (`.xsc`).
    PeriodicBox,
}

static FILE_KINDS_BY_EXTENSION: Map<&'static str, FileKind> = phf_map! {
    "pdb" => FileKind::Coordinates,
    "psf" => FileKind::Topology,
    "prm" => FileKind::Parameters,
    "xsc" => FileKind::PeriodicBox,
};

impl FileKind {
    /// Determines the file kind from the extension of `path`, ignoring case.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        FILE_KINDS_BY_EXTENSION.get(extension.as_str()).copied()
    }

    /// The canonical file extension, without the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Coordinates => "pdb",
            Self::Topology => "psf",
            Self::Parameters => "prm",
            Self::PeriodicBox => "xsc",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Coordinates => "PDB",
            Self::Topology => "PSF",
            Self::Parameters => "PRM",
            Self::PeriodicBox => "XSC",
        })
    }
}
