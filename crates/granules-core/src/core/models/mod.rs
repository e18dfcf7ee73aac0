//! # Core Models Module
//!
//! Data structures holding everything the readers extract from the input files.
//!
//! ## Key Components
//!
//! - [`table`] - Schema-tagged, append-only table of typed rows
//! - [`atom`] - Coordinate records from fixed-column structure files
//! - [`topology`] - Atom, bond, angle, dihedral, improper and cross-term sections
//! - [`pbc`] - Periodic cell vectors, origin and wrapping flags
//! - [`system`] - The aggregate `MolecularModel` and its file-loading entry points
//!
//! ```ignore
//! use granules::core::models::system::MolecularModel;
//!
//! let model = MolecularModel::from_files(&["benzene.pdb", "benzene.psf"])?;
//! let rings = model.polygons_of_length(6)?;
//! ```

pub mod atom;
pub mod pbc;
pub mod system;
pub mod table;
pub mod topology;
