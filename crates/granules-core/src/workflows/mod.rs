//! # Workflows Module
//!
//! Top-level entry points that take input files and options and return a
//! finished analysis.
//!
//! - **Ring Workflow** ([`rings`]) - Loads NAMD/CHARMM input files, enumerates
//!   rings of one size, resolves them to polygons and optionally connects them
//!   into an adjacency network.

pub mod rings;
