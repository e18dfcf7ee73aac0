//! # Core Module
//!
//! Stateless building blocks: file readers, typed tables, the molecular model,
//! force-field parameters and ring perception.
//!
//! ## Architecture
//!
//! - **File I/O** ([`io`]) - Readers for the coordinate, topology, parameter and box formats
//! - **Molecular Representation** ([`models`]) - Typed tables, periodic box and the aggregate model
//! - **Force Field** ([`forcefield`]) - Bonded and nonbonded parameter tables with symmetric lookup
//! - **Ring Perception** ([`rings`]) - Bond graph, cycle enumeration, polygons and their adjacency
//!
//! Data only flows downward through this list: readers produce rows, the model
//! aggregates them, and ring perception consumes the model's bonds and coordinates.

pub mod forcefield;
pub mod io;
pub mod models;
pub mod rings;
