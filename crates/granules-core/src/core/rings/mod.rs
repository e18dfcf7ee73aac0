//! # Ring Perception Module
//!
//! Finds rings in a molecule from its bond table and turns them into geometric
//! polygons that can be related to each other.
//!
//! ## Pipeline
//!
//! - [`graph`] - Undirected bond graph keyed by atom serial
//! - [`cycles`] - Depth-first enumeration of simple cycles of a fixed length,
//!   deduplicated by vertex set
//! - [`polygon`] - Cycles resolved to coordinates, and the adjacency network
//!   between polygons
//!
//! Everything here is recomputed on demand; nothing is cached on the model.

pub mod cycles;
pub mod graph;
pub mod polygon;

pub use cycles::{Cycle, CycleAccumulator, MAX_RING_SIZE, find_cycles};
pub use graph::BondGraph;
pub use polygon::{AdjacencyRule, Polygon, PolygonNetwork};

use thiserror::Error;

/// Failure to resolve a cycle vertex to a position.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Atom {serial} is bonded but has no coordinate record")]
    MissingAtom { serial: usize },
    #[error("Atom {serial} does not have a complete set of coordinates")]
    IncompleteCoordinates { serial: usize },
}
