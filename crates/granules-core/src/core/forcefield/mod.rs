//! # Force Field Module
//!
//! Typed parameter tables read from CHARMM-style `.prm` files.
//!
//! ## Overview
//!
//! Each bonded table (bonds, angles, dihedrals, impropers) is keyed by a tuple of
//! atom types. Lookups accept the tuple in either direction and check both
//! orderings at query time, so every parameter row is stored exactly once.
//! Nonbonded parameters are keyed by a single atom type.
//!
//! ```ignore
//! use granules::core::forcefield::params::ForceField;
//!
//! let kb = forcefield.bond("HP", "CA").map(|p| p.kb);
//! ```

pub mod params;
