//! # granules Core Library
//!
//! Readers for NAMD/CHARMM molecular-simulation input files and a ring
//! perception engine that works on the resulting molecular model.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer layout so each concern can be tested in isolation.
//!
//! - **[`core`]: The Foundation.** Format readers (`pdb`, `psf`, `prm`, `xsc`), the
//!   schema-tagged tables they fill, the aggregate `MolecularModel`, force-field
//!   parameter tables and the ring perception algorithms.
//!
//! - **[`engine`]: Run Configuration.** Validated options for ring analysis and the
//!   error type that unifies failures from every layer below it.
//!
//! - **[`workflows`]: The Public API.** One-call procedures that load input files and
//!   run ring perception, logging each phase.

pub mod core;
pub mod engine;
pub mod workflows;
