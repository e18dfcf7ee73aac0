//! # Engine Module
//!
//! Run configuration and error reporting for ring analysis.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated ring size, adjacency rule and
//!   output options, assembled through a builder
//! - **Error Handling** ([`error`]) - The single error type returned by the
//!   workflows, wrapping configuration, parsing and lookup failures
//!
//! Front-ends collect options from wherever they like (files, flags) and hand
//! the builder only the values they have; defaults and validation live here.

pub mod config;
pub mod error;
