//! Domain types for the network checker
//!
//! Validated value types shared by configuration and the probing engine,
//! following type-driven development principles.

pub mod config_types;

pub use config_types::*;
