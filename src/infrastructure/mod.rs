//! Infrastructure layer for the network checker
//!
//! This module contains the implementations for external concerns like
//! tracing subscribers and log output.

pub mod telemetry;

pub use telemetry::init_tracing;
