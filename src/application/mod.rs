//! Application services and lifecycle orchestration
//!
//! This module wires configuration, the connectivity checker and the HTTP
//! server together.

pub mod app;

pub use app::Application;
