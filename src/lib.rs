//! Network checker - probes outbound HTTP connectivity, directly or through a proxy
//!
//! Each check issues one GET and reports the status, body length and any
//! error, with proxy credentials redacted from everything it returns or logs.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod proxy;

pub use application::Application;
pub use config::Settings;
pub use error::{Error, Result};
pub use proxy::{ConnectivityChecker, ProxyCheckService, ProxyResult};
