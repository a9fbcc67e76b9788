//! Type-safe configuration types
//!
//! This module provides domain-specific types for configuration values,
//! ensuring validation at boundaries and preventing primitive obsession.

use nutype::nutype;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Host address for network services
#[nutype(
    validate(not_empty, len_char_max = 255),
    derive(
        Debug,
        Clone,
        PartialEq,
        Eq,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct Host(String);

impl Default for Host {
    fn default() -> Self {
        Self::try_new("0.0.0.0".to_string()).expect("Default host is valid")
    }
}

/// Port number for network services
#[nutype(
    validate(predicate = |port| (1..=65535).contains(port)),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Hash,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct Port(u16);

impl Default for Port {
    fn default() -> Self {
        Self::try_new(8080).expect("Default port is valid")
    }
}

/// Timeout expressed in whole seconds
#[nutype(
    validate(predicate = |secs| *secs > 0 && *secs <= 3600),
    derive(
        Debug,
        Clone,
        Copy,
        PartialEq,
        Eq,
        PartialOrd,
        Ord,
        Serialize,
        Deserialize,
        AsRef,
        Display
    )
)]
pub struct TimeoutSeconds(u64);

impl TimeoutSeconds {
    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(*self.as_ref())
    }
}

/// Username used to authenticate against a forward proxy
#[nutype(derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, From, Display))]
pub struct ProxyUsername(String);

/// Password used to authenticate against a forward proxy (secured)
#[nutype(derive(Clone, PartialEq, Eq, Serialize, Deserialize, AsRef, From))]
pub struct ProxyPassword(String);

impl fmt::Debug for ProxyPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProxyPassword(***)")
    }
}

impl fmt::Display for ProxyPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}
