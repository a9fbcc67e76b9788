//! HTTP header constants and well-known paths for the checker's HTTP surface

/// Header name for request ID used for tracing and correlation
pub const X_REQUEST_ID: &str = "x-request-id";

/// Well-known paths
pub mod paths {
    /// Probe a target without a proxy
    pub const DIRECT: &str = "/direct";

    /// Probe a target through a forward proxy
    pub const PROXY: &str = "/proxy";

    /// Health check endpoint path
    pub const HEALTH: &str = "/health";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_constants() {
        assert!(X_REQUEST_ID.starts_with("x-"));
        assert_eq!(X_REQUEST_ID, X_REQUEST_ID.to_ascii_lowercase());

        for path in [paths::DIRECT, paths::PROXY, paths::HEALTH] {
            assert!(path.starts_with('/'));
        }
    }
}
