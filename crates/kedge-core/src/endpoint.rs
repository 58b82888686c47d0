//! Endpoint shortcut (`host` or `host/path`) attached to a service port

use std::str::FromStr;

use crate::error::{ParseError, Result};

/// Host and path an endpoint ingress routes on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    /// Always starts with `/`
    pub path: String,
}

impl FromStr for Endpoint {
    type Err = ParseError;

    fn from_str(endpoint: &str) -> Result<Self> {
        let (host, path) = match endpoint.split_once('/') {
            Some((host, rest)) => (host, format!("/{rest}")),
            None => (endpoint, "/".to_string()),
        };

        if host.is_empty() || endpoint.chars().any(char::is_whitespace) {
            return Err(ParseError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
            });
        }

        Ok(Endpoint {
            host: host.to_string(),
            path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint(s: &str) -> Endpoint {
        s.parse().unwrap()
    }

    #[test]
    fn test_host_only_defaults_path() {
        let e = endpoint("example.com");
        assert_eq!(e.host, "example.com");
        assert_eq!(e.path, "/");
    }

    #[test]
    fn test_host_and_path() {
        let e = endpoint("example.com/api");
        assert_eq!(e.host, "example.com");
        assert_eq!(e.path, "/api");
    }

    #[test]
    fn test_nested_path_kept_whole() {
        assert_eq!(endpoint("example.com/api/v1/users").path, "/api/v1/users");
        assert_eq!(endpoint("example.com/").path, "/");
    }

    #[test]
    fn test_invalid_endpoints() {
        for input in ["", "/api", "exa mple.com", "example.com/a b"] {
            assert_eq!(
                input.parse::<Endpoint>(),
                Err(ParseError::InvalidEndpoint {
                    endpoint: input.to_string()
                }),
                "input: {input:?}"
            );
        }
    }
}
