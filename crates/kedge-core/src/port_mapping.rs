//! Port mapping shorthand
//!
//! A service port can be written as a compact string instead of a full
//! structure. The grammar is `PORT[:TARGET_PORT][/PROTOCOL]`:
//! - `8080` - port and target port 8080, TCP
//! - `8080:9090` - port 8080 forwarded to 9090, TCP
//! - `8080/UDP` - port and target port 8080, UDP
//! - `8080:9090/UDP` - everything explicit

use std::fmt;
use std::str::FromStr;

use k8s_openapi::api::core::v1::ServicePort;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;

use crate::error::{ParseError, Result};

/// Transport protocol of a service port
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Protocol {
    #[default]
    Tcp,
    Udp,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Tcp => "TCP",
            Protocol::Udp => "UDP",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "TCP" => Ok(Protocol::Tcp),
            "UDP" => Ok(Protocol::Udp),
            other => Err(ParseError::InvalidProtocol {
                value: other.to_string(),
            }),
        }
    }
}

/// A parsed port mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    pub port: i32,
    pub target_port: i32,
    pub protocol: Protocol,
}

impl FromStr for PortMapping {
    type Err = ParseError;

    fn from_str(mapping: &str) -> Result<Self> {
        let invalid = || ParseError::InvalidPortMapping {
            mapping: mapping.to_string(),
        };

        let (ports, protocol) = match mapping.split_once('/') {
            None => (mapping, Protocol::Tcp),
            Some((_, protocol)) if protocol.contains('/') => return Err(invalid()),
            Some((ports, protocol)) => (ports, protocol.parse()?),
        };

        let (port, target_port) = match ports.split_once(':') {
            None => {
                let port = parse_int("port", ports)?;
                (port, port)
            }
            Some((_, target)) if target.contains(':') => return Err(invalid()),
            Some((port, target)) => (parse_int("port", port)?, parse_int("targetPort", target)?),
        };

        Ok(PortMapping {
            port,
            target_port,
            protocol,
        })
    }
}

impl From<PortMapping> for ServicePort {
    fn from(mapping: PortMapping) -> Self {
        ServicePort {
            port: mapping.port,
            target_port: Some(IntOrString::Int(mapping.target_port)),
            protocol: Some(mapping.protocol.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// Parse a port mapping string straight into a Kubernetes service port
pub fn parse_port_mapping(mapping: &str) -> Result<ServicePort> {
    mapping.parse::<PortMapping>().map(ServicePort::from)
}

fn parse_int(field: &'static str, value: &str) -> Result<i32> {
    value.parse::<i32>().map_err(|_| ParseError::NotAnInteger {
        field,
        value: value.to_string(),
    })
}
