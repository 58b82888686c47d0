//! Kedge Core - application spec types and shorthand grammars
//!
//! This crate provides the input side of Kedge:
//! - `AppSpec`: the simplified application description and its children
//! - `PortMapping`: the `port[:targetPort][/protocol]` shorthand
//! - `Endpoint`: the `host[/path]` ingress shorthand
//! - `parse_quantity`: storage size validation

pub mod endpoint;
pub mod error;
pub mod port_mapping;
pub mod quantity;
pub mod spec;

pub use endpoint::Endpoint;
pub use error::ParseError;
pub use port_mapping::{PortMapping, Protocol, parse_port_mapping};
pub use quantity::parse_quantity;
pub use spec::{
    AppSpec, ConfigMapMod, Container, IngressMod, Named, SecretMod, ServicePortMod, ServiceSpecMod,
    VolumeClaim,
};
