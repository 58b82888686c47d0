//! Transformation error types

use std::fmt;

use kedge_core::ParseError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type for the transformation engine
pub type Result<T> = std::result::Result<T, TransformError>;

/// A named list in the app spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Containers,
    InitContainers,
    Services,
    Ingresses,
    VolumeClaims,
    ConfigMaps,
    Secrets,
}

impl Collection {
    /// Field name as written in the app spec
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Containers => "containers",
            Collection::InitContainers => "initContainers",
            Collection::Services => "services",
            Collection::Ingresses => "ingresses",
            Collection::VolumeClaims => "volumeClaims",
            Collection::ConfigMaps => "configMaps",
            Collection::Secrets => "secrets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Position of a container in the app spec, e.g. `app.initContainers[1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerLocation {
    pub set: Collection,
    pub index: usize,
}

impl ContainerLocation {
    pub fn new(set: Collection, index: usize) -> Self {
        Self { set, index }
    }
}

impl fmt::Display for ContainerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "app.{}[{}]", self.set, self.index)
    }
}

/// Which kind of object an `envFrom` entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvSourceKind {
    ConfigMap,
    Secret,
}

impl fmt::Display for EnvSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvSourceKind::ConfigMap => f.write_str("configMap"),
            EnvSourceKind::Secret => f.write_str("secret"),
        }
    }
}

/// Errors that abort a transformation
///
/// Every variant carries enough position information to find the offending
/// entry in the app spec.
#[derive(Error, Debug, Diagnostic)]
#[non_exhaustive]
pub enum TransformError {
    #[error("name not specified for app.{collection}[{index}]")]
    #[diagnostic(
        code(kedge::name::missing),
        help("a name can only be omitted when the list has exactly one entry")
    )]
    MissingName { collection: Collection, index: usize },

    #[error("duplicate entry of {collection} name '{name}'")]
    #[diagnostic(code(kedge::name::duplicate))]
    DuplicateName { collection: Collection, name: String },

    #[error("cannot define field 'health' and 'livenessProbe' or 'readinessProbe' together, {location}")]
    #[diagnostic(
        code(kedge::container::probes),
        help("use either 'health' or the separate probe fields")
    )]
    ConflictingProbes { location: ContainerLocation },

    #[error("{location}.envFrom[{index}]: {kind} '{name}' not found")]
    #[diagnostic(code(kedge::container::env_from))]
    EnvSourceNotFound {
        location: ContainerLocation,
        index: usize,
        kind: EnvSourceKind,
        name: String,
    },

    #[error(
        "neither volume claim nor pod volume defined for '{name}', in {location}.volumeMounts[{mount}]"
    )]
    #[diagnostic(
        code(kedge::volume::undefined),
        help("add a volumeClaims entry or a pod-level volume with this name")
    )]
    UndefinedVolume {
        location: ContainerLocation,
        mount: usize,
        name: String,
    },

    #[error("volume claim '{name}': cannot provide size and resources at the same time")]
    #[diagnostic(code(kedge::volume::conflict))]
    ConflictingVolumeSize { name: String },

    #[error("volume claim '{name}': please provide size or resources, none given")]
    #[diagnostic(code(kedge::volume::size))]
    MissingVolumeSize { name: String },

    #[error("volume claim '{name}': could not read volume size")]
    #[diagnostic(code(kedge::volume::size))]
    InvalidVolumeSize {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("service '{service}': unable to parse portMappings[{index}]")]
    #[diagnostic(code(kedge::service::port_mapping))]
    InvalidPortMapping {
        service: String,
        index: usize,
        #[source]
        source: ParseError,
    },

    #[error("service '{service}': unable to parse endpoint of port {port}")]
    #[diagnostic(code(kedge::service::endpoint))]
    InvalidEndpoint {
        service: String,
        port: i32,
        #[source]
        source: ParseError,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
