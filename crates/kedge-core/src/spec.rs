//! Application spec definition
//!
//! An [`AppSpec`] is the simplified, user-authored description of one
//! application. Each shortcut type embeds the full `k8s-openapi` structure
//! it extends (container, service spec, ingress spec, claim spec, pod spec)
//! through `#[serde(flatten)]`, so any upstream field written in the app
//! reaches the generated objects untouched. Only the shortcut fields are
//! declared here.
//!
//! Names are plain strings; an empty name means "not given" and is filled in
//! by the engine when the collection holds a single element.

use std::collections::{BTreeMap, BTreeSet};

use k8s_openapi::ByteString;
use k8s_openapi::api::core::v1::{
    Container as KubeContainer, PersistentVolumeClaimSpec, PodSpec, Probe, ServicePort,
    ServiceSpec,
};
use k8s_openapi::api::networking::v1::IngressSpec;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use serde::{Deserialize, Serialize};

use crate::port_mapping::Protocol;

/// Something in the spec that is identified by name within its list
pub trait Named {
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);
}

macro_rules! impl_named {
    ($($ty:ty => $($field:ident).+);* $(;)?) => {
        $(
            impl Named for $ty {
                fn name(&self) -> &str {
                    &self.$($field).+
                }

                fn set_name(&mut self, name: String) {
                    self.$($field).+ = name;
                }
            }
        )*
    };
}

impl_named! {
    Container => container.name;
    ServiceSpecMod => name;
    IngressMod => name;
    VolumeClaim => name;
    ConfigMapMod => name;
    SecretMod => name;
}

/// Top-level application description
///
/// Pod-level settings (`volumes`, `serviceAccountName`, `tolerations`,
/// `affinity`...) are written inline and land in [`AppSpec::pod`]. The
/// containers of the pod are taken from `containers` and `initContainers`
/// after expansion, never from `pod`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSpec {
    /// Application name, used as the default for unnamed singletons
    pub name: String,

    /// Labels shared by every generated object
    ///
    /// Left out, they default to `app: <name>`. An explicit map, even an
    /// empty one, is used as given.
    #[serde(default)]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default)]
    pub replicas: Option<i32>,

    #[serde(default)]
    pub containers: Vec<Container>,

    #[serde(default)]
    pub init_containers: Vec<Container>,

    #[serde(default)]
    pub services: Vec<ServiceSpecMod>,

    #[serde(default)]
    pub ingresses: Vec<IngressMod>,

    #[serde(default)]
    pub volume_claims: Vec<VolumeClaim>,

    #[serde(default)]
    pub config_maps: Vec<ConfigMapMod>,

    #[serde(default)]
    pub secrets: Vec<SecretMod>,

    /// Files holding raw Kubernetes objects, loaded by the caller
    #[serde(default)]
    pub extra_resources: Vec<String>,

    #[serde(flatten)]
    pub pod: PodSpec,
}

/// A container, with the `health` shortcut
///
/// `envFrom` is the upstream field; the engine replaces it with explicit
/// env vars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Used as both liveness and readiness probe
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health: Option<Probe>,

    #[serde(flatten)]
    pub container: KubeContainer,
}

impl Container {
    /// The Kubernetes container, without the `health` shortcut
    pub fn into_kube(self) -> KubeContainer {
        self.container
    }
}

/// A service with port-mapping and endpoint shortcuts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceSpecMod {
    #[serde(default)]
    pub name: String,

    /// Structured ports; they shadow the upstream `ports` field
    #[serde(default)]
    pub ports: Vec<ServicePortMod>,

    /// `port[:targetPort][/protocol]` strings
    #[serde(default)]
    pub port_mappings: Vec<String>,

    /// Everything else of the service spec; an empty `selector` is replaced
    /// by the shared labels
    #[serde(flatten)]
    pub spec: ServiceSpec,
}

/// A service port that may expose itself through an endpoint ingress
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePortMod {
    /// `host` or `host/path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(flatten)]
    pub service_port: ServicePort,
}

impl ServicePortMod {
    pub fn port(&self) -> i32 {
        self.service_port.port
    }

    /// Kubernetes service port, with target port and protocol defaulted
    pub fn to_service_port(&self) -> ServicePort {
        let mut port = self.service_port.clone();
        port.target_port.get_or_insert(IntOrString::Int(port.port));
        port.protocol.get_or_insert_with(|| Protocol::Tcp.to_string());
        port
    }
}

/// An ingress declared directly in the app
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressMod {
    #[serde(default)]
    pub name: String,

    #[serde(flatten)]
    pub spec: IngressSpec,
}

/// A persistent volume claim, sized either by shorthand or by resources
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeClaim {
    #[serde(default)]
    pub name: String,

    /// Storage request shorthand, e.g. `1Gi`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,

    /// Access modes default to `ReadWriteOnce` when empty
    #[serde(flatten)]
    pub spec: PersistentVolumeClaimSpec,
}

impl VolumeClaim {
    /// Whether explicit resource requests were given
    pub fn has_resource_requests(&self) -> bool {
        self.spec
            .resources
            .as_ref()
            .is_some_and(|r| r.requests.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigMapMod {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretMod {
    #[serde(default)]
    pub name: String,

    /// Base64-encoded values
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, ByteString>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub string_data: BTreeMap<String, String>,

    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,
}

impl SecretMod {
    /// Every key of `data` and `stringData`, sorted and without repeats
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let keys: BTreeSet<&str> = self
            .data
            .keys()
            .chain(self.string_data.keys())
            .map(String::as_str)
            .collect();
        keys.into_iter()
    }
}
