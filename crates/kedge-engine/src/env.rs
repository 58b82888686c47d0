//! `envFrom` expansion
//!
//! Generated manifests never carry `envFrom`: every key of the referenced
//! config map or secret becomes an explicit env var that points back at its
//! source key. Keys are emitted in sorted order so output is stable.

use std::collections::HashMap;

use k8s_openapi::api::core::v1::{
    ConfigMapKeySelector, EnvFromSource, EnvVar, EnvVarSource, SecretKeySelector,
};
use kedge_core::{ConfigMapMod, Container, SecretMod};

use crate::error::{ContainerLocation, EnvSourceKind, Result, TransformError};
use crate::resources::non_empty;

/// Config maps and secrets of the app, indexed by name
pub struct EnvSources<'a> {
    config_maps: HashMap<&'a str, &'a ConfigMapMod>,
    secrets: HashMap<&'a str, &'a SecretMod>,
}

impl<'a> EnvSources<'a> {
    pub fn new(config_maps: &'a [ConfigMapMod], secrets: &'a [SecretMod]) -> Self {
        Self {
            config_maps: config_maps.iter().map(|c| (c.name.as_str(), c)).collect(),
            secrets: secrets.iter().map(|s| (s.name.as_str(), s)).collect(),
        }
    }

    /// Turn `envFrom` entries into env vars, in entry order.
    pub fn resolve(
        &self,
        env_from: &[EnvFromSource],
        location: ContainerLocation,
    ) -> Result<Vec<EnvVar>> {
        let mut envs = Vec::new();

        for (index, source) in env_from.iter().enumerate() {
            let prefix = source.prefix.as_deref().unwrap_or_default();

            if let Some(cm_ref) = &source.config_map_ref {
                let config_map = self.config_maps.get(cm_ref.name.as_str()).ok_or_else(|| {
                    TransformError::EnvSourceNotFound {
                        location,
                        index,
                        kind: EnvSourceKind::ConfigMap,
                        name: cm_ref.name.clone(),
                    }
                })?;
                // BTreeMap keys come out sorted
                envs.extend(
                    config_map
                        .data
                        .keys()
                        .map(|key| config_map_env(prefix, &config_map.name, key)),
                );
            }

            if let Some(secret_ref) = &source.secret_ref {
                let secret = self.secrets.get(secret_ref.name.as_str()).ok_or_else(|| {
                    TransformError::EnvSourceNotFound {
                        location,
                        index,
                        kind: EnvSourceKind::Secret,
                        name: secret_ref.name.clone(),
                    }
                })?;
                envs.extend(
                    secret
                        .keys()
                        .map(|key| secret_env(prefix, &secret.name, key)),
                );
            }
        }

        Ok(envs)
    }
}

fn config_map_env(prefix: &str, name: &str, key: &str) -> EnvVar {
    EnvVar {
        name: format!("{prefix}{key}"),
        value_from: Some(EnvVarSource {
            config_map_key_ref: Some(ConfigMapKeySelector {
                name: name.to_string(),
                key: key.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

fn secret_env(prefix: &str, name: &str, key: &str) -> EnvVar {
    EnvVar {
        name: format!("{prefix}{key}"),
        value_from: Some(EnvVarSource {
            secret_key_ref: Some(SecretKeySelector {
                name: name.to_string(),
                key: key.to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Replace a container's `envFrom` with explicit env vars.
///
/// Resolved vars come first, followed by the container's own `env`.
pub fn populate_env(
    container: &mut Container,
    sources: &EnvSources<'_>,
    location: ContainerLocation,
) -> Result<()> {
    let kube = &mut container.container;
    let env_from = kube.env_from.take().unwrap_or_default();
    let mut envs = sources.resolve(&env_from, location)?;
    envs.extend(kube.env.take().unwrap_or_default());
    kube.env = non_empty(envs);
    Ok(())
}
