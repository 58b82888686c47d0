//! Persistent volume claim synthesis

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{PersistentVolumeClaim, VolumeResourceRequirements};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kedge_core::{VolumeClaim, parse_quantity};

use crate::config::EngineConfig;
use crate::error::{Result, TransformError};

/// Build one claim per app-level volume claim.
///
/// A claim needs exactly one of `size` or `resources.requests`. The size
/// shorthand becomes a `storage` request.
pub fn create_claims(
    claims: &[VolumeClaim],
    labels: &BTreeMap<String, String>,
    config: &EngineConfig,
) -> Result<Vec<PersistentVolumeClaim>> {
    claims
        .iter()
        .map(|claim| build_claim(claim, labels, config))
        .collect()
}

fn build_claim(
    claim: &VolumeClaim,
    labels: &BTreeMap<String, String>,
    config: &EngineConfig,
) -> Result<PersistentVolumeClaim> {
    let resources = match (&claim.size, claim.has_resource_requests()) {
        (Some(_), true) => {
            return Err(TransformError::ConflictingVolumeSize {
                name: claim.name.clone(),
            });
        }
        (None, false) => {
            return Err(TransformError::MissingVolumeSize {
                name: claim.name.clone(),
            });
        }
        (Some(size), false) => {
            let quantity =
                parse_quantity(size).map_err(|source| TransformError::InvalidVolumeSize {
                    name: claim.name.clone(),
                    source,
                })?;
            VolumeResourceRequirements {
                requests: Some(BTreeMap::from([("storage".to_string(), quantity)])),
                ..Default::default()
            }
        }
        (None, true) => claim.spec.resources.clone().unwrap_or_default(),
    };

    let mut spec = claim.spec.clone();
    spec.resources = Some(resources);
    if spec.access_modes.as_ref().is_none_or(Vec::is_empty) {
        spec.access_modes = Some(vec![config.default_access_mode.clone()]);
    }

    Ok(PersistentVolumeClaim {
        metadata: ObjectMeta {
            name: Some(claim.name.clone()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(spec),
        ..Default::default()
    })
}
