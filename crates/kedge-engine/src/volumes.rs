//! Volume reconciliation
//!
//! Volume claims declared at the app level are mounted by name. Each mount
//! has to resolve to a pod volume; when only a claim exists, a pod volume
//! bound to that claim is synthesized.

use std::collections::HashSet;

use indexmap::IndexSet;
use k8s_openapi::api::core::v1::{Container, PersistentVolumeClaimVolumeSource, Volume};
use kedge_core::VolumeClaim;

use crate::error::{Collection, ContainerLocation, Result, TransformError};

/// Pod volumes to add for claims mounted by `containers`.
///
/// `volumes` are the pod volumes the app already declares; they are left
/// alone and win over a claim of the same name. A claim mounted by several
/// containers yields a single volume.
pub fn reconcile_volumes(
    containers: &[(Collection, &[Container])],
    claims: &[VolumeClaim],
    volumes: &[Volume],
) -> Result<Vec<Volume>> {
    let claim_names: HashSet<&str> = claims.iter().map(|c| c.name.as_str()).collect();
    let volume_names: HashSet<&str> = volumes.iter().map(|v| v.name.as_str()).collect();
    let mut claimed: IndexSet<&str> = IndexSet::new();

    for (set, list) in containers {
        for (index, container) in list.iter().enumerate() {
            let mounts = container.volume_mounts.as_deref().unwrap_or_default();
            for (mount, volume_mount) in mounts.iter().enumerate() {
                let name = volume_mount.name.as_str();
                if volume_names.contains(name) {
                    continue;
                }
                if !claim_names.contains(name) {
                    return Err(TransformError::UndefinedVolume {
                        location: ContainerLocation::new(*set, index),
                        mount,
                        name: name.to_string(),
                    });
                }
                claimed.insert(name);
            }
        }
    }

    Ok(claimed.into_iter().map(claim_volume).collect())
}

fn claim_volume(name: &str) -> Volume {
    Volume {
        name: name.to_string(),
        persistent_volume_claim: Some(PersistentVolumeClaimVolumeSource {
            claim_name: name.to_string(),
            ..Default::default()
        }),
        ..Default::default()
    }
}
