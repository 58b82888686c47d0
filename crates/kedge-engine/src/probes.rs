//! `health` shortcut expansion

use kedge_core::Container;

use crate::error::{ContainerLocation, Result, TransformError};

/// Copy `health` into both the liveness and readiness probe.
///
/// Fails when `health` is combined with either discrete probe. Running it on
/// an already unified container changes nothing.
pub fn unify_probes(container: &mut Container, location: ContainerLocation) -> Result<()> {
    let kube = &mut container.container;
    if container.health.is_some()
        && (kube.liveness_probe.is_some() || kube.readiness_probe.is_some())
    {
        return Err(TransformError::ConflictingProbes { location });
    }

    if let Some(health) = container.health.take() {
        kube.liveness_probe = Some(health.clone());
        kube.readiness_probe = Some(health);
    }
    Ok(())
}
