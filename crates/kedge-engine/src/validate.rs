//! Duplicate-name validation

use std::collections::HashSet;

use kedge_core::{AppSpec, Named};

use crate::error::{Collection, Result, TransformError};

/// Fail on the first name seen twice.
pub fn check_unique<'a>(
    names: impl IntoIterator<Item = &'a str>,
    collection: Collection,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(TransformError::DuplicateName {
                collection,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn names_of<T: Named>(items: &[T]) -> impl Iterator<Item = &str> {
    items.iter().map(Named::name)
}

/// Check every named list of the app.
///
/// Containers and init containers share one namespace, as they do in a pod.
pub fn validate_app(app: &AppSpec) -> Result<()> {
    check_unique(names_of(&app.volume_claims), Collection::VolumeClaims)?;
    check_unique(names_of(&app.services), Collection::Services)?;
    check_unique(names_of(&app.ingresses), Collection::Ingresses)?;
    check_unique(names_of(&app.secrets), Collection::Secrets)?;
    check_unique(names_of(&app.config_maps), Collection::ConfigMaps)?;
    check_unique(
        names_of(&app.containers).chain(names_of(&app.init_containers)),
        Collection::Containers,
    )?;
    Ok(())
}
