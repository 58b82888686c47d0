//! Name defaulting
//!
//! A lone service, volume claim, config map, secret or container may omit
//! its name and inherits the app name. As soon as a list holds two or more
//! entries, every entry must be named.

use kedge_core::{AppSpec, Named};

use crate::error::{Collection, Result, TransformError};

/// Fill in the app name for unnamed singletons.
pub fn default_names<T: Named>(
    items: &mut [T],
    app_name: &str,
    collection: Collection,
) -> Result<()> {
    if let [only] = items {
        if only.name().is_empty() {
            only.set_name(app_name.to_string());
        }
        return Ok(());
    }
    require_names(items, collection)
}

/// Fail on the first unnamed entry.
pub fn require_names<T: Named>(items: &[T], collection: Collection) -> Result<()> {
    match items.iter().position(|item| item.name().is_empty()) {
        Some(index) => Err(TransformError::MissingName { collection, index }),
        None => Ok(()),
    }
}

/// Apply name defaulting to every collection of the app.
///
/// Ingresses and init containers are never defaulted and always need a name.
pub fn populate_names(app: &mut AppSpec) -> Result<()> {
    let name = app.name.as_str();
    default_names(&mut app.services, name, Collection::Services)?;
    default_names(&mut app.volume_claims, name, Collection::VolumeClaims)?;
    default_names(&mut app.config_maps, name, Collection::ConfigMaps)?;
    default_names(&mut app.secrets, name, Collection::Secrets)?;
    default_names(&mut app.containers, name, Collection::Containers)?;
    require_names(&app.init_containers, Collection::InitContainers)?;
    require_names(&app.ingresses, Collection::Ingresses)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kedge_core::{ConfigMapMod, Container, ServiceSpecMod, VolumeClaim};

    fn claim(name: &str) -> VolumeClaim {
        VolumeClaim {
            name: name.to_string(),
            ..Default::default()
        }
    }

    fn named_container(name: &str) -> Container {
        let mut container = Container::default();
        container.set_name(name.to_string());
        container
    }

    #[test]
    fn test_singleton_gets_app_name() {
        let mut claims = vec![claim("")];
        default_names(&mut claims, "web", Collection::VolumeClaims).unwrap();
        assert_eq!(claims[0].name, "web");
    }

    #[test]
    fn test_named_singleton_untouched() {
        let mut claims = vec![claim("data")];
        default_names(&mut claims, "web", Collection::VolumeClaims).unwrap();
        assert_eq!(claims[0].name, "data");
    }

    #[test]
    fn test_unnamed_among_many_fails_with_index() {
        let mut claims = vec![claim("data"), claim("logs"), claim("")];
        let err = default_names(&mut claims, "web", Collection::VolumeClaims).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingName {
                collection: Collection::VolumeClaims,
                index: 2
            }
        ));
        // nothing was renamed
        assert_eq!(claims[2].name, "");
    }

    #[test]
    fn test_empty_list_is_fine() {
        let mut claims: Vec<VolumeClaim> = Vec::new();
        default_names(&mut claims, "web", Collection::VolumeClaims).unwrap();
    }

    #[test]
    fn test_populate_names_every_singleton() {
        let mut app = AppSpec {
            name: "web".to_string(),
            containers: vec![Container::default()],
            services: vec![ServiceSpecMod::default()],
            volume_claims: vec![claim("")],
            config_maps: vec![ConfigMapMod::default()],
            secrets: vec![Default::default()],
            ..Default::default()
        };

        populate_names(&mut app).unwrap();

        assert_eq!(app.containers[0].name(), "web");
        assert_eq!(app.services[0].name, "web");
        assert_eq!(app.volume_claims[0].name, "web");
        assert_eq!(app.config_maps[0].name, "web");
        assert_eq!(app.secrets[0].name, "web");
    }

    #[test]
    fn test_populate_names_reports_collection() {
        let mut app = AppSpec {
            name: "web".to_string(),
            containers: vec![
                named_container("app"),
                Container::default(),
            ],
            ..Default::default()
        };

        let err = populate_names(&mut app).unwrap_err();
        insta::assert_snapshot!(err.to_string(), @"name not specified for app.containers[1]");
    }

    #[test]
    fn test_init_containers_always_need_a_name() {
        let mut app = AppSpec {
            name: "web".to_string(),
            init_containers: vec![Container::default()],
            ..Default::default()
        };

        let err = populate_names(&mut app).unwrap_err();
        assert!(matches!(
            err,
            TransformError::MissingName {
                collection: Collection::InitContainers,
                index: 0
            }
        ));
    }
}
