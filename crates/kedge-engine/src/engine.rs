//! The transformation pipeline
//!
//! Stages run in a fixed order and the first failure aborts the whole
//! transformation:
//! 1. name defaulting and duplicate-name validation
//! 2. per-container expansion (`health` probes, then `envFrom`)
//! 3. volume reconciliation against the expanded containers
//! 4. object synthesis

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Container as KubeContainer, PodSpec};
use kedge_core::{AppSpec, Container};
use tracing::{debug, trace};

use crate::claims::create_claims;
use crate::config::EngineConfig;
use crate::controller::create_deployment;
use crate::env::{EnvSources, populate_env};
use crate::error::{Collection, ContainerLocation, Result};
use crate::names::populate_names;
use crate::output::{Object, TransformOutput};
use crate::probes::unify_probes;
use crate::resources::{create_config_maps, create_ingresses, create_secrets, non_empty};
use crate::services::create_services;
use crate::validate::{check_unique, validate_app};
use crate::volumes::reconcile_volumes;

/// Expands app specs into Kubernetes objects
///
/// The engine keeps no state between calls; one instance can be shared and
/// used for any number of apps.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Labels every generated object carries
    ///
    /// The app's own labels when it sets the field, `{<appLabelKey>: <name>}`
    /// when it leaves it out.
    pub fn shared_labels(&self, app: &AppSpec) -> BTreeMap<String, String> {
        match &app.labels {
            Some(labels) => labels.clone(),
            None => BTreeMap::from([(self.config.app_label_key.clone(), app.name.clone())]),
        }
    }

    /// Transform one app.
    ///
    /// Objects come out as: volume claims, services (each followed by its
    /// endpoint ingresses), declared ingresses, secrets, config maps and,
    /// when enabled, the Deployment.
    pub fn transform(&self, mut app: AppSpec) -> Result<TransformOutput> {
        populate_names(&mut app)?;
        validate_app(&app)?;
        let labels = self.shared_labels(&app);

        let sources = EnvSources::new(&app.config_maps, &app.secrets);
        let containers = expand_containers(
            std::mem::take(&mut app.containers),
            Collection::Containers,
            &sources,
        )?;
        let init_containers = expand_containers(
            std::mem::take(&mut app.init_containers),
            Collection::InitContainers,
            &sources,
        )?;
        debug!(
            "app {}: expanded {} container(s) and {} init container(s)",
            app.name,
            containers.len(),
            init_containers.len()
        );

        let claim_volumes = reconcile_volumes(
            &[
                (Collection::Containers, &containers[..]),
                (Collection::InitContainers, &init_containers[..]),
            ],
            &app.volume_claims,
            app.pod.volumes.as_deref().unwrap_or_default(),
        )?;
        debug!(
            "app {}: added {} volume(s) for claims",
            app.name,
            claim_volumes.len()
        );

        // keep this order, downstream diffing and apply rely on it
        let mut objects = Vec::new();
        objects.extend(
            create_claims(&app.volume_claims, &labels, &self.config)?
                .into_iter()
                .map(Object::PersistentVolumeClaim),
        );
        objects.extend(create_services(&app.services, &labels, &self.config)?);
        objects.extend(
            create_ingresses(&app.ingresses, &labels)
                .into_iter()
                .map(Object::Ingress),
        );
        objects.extend(
            create_secrets(&app.secrets, &labels)
                .into_iter()
                .map(Object::Secret),
        );
        objects.extend(
            create_config_maps(&app.config_maps, &labels)
                .into_iter()
                .map(Object::ConfigMap),
        );

        // endpoint ingresses share a namespace with the declared ones
        check_unique(
            objects
                .iter()
                .filter(|o| matches!(o, Object::Ingress(_)))
                .map(Object::name),
            Collection::Ingresses,
        )?;

        if self.config.emit_controller {
            let mut volumes = app.pod.volumes.take().unwrap_or_default();
            volumes.extend(claim_volumes);
            let pod_spec = PodSpec {
                containers,
                init_containers: non_empty(init_containers),
                volumes: non_empty(volumes),
                ..std::mem::take(&mut app.pod)
            };
            objects.push(Object::Deployment(create_deployment(
                &app.name,
                app.replicas,
                &labels,
                pod_spec,
            )));
        }

        for object in &objects {
            trace!("app {}: generated {}", app.name, object.display_name());
        }
        debug!("app {}: generated {} object(s)", app.name, objects.len());

        Ok(TransformOutput {
            objects,
            extra_resources: app.extra_resources,
        })
    }
}

/// Unify probes and resolve `envFrom` for each container, in order.
fn expand_containers(
    containers: Vec<Container>,
    set: Collection,
    sources: &EnvSources<'_>,
) -> Result<Vec<KubeContainer>> {
    containers
        .into_iter()
        .enumerate()
        .map(|(index, mut container)| -> Result<KubeContainer> {
            let location = ContainerLocation::new(set, index);
            unify_probes(&mut container, location)?;
            populate_env(&mut container, sources, location)?;
            Ok(container.into_kube())
        })
        .collect()
}

/// Transform an app with the default configuration.
pub fn transform(app: AppSpec) -> Result<TransformOutput> {
    Engine::default().transform(app)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransformError;
    use k8s_openapi::api::core::v1::{ServicePort, Toleration};
    use kedge_core::{ConfigMapMod, ServicePortMod, ServiceSpecMod, VolumeClaim};

    fn app() -> AppSpec {
        AppSpec {
            name: "web".to_string(),
            containers: vec![Container {
                container: KubeContainer {
                    image: Some("nginx".to_string()),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_default_labels() {
        let engine = Engine::default();
        let mut app = app();
        assert_eq!(
            engine.shared_labels(&app),
            BTreeMap::from([("app".to_string(), "web".to_string())])
        );

        app.labels = Some(BTreeMap::new());
        assert!(engine.shared_labels(&app).is_empty());

        app.labels = Some(BTreeMap::from([("team".to_string(), "core".to_string())]));
        assert_eq!(
            engine.shared_labels(&app),
            BTreeMap::from([("team".to_string(), "core".to_string())])
        );
    }

    #[test]
    fn test_configured_label_key() {
        let engine = Engine::new(EngineConfig {
            app_label_key: "app.kubernetes.io/name".to_string(),
            ..Default::default()
        });
        let labels = engine.shared_labels(&app());
        assert_eq!(
            labels.get("app.kubernetes.io/name").map(String::as_str),
            Some("web")
        );
    }

    #[test]
    fn test_minimal_app_yields_deployment() {
        let output = transform(app()).unwrap();
        assert_eq!(output.objects.len(), 1);

        let Object::Deployment(deployment) = &output.objects[0] else {
            panic!("expected deployment");
        };
        let pod = deployment
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .unwrap();
        assert_eq!(pod.containers[0].name, "web");
        assert!(pod.volumes.is_none());
    }

    #[test]
    fn test_pod_fields_reach_deployment() {
        let mut app = app();
        app.pod.host_network = Some(true);
        app.pod.service_account_name = Some("web-sa".to_string());
        app.pod.tolerations = Some(vec![Toleration {
            key: Some("dedicated".to_string()),
            operator: Some("Exists".to_string()),
            ..Default::default()
        }]);

        let output = transform(app).unwrap();
        let Some(Object::Deployment(deployment)) = output.objects.last() else {
            panic!("expected deployment");
        };
        let pod = deployment
            .spec
            .as_ref()
            .and_then(|s| s.template.spec.as_ref())
            .unwrap();
        assert_eq!(pod.host_network, Some(true));
        assert_eq!(pod.service_account_name.as_deref(), Some("web-sa"));
        assert_eq!(pod.tolerations.as_ref().map(Vec::len), Some(1));
        assert_eq!(pod.containers[0].image.as_deref(), Some("nginx"));
    }

    #[test]
    fn test_controller_can_be_disabled() {
        let engine = Engine::new(EngineConfig {
            emit_controller: false,
            ..Default::default()
        });
        let output = engine.transform(app()).unwrap();
        assert!(output.objects.is_empty());
    }

    #[test]
    fn test_object_order() {
        let mut app = app();
        app.volume_claims = vec![VolumeClaim {
            size: Some("1Gi".to_string()),
            ..Default::default()
        }];
        app.services = vec![ServiceSpecMod {
            ports: vec![ServicePortMod {
                endpoint: Some("example.com".to_string()),
                service_port: ServicePort {
                    port: 80,
                    ..Default::default()
                },
            }],
            ..Default::default()
        }];
        app.config_maps = vec![ConfigMapMod::default()];

        let output = transform(app).unwrap();
        let names: Vec<String> = output.objects.iter().map(Object::display_name).collect();
        assert_eq!(
            names,
            vec![
                "PersistentVolumeClaim/web",
                "Service/web",
                "Ingress/web-80",
                "ConfigMap/web",
                "Deployment/web",
            ]
        );
    }

    #[test]
    fn test_endpoint_ingress_clashing_with_declared() {
        let mut app = app();
        app.services = vec![ServiceSpecMod {
            ports: vec![ServicePortMod {
                endpoint: Some("example.com".to_string()),
                service_port: ServicePort {
                    port: 80,
                    ..Default::default()
                },
            }],
            ..Default::default()
        }];
        app.ingresses = vec![kedge_core::IngressMod {
            name: "web-80".to_string(),
            ..Default::default()
        }];

        let err = transform(app).unwrap_err();
        assert!(matches!(
            err,
            TransformError::DuplicateName { collection: Collection::Ingresses, ref name } if name == "web-80"
        ));
    }

    #[test]
    fn test_probe_error_stops_pipeline() {
        let mut app = app();
        app.containers[0].health = Some(Default::default());
        app.containers[0].container.readiness_probe = Some(Default::default());

        let err = transform(app).unwrap_err();
        assert!(matches!(
            err,
            TransformError::ConflictingProbes {
                location: ContainerLocation {
                    set: Collection::Containers,
                    index: 0
                }
            }
        ));
    }
}
