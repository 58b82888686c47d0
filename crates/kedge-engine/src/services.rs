//! Service synthesis and endpoint ingresses
//!
//! A service's ports come from its structured `ports` followed by its parsed
//! `portMappings`. Every structured port carrying an `endpoint` also yields
//! an ingress named `<service>-<port>`, emitted right after its service.

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{Service, ServicePort};
use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressBackend, IngressRule,
    IngressServiceBackend, IngressSpec, ServiceBackendPort,
};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kedge_core::{Endpoint, ServiceSpecMod, parse_port_mapping};
use tracing::trace;

use crate::config::EngineConfig;
use crate::error::{Result, TransformError};
use crate::output::Object;
use crate::resources::non_empty;

/// Build every service, each followed by its endpoint ingresses.
pub fn create_services(
    services: &[ServiceSpecMod],
    labels: &BTreeMap<String, String>,
    config: &EngineConfig,
) -> Result<Vec<Object>> {
    let mut objects = Vec::with_capacity(services.len());
    for service in services {
        objects.push(Object::Service(build_service(service, labels)?));
        for ingress in endpoint_ingresses(service, labels, config)? {
            objects.push(Object::Ingress(ingress));
        }
    }
    Ok(objects)
}

fn build_service(service: &ServiceSpecMod, labels: &BTreeMap<String, String>) -> Result<Service> {
    let mut ports: Vec<ServicePort> = service.ports.iter().map(|p| p.to_service_port()).collect();

    for (index, mapping) in service.port_mappings.iter().enumerate() {
        let port = parse_port_mapping(mapping).map_err(|source| {
            TransformError::InvalidPortMapping {
                service: service.name.clone(),
                index,
                source,
            }
        })?;
        ports.push(port);
    }

    populate_port_names(&service.name, &mut ports);
    trace!("service {} has {} port(s)", service.name, ports.len());

    let mut spec = service.spec.clone();
    spec.ports = non_empty(ports);
    if spec.selector.as_ref().is_none_or(BTreeMap::is_empty) {
        spec.selector = Some(labels.clone());
    }

    Ok(Service {
        metadata: ObjectMeta {
            name: Some(service.name.clone()),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(spec),
        ..Default::default()
    })
}

/// Name unnamed ports `<service>-<port>` when a service has several ports.
pub fn populate_port_names(service_name: &str, ports: &mut [ServicePort]) {
    if ports.len() < 2 {
        return;
    }
    for port in ports.iter_mut().filter(|p| p.name.is_none()) {
        port.name = Some(format!("{}-{}", service_name, port.port));
    }
}

fn endpoint_ingresses(
    service: &ServiceSpecMod,
    labels: &BTreeMap<String, String>,
    config: &EngineConfig,
) -> Result<Vec<Ingress>> {
    let mut ingresses = Vec::new();

    for port in &service.ports {
        let Some(raw) = port.endpoint.as_deref() else {
            continue;
        };
        if raw.is_empty() {
            continue;
        }
        let endpoint: Endpoint = raw.parse().map_err(|source| TransformError::InvalidEndpoint {
            service: service.name.clone(),
            port: port.port(),
            source,
        })?;

        ingresses.push(endpoint_ingress(
            &service.name,
            port.port(),
            endpoint,
            labels,
            config,
        ));
    }

    Ok(ingresses)
}

fn endpoint_ingress(
    service_name: &str,
    port: i32,
    endpoint: Endpoint,
    labels: &BTreeMap<String, String>,
    config: &EngineConfig,
) -> Ingress {
    Ingress {
        metadata: ObjectMeta {
            name: Some(format!("{service_name}-{port}")),
            labels: Some(labels.clone()),
            ..Default::default()
        },
        spec: Some(IngressSpec {
            rules: Some(vec![IngressRule {
                host: Some(endpoint.host),
                http: Some(HTTPIngressRuleValue {
                    paths: vec![HTTPIngressPath {
                        path: Some(endpoint.path),
                        path_type: config.ingress_path_type.clone(),
                        backend: IngressBackend {
                            service: Some(IngressServiceBackend {
                                name: service_name.to_string(),
                                port: Some(ServiceBackendPort {
                                    number: Some(port),
                                    ..Default::default()
                                }),
                            }),
                            ..Default::default()
                        },
                    }],
                }),
            }]),
            ..Default::default()
        }),
        ..Default::default()
    }
}
