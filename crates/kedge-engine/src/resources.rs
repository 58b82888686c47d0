//! Ingresses, secrets and config maps declared in the app

use std::collections::BTreeMap;

use k8s_openapi::api::core::v1::{ConfigMap, Secret};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kedge_core::{ConfigMapMod, IngressMod, SecretMod};

fn metadata(name: &str, labels: &BTreeMap<String, String>) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        labels: Some(labels.clone()),
        ..Default::default()
    }
}

pub(crate) fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    if items.is_empty() { None } else { Some(items) }
}

fn non_empty_map<V: Clone>(map: &BTreeMap<String, V>) -> Option<BTreeMap<String, V>> {
    if map.is_empty() { None } else { Some(map.clone()) }
}

pub fn create_ingresses(
    ingresses: &[IngressMod],
    labels: &BTreeMap<String, String>,
) -> Vec<Ingress> {
    ingresses
        .iter()
        .map(|i| Ingress {
            metadata: metadata(&i.name, labels),
            spec: Some(i.spec.clone()),
            ..Default::default()
        })
        .collect()
}

pub fn create_secrets(secrets: &[SecretMod], labels: &BTreeMap<String, String>) -> Vec<Secret> {
    secrets
        .iter()
        .map(|s| Secret {
            metadata: metadata(&s.name, labels),
            data: non_empty_map(&s.data),
            string_data: non_empty_map(&s.string_data),
            type_: s.type_.clone(),
            ..Default::default()
        })
        .collect()
}

pub fn create_config_maps(
    config_maps: &[ConfigMapMod],
    labels: &BTreeMap<String, String>,
) -> Vec<ConfigMap> {
    config_maps
        .iter()
        .map(|c| ConfigMap {
            metadata: metadata(&c.name, labels),
            data: non_empty_map(&c.data),
            ..Default::default()
        })
        .collect()
}
