//! Generated objects and their YAML rendering

use k8s_openapi::Resource;
use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::api::core::v1::{ConfigMap, PersistentVolumeClaim, Secret, Service};
use k8s_openapi::api::networking::v1::Ingress;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::Serialize;

use crate::error::Result;

/// A Kubernetes object produced by the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Object {
    PersistentVolumeClaim(PersistentVolumeClaim),
    Service(Service),
    Ingress(Ingress),
    Secret(Secret),
    ConfigMap(ConfigMap),
    Deployment(Deployment),
}

impl Object {
    pub fn kind(&self) -> &'static str {
        match self {
            Object::PersistentVolumeClaim(_) => PersistentVolumeClaim::KIND,
            Object::Service(_) => Service::KIND,
            Object::Ingress(_) => Ingress::KIND,
            Object::Secret(_) => Secret::KIND,
            Object::ConfigMap(_) => ConfigMap::KIND,
            Object::Deployment(_) => Deployment::KIND,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            Object::PersistentVolumeClaim(o) => &o.metadata,
            Object::Service(o) => &o.metadata,
            Object::Ingress(o) => &o.metadata,
            Object::Secret(o) => &o.metadata,
            Object::ConfigMap(o) => &o.metadata,
            Object::Deployment(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    /// `Kind/name`, for logs
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.kind(), self.name())
    }
}

/// Everything a transformation produces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutput {
    /// Objects in apply order
    pub objects: Vec<Object>,

    /// Files of raw objects the caller loads and appends unchanged
    pub extra_resources: Vec<String>,
}

impl TransformOutput {
    /// Render the objects as a multi-document YAML stream
    pub fn to_yaml(&self) -> Result<String> {
        let mut out = String::new();
        for object in &self.objects {
            out.push_str("---\n");
            out.push_str(&serde_yaml::to_string(object)?);
        }
        Ok(out)
    }

    /// Objects of one kind, in output order
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Object> + 'a {
        self.objects.iter().filter(move |o| o.kind() == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_map(name: &str) -> Object {
        Object::ConfigMap(ConfigMap {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    #[test]
    fn test_kind_and_name() {
        let object = config_map("web");
        assert_eq!(object.kind(), "ConfigMap");
        assert_eq!(object.name(), "web");
        assert_eq!(object.display_name(), "ConfigMap/web");
    }

    #[test]
    fn test_yaml_carries_type_meta() {
        let output = TransformOutput {
            objects: vec![config_map("a"), config_map("b")],
            extra_resources: Vec::new(),
        };

        let yaml = output.to_yaml().unwrap();
        assert_eq!(yaml.matches("---\n").count(), 2);
        assert!(yaml.contains("apiVersion: v1"));
        assert!(yaml.contains("kind: ConfigMap"));

        let json = serde_json::to_value(&output.objects[1]).unwrap();
        assert_eq!(json["kind"], "ConfigMap");
        assert_eq!(json["metadata"]["name"], "b");
    }

    #[test]
    fn test_of_kind() {
        let output = TransformOutput {
            objects: vec![config_map("a"), config_map("b")],
            extra_resources: Vec::new(),
        };
        assert_eq!(output.of_kind("ConfigMap").count(), 2);
        assert_eq!(output.of_kind("Service").count(), 0);
    }
}
