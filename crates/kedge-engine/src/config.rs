//! Engine configuration

use serde::{Deserialize, Serialize};

/// Knobs for object synthesis
///
/// Every field has a default, so an empty document deserializes into
/// [`EngineConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Key of the shared label used when the app sets no labels (default: `app`)
    pub app_label_key: String,

    /// Access mode for volume claims that give none (default: `ReadWriteOnce`)
    pub default_access_mode: String,

    /// Path type of endpoint ingresses (default: `ImplementationSpecific`)
    pub ingress_path_type: String,

    /// Append a Deployment for the app's containers (default: true)
    pub emit_controller: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_label_key: "app".to_string(),
            default_access_mode: "ReadWriteOnce".to_string(),
            ingress_path_type: "ImplementationSpecific".to_string(),
            emit_controller: true,
        }
    }
}
