//! `.frontforge/config.json`, the per-project settings file.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::BackendFlavor;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectConfig {
    #[serde(default = "default_backend_type")]
    pub backend_type: String,
}

fn default_backend_type() -> String {
    BackendFlavor::None.as_str().to_string()
}

impl ProjectConfig {
    pub fn new(flavor: &BackendFlavor) -> Self {
        Self {
            backend_type: flavor.as_str().to_string(),
        }
    }

    pub fn backend(&self) -> BackendFlavor {
        BackendFlavor::from(self.backend_type.as_str())
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            backend_type: default_backend_type(),
        }
    }
}
