//! YAML helpers for reports and configuration.

use crate::common::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Reports that can be rendered as YAML for a transport layer.
pub trait ToYaml: Serialize {
    /// Serialize this report to a YAML document.
    fn to_yaml(&self) -> Result<String>
    where
        Self: Sized,
    {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Other(format!("Failed to serialize report to YAML: {}", e)))
    }
}

/// Deserialize a configuration value from YAML text.
pub(crate) fn from_yaml_str<T: DeserializeOwned>(text: &str) -> Result<T> {
    serde_saphyr::from_str(text).map_err(|e| Error::Config(e.to_string()))
}
