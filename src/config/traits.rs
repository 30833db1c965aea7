use super::env::{EnvSource, ProcessEnv};
use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + DeserializeOwned + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<()>;

    /// Overwrite fields whose environment variable is set.
    fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()>;

    fn to_manifest(&self) -> ConfigManifest;

    /// Defaults with `env` applied on top. Not validated.
    fn from_env_source(env: &dyn EnvSource) -> Result<Self> {
        let mut section = Self::default();
        section.apply_env(env)?;
        Ok(section)
    }

    fn from_env() -> Result<Self> {
        Self::from_env_source(&ProcessEnv)
    }
}

/// Describes every field of a section: type, default, bounds and the
/// environment variable that overrides it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigManifest {
    pub section: String,
    pub fields: Vec<FieldManifest>,
}

impl ConfigManifest {
    pub fn field(&self, name: &str) -> Option<&FieldManifest> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldManifest {
    pub name: String,
    pub field_type: String,
    pub default: serde_json::Value,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub env_var: Option<String>,
    pub description: String,
}

impl FieldManifest {
    pub fn new(
        name: &str,
        field_type: &str,
        default: serde_json::Value,
        env_var: &str,
        description: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            field_type: field_type.to_string(),
            default,
            min: None,
            max: None,
            env_var: Some(env_var.to_string()),
            description: description.to_string(),
        }
    }

    pub fn bounded(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}
