use super::env::{override_path, override_string, EnvSource};
use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use super::validation::{ensure_not_empty, ensure_path_exists};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::path::PathBuf;

pub const PROJECT_ID_VAR: &str = "FIREBASE_PROJECT_ID";
pub const CREDENTIAL_PATH_VAR: &str = "FIREBASE_CREDENTIAL_PATH";
pub const DATABASE_URL_VAR: &str = "FIREBASE_DATABASE_URL";
pub const COLLECTION_PREFIX_VAR: &str = "FIREBASE_COLLECTION_PREFIX";

const DEFAULT_PROJECT_ID: &str = "arl-net-default";
const DEFAULT_CREDENTIAL_PATH: &str = "./config/firebase_credentials.json";
const DEFAULT_COLLECTION_PREFIX: &str = "arl_net_";

/// Firebase connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub credential_path: PathBuf,
    /// Empty means the project's default database.
    pub database_url: String,
    pub collection_prefix: String,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            credential_path: PathBuf::from(DEFAULT_CREDENTIAL_PATH),
            database_url: String::new(),
            collection_prefix: DEFAULT_COLLECTION_PREFIX.to_string(),
        }
    }
}

impl FirebaseConfig {
    /// Fully qualified collection name, e.g. `arl_net_genomes`.
    pub fn collection_name(&self, name: &str) -> String {
        format!("{}{}", self.collection_prefix, name)
    }
}

impl ConfigSection for FirebaseConfig {
    fn section_name() -> &'static str {
        "firebase"
    }

    fn validate(&self) -> Result<()> {
        ensure_not_empty("project_id", &self.project_id)?;
        ensure_path_exists(&self.credential_path)?;
        Ok(())
    }

    fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        override_string(env, PROJECT_ID_VAR, &mut self.project_id);
        override_path(env, CREDENTIAL_PATH_VAR, &mut self.credential_path);
        override_string(env, DATABASE_URL_VAR, &mut self.database_url);
        override_string(env, COLLECTION_PREFIX_VAR, &mut self.collection_prefix);
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        ConfigManifest {
            section: "Firebase".to_string(),
            fields: vec![
                FieldManifest::new(
                    "project_id",
                    "string",
                    json!(DEFAULT_PROJECT_ID),
                    PROJECT_ID_VAR,
                    "Firebase project identifier",
                ),
                FieldManifest::new(
                    "credential_path",
                    "path",
                    json!(DEFAULT_CREDENTIAL_PATH),
                    CREDENTIAL_PATH_VAR,
                    "Service account JSON; must exist",
                ),
                FieldManifest::new(
                    "database_url",
                    "string",
                    json!(""),
                    DATABASE_URL_VAR,
                    "Realtime database URL",
                ),
                FieldManifest::new(
                    "collection_prefix",
                    "string",
                    json!(DEFAULT_COLLECTION_PREFIX),
                    COLLECTION_PREFIX_VAR,
                    "Prefix prepended to every collection name",
                ),
            ],
        }
    }
}
