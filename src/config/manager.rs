use super::{
    env::{load_dotenv, override_parsed, EnvSource, ProcessEnv},
    firebase::FirebaseConfig,
    neuroevolution::NeuroevolutionConfig,
    rl::RlConfig,
    trading::{TradingConfig, TradingMode, TRADING_MODE_VAR},
    traits::{ConfigManifest, ConfigSection},
};
use crate::error::{ArlNetError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub mode: TradingMode,
    pub firebase: FirebaseConfig,
    pub trading: TradingConfig,
    pub rl: RlConfig,
    pub neuroevolution: NeuroevolutionConfig,
}

impl AppConfig {
    /// Defaults overlaid with `env`. Not validated.
    pub fn from_env_source(env: &dyn EnvSource) -> Result<Self> {
        let mut config = Self::default();
        config.apply_env(env)?;
        Ok(config)
    }

    pub fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        override_parsed(env, TRADING_MODE_VAR, &mut self.mode)?;
        self.firebase.apply_env(env)?;
        self.trading.apply_env(env)?;
        self.rl.apply_env(env)?;
        self.neuroevolution.apply_env(env)?;
        Ok(())
    }

    /// Validates every section in order and stops at the first failure.
    pub fn validate(&self) -> Result<()> {
        self.firebase.validate()?;
        self.trading.validate()?;
        self.rl.validate()?;
        self.neuroevolution.validate()?;
        Ok(())
    }

    pub fn manifests(&self) -> Vec<ConfigManifest> {
        vec![
            self.firebase.to_manifest(),
            self.trading.to_manifest(),
            self.rl.to_manifest(),
            self.neuroevolution.to_manifest(),
        ]
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| ArlNetError::Configuration(format!("Failed to parse config: {}", e)))
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ArlNetError::Configuration(format!("Failed to serialize: {}", e)))
    }
}

/// Owns the process-wide configuration.
///
/// Every path that replaces the config validates first; a failed load or
/// update leaves the previous config in place.
pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    fn with_config(config: AppConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// `.env`, then the process environment over the defaults, then validate.
    pub fn load() -> Result<Self> {
        load_dotenv()?;
        Self::from_env_source(&ProcessEnv)
    }

    pub fn from_env_source(env: &dyn EnvSource) -> Result<Self> {
        let config = AppConfig::from_env_source(env)?;
        config.validate()?;
        log::info!(
            "Configuration loaded from environment (mode: {}, project: {})",
            config.mode,
            config.firebase.project_id
        );
        Ok(Self::with_config(config))
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.load_from_file_with_env(path, &ProcessEnv)
    }

    /// File values over defaults, `env` over the file, then validate.
    pub fn load_from_file_with_env<P: AsRef<Path>>(
        &self,
        path: P,
        env: &dyn EnvSource,
    ) -> Result<()> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;

        let mut config = AppConfig::from_toml_str(&contents)?;
        config.apply_env(env)?;

        if let Err(e) = config.validate() {
            log::warn!("Rejected config from {}: {}", path.display(), e);
            return Err(e);
        }

        *self.write_lock()? = config;
        log::info!("Configuration loaded from {}", path.display());
        Ok(())
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_str = self.read_lock()?.to_toml_string()?;

        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn get(&self) -> Result<AppConfig> {
        Ok(self.read_lock()?.clone())
    }

    /// Applies `f` to a copy and swaps it in only if the result validates.
    pub fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut config = self.write_lock()?;
        let mut candidate = config.clone();
        f(&mut candidate);
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected config update: {}", e);
            return Err(e);
        }
        *config = candidate;
        Ok(())
    }

    fn read_lock(&self) -> Result<std::sync::RwLockReadGuard<'_, AppConfig>> {
        self.config
            .read()
            .map_err(|_| ArlNetError::Configuration("Config lock poisoned".to_string()))
    }

    fn write_lock(&self) -> Result<std::sync::RwLockWriteGuard<'_, AppConfig>> {
        self.config
            .write()
            .map_err(|_| ArlNetError::Configuration("Config lock poisoned".to_string()))
    }
}
