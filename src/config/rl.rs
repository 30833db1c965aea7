use super::env::{override_parsed, EnvSource};
use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use super::validation::{ensure_positive_count, ensure_positive_f64, ensure_unit_interval};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Reinforcement learning hyperparameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RlConfig {
    /// Discount factor.
    pub gamma: f64,
    pub learning_rate: f64,
    pub buffer_size: usize,
    pub batch_size: usize,
    /// Target network soft-update rate.
    pub tau: f64,

    // PPO
    pub ppo_epochs: usize,
    pub clip_epsilon: f64,
    pub entropy_coef: f64,
}

impl Default for RlConfig {
    fn default() -> Self {
        Self {
            gamma: 0.99,
            learning_rate: 0.001,
            buffer_size: 10000,
            batch_size: 64,
            tau: 0.005,
            ppo_epochs: 10,
            clip_epsilon: 0.2,
            entropy_coef: 0.01,
        }
    }
}

impl ConfigSection for RlConfig {
    fn section_name() -> &'static str {
        "rl"
    }

    fn validate(&self) -> Result<()> {
        ensure_unit_interval("gamma", self.gamma)?;
        ensure_positive_f64("learning_rate", self.learning_rate)?;
        ensure_positive_count("buffer_size", self.buffer_size)?;
        Ok(())
    }

    fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        override_parsed(env, "RL_GAMMA", &mut self.gamma)?;
        override_parsed(env, "RL_LEARNING_RATE", &mut self.learning_rate)?;
        override_parsed(env, "RL_BUFFER_SIZE", &mut self.buffer_size)?;
        override_parsed(env, "RL_BATCH_SIZE", &mut self.batch_size)?;
        override_parsed(env, "RL_TAU", &mut self.tau)?;
        override_parsed(env, "RL_PPO_EPOCHS", &mut self.ppo_epochs)?;
        override_parsed(env, "RL_CLIP_EPSILON", &mut self.clip_epsilon)?;
        override_parsed(env, "RL_ENTROPY_COEF", &mut self.entropy_coef)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Reinforcement Learning".to_string(),
            fields: vec![
                FieldManifest::new(
                    "gamma",
                    "float",
                    json!(defaults.gamma),
                    "RL_GAMMA",
                    "Discount factor",
                )
                .bounded(Some(0.0), Some(1.0)),
                FieldManifest::new(
                    "learning_rate",
                    "float",
                    json!(defaults.learning_rate),
                    "RL_LEARNING_RATE",
                    "Optimizer step size; must be positive",
                ),
                FieldManifest::new(
                    "buffer_size",
                    "integer",
                    json!(defaults.buffer_size),
                    "RL_BUFFER_SIZE",
                    "Replay buffer capacity",
                )
                .bounded(Some(1.0), None),
                FieldManifest::new(
                    "batch_size",
                    "integer",
                    json!(defaults.batch_size),
                    "RL_BATCH_SIZE",
                    "Samples per update",
                ),
                FieldManifest::new(
                    "tau",
                    "float",
                    json!(defaults.tau),
                    "RL_TAU",
                    "Target network update rate",
                ),
                FieldManifest::new(
                    "ppo_epochs",
                    "integer",
                    json!(defaults.ppo_epochs),
                    "RL_PPO_EPOCHS",
                    "PPO optimisation epochs per rollout",
                ),
                FieldManifest::new(
                    "clip_epsilon",
                    "float",
                    json!(defaults.clip_epsilon),
                    "RL_CLIP_EPSILON",
                    "PPO ratio clipping",
                ),
                FieldManifest::new(
                    "entropy_coef",
                    "float",
                    json!(defaults.entropy_coef),
                    "RL_ENTROPY_COEF",
                    "Entropy bonus weight",
                ),
            ],
        }
    }
}
