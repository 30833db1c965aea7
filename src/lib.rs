//! Validated startup configuration for ARL-Net: Firebase connection, trading
//! parameters, reinforcement learning and neuroevolution hyperparameters.
//!
//! Each group is read from the environment over literal defaults, validated
//! once, and then treated as read-only.

pub mod config;
pub mod error;

pub use config::{AppConfig, ConfigManager, ConfigSection};
pub use error::{ArlNetError, Result};
