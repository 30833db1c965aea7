pub mod traits;
pub mod env;
pub mod validation;
pub mod firebase;
pub mod trading;
pub mod rl;
pub mod neuroevolution;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use env::{EnvSource, ProcessEnv};
pub use traits::{ConfigSection, ConfigManifest, FieldManifest};
pub use firebase::FirebaseConfig;
pub use trading::{TradingConfig, TradingMode};
pub use rl::RlConfig;
pub use neuroevolution::{EvolutionStrategy, NeuroevolutionConfig};
