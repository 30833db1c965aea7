use super::env::{override_parsed, EnvSource};
use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use super::validation::{ensure_non_negative, ensure_positive_f64, ensure_unit_interval};
use crate::error::{ArlNetError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

pub const TRADING_MODE_VAR: &str = "ARL_TRADING_MODE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingMode {
    #[default]
    Backtest,
    Paper,
    Live,
}

impl TradingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradingMode::Backtest => "backtest",
            TradingMode::Paper => "paper",
            TradingMode::Live => "live",
        }
    }

    /// Only live mode places real orders.
    pub fn is_live(&self) -> bool {
        matches!(self, TradingMode::Live)
    }
}

impl fmt::Display for TradingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradingMode {
    type Err = ArlNetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "backtest" => Ok(TradingMode::Backtest),
            "paper" => Ok(TradingMode::Paper),
            "live" => Ok(TradingMode::Live),
            other => Err(ArlNetError::Configuration(format!(
                "Unknown trading mode '{}' (expected backtest, paper or live)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    pub initial_balance: f64,
    /// Fraction of the portfolio a single position may take.
    pub max_position_size: f64,
    /// Fraction charged per trade.
    pub transaction_cost: f64,
    /// Annualised.
    pub risk_free_rate: f64,

    // Risk management
    pub max_drawdown: f64,
    pub stop_loss_pct: f64,
    pub take_profit_pct: f64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            initial_balance: 10000.0,
            max_position_size: 0.1,
            transaction_cost: 0.001,
            risk_free_rate: 0.02,
            max_drawdown: 0.20,
            stop_loss_pct: 0.05,
            take_profit_pct: 0.10,
        }
    }
}

impl ConfigSection for TradingConfig {
    fn section_name() -> &'static str {
        "trading"
    }

    fn validate(&self) -> Result<()> {
        ensure_positive_f64("initial_balance", self.initial_balance)?;
        ensure_unit_interval("max_position_size", self.max_position_size)?;
        ensure_non_negative("transaction_cost", self.transaction_cost)?;
        Ok(())
    }

    fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        override_parsed(env, "TRADING_INITIAL_BALANCE", &mut self.initial_balance)?;
        override_parsed(env, "TRADING_MAX_POSITION_SIZE", &mut self.max_position_size)?;
        override_parsed(env, "TRADING_TRANSACTION_COST", &mut self.transaction_cost)?;
        override_parsed(env, "TRADING_RISK_FREE_RATE", &mut self.risk_free_rate)?;
        override_parsed(env, "TRADING_MAX_DRAWDOWN", &mut self.max_drawdown)?;
        override_parsed(env, "TRADING_STOP_LOSS_PCT", &mut self.stop_loss_pct)?;
        override_parsed(env, "TRADING_TAKE_PROFIT_PCT", &mut self.take_profit_pct)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let defaults = Self::default();
        ConfigManifest {
            section: "Trading".to_string(),
            fields: vec![
                FieldManifest::new(
                    "initial_balance",
                    "float",
                    json!(defaults.initial_balance),
                    "TRADING_INITIAL_BALANCE",
                    "Starting account balance; must be positive",
                ),
                FieldManifest::new(
                    "max_position_size",
                    "float",
                    json!(defaults.max_position_size),
                    "TRADING_MAX_POSITION_SIZE",
                    "Largest position as a fraction of the portfolio",
                )
                .bounded(Some(0.0), Some(1.0)),
                FieldManifest::new(
                    "transaction_cost",
                    "float",
                    json!(defaults.transaction_cost),
                    "TRADING_TRANSACTION_COST",
                    "Cost per trade as a fraction of notional",
                )
                .bounded(Some(0.0), None),
                FieldManifest::new(
                    "risk_free_rate",
                    "float",
                    json!(defaults.risk_free_rate),
                    "TRADING_RISK_FREE_RATE",
                    "Annual risk-free rate used for Sharpe-style metrics",
                ),
                FieldManifest::new(
                    "max_drawdown",
                    "float",
                    json!(defaults.max_drawdown),
                    "TRADING_MAX_DRAWDOWN",
                    "Drawdown at which trading halts",
                ),
                FieldManifest::new(
                    "stop_loss_pct",
                    "float",
                    json!(defaults.stop_loss_pct),
                    "TRADING_STOP_LOSS_PCT",
                    "Per-position stop loss",
                ),
                FieldManifest::new(
                    "take_profit_pct",
                    "float",
                    json!(defaults.take_profit_pct),
                    "TRADING_TAKE_PROFIT_PCT",
                    "Per-position take profit",
                ),
            ],
        }
    }
}
