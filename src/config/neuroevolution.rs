use super::env::{override_parsed, EnvSource};
use super::traits::{ConfigManifest, ConfigSection, FieldManifest};
use super::validation::{ensure_positive_count, ensure_unit_interval};
use crate::error::{ArlNetError, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvolutionStrategy {
    #[default]
    #[serde(rename = "neat")]
    Neat,
    #[serde(rename = "hyperneat")]
    HyperNeat,
    #[serde(rename = "evolutionary_strategy")]
    Es,
}

impl EvolutionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            EvolutionStrategy::Neat => "neat",
            EvolutionStrategy::HyperNeat => "hyperneat",
            EvolutionStrategy::Es => "evolutionary_strategy",
        }
    }
}

impl fmt::Display for EvolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvolutionStrategy {
    type Err = ArlNetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "neat" => Ok(EvolutionStrategy::Neat),
            "hyperneat" => Ok(EvolutionStrategy::HyperNeat),
            "evolutionary_strategy" => Ok(EvolutionStrategy::Es),
            other => Err(ArlNetError::Configuration(format!(
                "Unknown evolution strategy '{}' (expected neat, hyperneat or evolutionary_strategy)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NeuroevolutionConfig {
    pub strategy: EvolutionStrategy,
    pub population_size: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_count: usize,

    // Architecture mutation
    pub add_node_rate: f64,
    pub add_connection_rate: f64,
    pub remove_node_rate: f64,

    // Complexity constraints
    pub max_hidden_layers: usize,
    pub max_nodes_per_layer: usize,
    pub min_nodes_per_layer: usize,
}

impl Default for NeuroevolutionConfig {
    fn default() -> Self {
        Self {
            strategy: EvolutionStrategy::Neat,
            population_size: 50,
            mutation_rate: 0.1,
            crossover_rate: 0.7,
            elitism_count: 2,
            add_node_rate: 0.03,
            add_connection_rate: 0.05,
            remove_node_rate: 0.01,
            max_hidden_layers: 5,
            max_nodes_per_layer: 128,
            min_nodes_per_layer: 4,
        }
    }
}

impl ConfigSection for NeuroevolutionConfig {
    fn section_name() -> &'static str {
        "neuroevolution"
    }

    fn validate(&self) -> Result<()> {
        // Only these two are known; the remaining fields carry no constraint.
        ensure_positive_count("population_size", self.population_size)?;
        ensure_unit_interval("mutation_rate", self.mutation_rate)?;
        Ok(())
    }

    fn apply_env(&mut self, env: &dyn EnvSource) -> Result<()> {
        override_parsed(env, "NEURO_STRATEGY", &mut self.strategy)?;
        override_parsed(env, "NEURO_POPULATION_SIZE", &mut self.population_size)?;
        override_parsed(env, "NEURO_MUTATION_RATE", &mut self.mutation_rate)?;
        override_parsed(env, "NEURO_CROSSOVER_RATE", &mut self.crossover_rate)?;
        override_parsed(env, "NEURO_ELITISM_COUNT", &mut self.elitism_count)?;
        override_parsed(env, "NEURO_ADD_NODE_RATE", &mut self.add_node_rate)?;
        override_parsed(env, "NEURO_ADD_CONNECTION_RATE", &mut self.add_connection_rate)?;
        override_parsed(env, "NEURO_REMOVE_NODE_RATE", &mut self.remove_node_rate)?;
        override_parsed(env, "NEURO_MAX_HIDDEN_LAYERS", &mut self.max_hidden_layers)?;
        override_parsed(env, "NEURO_MAX_NODES_PER_LAYER", &mut self.max_nodes_per_layer)?;
        override_parsed(env, "NEURO_MIN_NODES_PER_LAYER", &mut self.min_nodes_per_layer)?;
        Ok(())
    }

    fn to_manifest(&self) -> ConfigManifest {
        let d = Self::default();
        let rate = |name: &str, default: f64, var: &str, description: &str| {
            FieldManifest::new(name, "float", json!(default), var, description)
        };
        let count = |name: &str, default: usize, var: &str, description: &str| {
            FieldManifest::new(name, "integer", json!(default), var, description)
        };

        ConfigManifest {
            section: "Neuroevolution".to_string(),
            fields: vec![
                FieldManifest::new(
                    "strategy",
                    "enum",
                    json!(d.strategy.as_str()),
                    "NEURO_STRATEGY",
                    "neat, hyperneat or evolutionary_strategy",
                ),
                count("population_size", d.population_size, "NEURO_POPULATION_SIZE", "Genomes per generation")
                    .bounded(Some(1.0), None),
                rate("mutation_rate", d.mutation_rate, "NEURO_MUTATION_RATE", "Weight mutation probability")
                    .bounded(Some(0.0), Some(1.0)),
                rate("crossover_rate", d.crossover_rate, "NEURO_CROSSOVER_RATE", "Crossover probability"),
                count("elitism_count", d.elitism_count, "NEURO_ELITISM_COUNT", "Genomes copied unchanged"),
                rate("add_node_rate", d.add_node_rate, "NEURO_ADD_NODE_RATE", "Add-node mutation probability"),
                rate(
                    "add_connection_rate",
                    d.add_connection_rate,
                    "NEURO_ADD_CONNECTION_RATE",
                    "Add-connection mutation probability",
                ),
                rate("remove_node_rate", d.remove_node_rate, "NEURO_REMOVE_NODE_RATE", "Remove-node mutation probability"),
                count("max_hidden_layers", d.max_hidden_layers, "NEURO_MAX_HIDDEN_LAYERS", "Hidden layer cap"),
                count(
                    "max_nodes_per_layer",
                    d.max_nodes_per_layer,
                    "NEURO_MAX_NODES_PER_LAYER",
                    "Upper bound on layer width",
                ),
                count(
                    "min_nodes_per_layer",
                    d.min_nodes_per_layer,
                    "NEURO_MIN_NODES_PER_LAYER",
                    "Lower bound on layer width",
                ),
            ],
        }
    }
}
