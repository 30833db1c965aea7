use anyhow::Context;
use arl_net_config::config::env::{load_dotenv, ProcessEnv};
use arl_net_config::{AppConfig, ConfigManager};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arl-net-config")]
#[command(about = "Inspect and validate ARL-Net startup configuration", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate the configuration
    Check {
        /// TOML file layered under the environment
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML
    Show {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print field manifests for every section as JSON
    Manifest,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load(config)?;
            log::info!("mode: {}", config.mode);
            log::info!("firebase: project {}", config.firebase.project_id);
            log::info!("trading: initial balance {}", config.trading.initial_balance);
            log::info!("rl: gamma {}, lr {}", config.rl.gamma, config.rl.learning_rate);
            log::info!(
                "neuroevolution: {} with population {}",
                config.neuroevolution.strategy,
                config.neuroevolution.population_size
            );
            println!("Configuration OK");
        }
        Commands::Show { config } => {
            let config = load(config)?;
            print!("{}", config.to_toml_string()?);
        }
        Commands::Manifest => {
            let manifests = AppConfig::default().manifests();
            println!("{}", serde_json::to_string_pretty(&manifests)?);
        }
    }

    Ok(())
}

fn load(path: Option<PathBuf>) -> anyhow::Result<AppConfig> {
    let manager = match path {
        Some(path) => {
            load_dotenv()?;
            let manager = ConfigManager::new();
            manager
                .load_from_file_with_env(&path, &ProcessEnv)
                .with_context(|| format!("loading {}", path.display()))?;
            manager
        }
        None => ConfigManager::load().context("loading configuration from environment")?,
    };
    Ok(manager.get()?)
}
