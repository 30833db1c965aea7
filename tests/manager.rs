use arl_net_config::config::env::DOTENV_DISABLED_VAR;
use arl_net_config::config::{EvolutionStrategy, RlConfig, TradingConfig, TradingMode};
use arl_net_config::{AppConfig, ArlNetError, ConfigManager};
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::path::Path;

fn write_credentials(dir: &Path) -> String {
    let path = dir.join("firebase_credentials.json");
    std::fs::write(&path, r#"{"type": "service_account"}"#).unwrap();
    path.display().to_string()
}

fn env_with_credentials(credentials: &str) -> HashMap<String, String> {
    let mut env = HashMap::new();
    env.insert("FIREBASE_CREDENTIAL_PATH".to_string(), credentials.to_string());
    env
}

#[test]
fn test_default_config_fails_without_credentials() {
    // ./config/firebase_credentials.json is not shipped with the crate
    let err = AppConfig::default().validate().unwrap_err();
    assert!(matches!(err, ArlNetError::CredentialsNotFound { .. }));
}

#[test]
fn test_from_env_source_validates() {
    let dir = tempfile::tempdir().unwrap();
    let mut env = env_with_credentials(&write_credentials(dir.path()));
    env.insert("ARL_TRADING_MODE".to_string(), "paper".to_string());

    let manager = ConfigManager::from_env_source(&env).unwrap();
    let config = manager.get().unwrap();
    assert_eq!(config.mode, TradingMode::Paper);
    assert_eq!(config.trading, TradingConfig::default());
}

#[test]
fn test_from_env_source_rejects_invalid_section() {
    let dir = tempfile::tempdir().unwrap();
    let mut env = env_with_credentials(&write_credentials(dir.path()));
    env.insert("RL_GAMMA".to_string(), "1.5".to_string());

    let err = ConfigManager::from_env_source(&env).err().unwrap();
    assert_eq!(err.field(), Some("gamma"));
}

#[test]
fn test_validate_reports_first_failing_section() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::from_env_source(&env_with_credentials(&write_credentials(
        dir.path(),
    )))
    .unwrap();
    config.trading.initial_balance = 0.0;
    config.rl.gamma = 2.0;

    assert_eq!(config.validate().unwrap_err().field(), Some("initial_balance"));
}

#[test]
fn test_load_from_file_layers_env_over_file() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_credentials(dir.path());
    let file = dir.path().join("arl.toml");
    std::fs::write(
        &file,
        format!(
            r#"
mode = "live"

[firebase]
project_id = "from-file"
credential_path = "{}"

[trading]
initial_balance = 500.0

[neuroevolution]
strategy = "hyperneat"
population_size = 80
"#,
            credentials.replace('\\', "\\\\")
        ),
    )
    .unwrap();

    let mut env = HashMap::new();
    env.insert("FIREBASE_PROJECT_ID".to_string(), "from-env".to_string());

    let manager = ConfigManager::new();
    manager.load_from_file_with_env(&file, &env).unwrap();
    let config = manager.get().unwrap();

    assert_eq!(config.mode, TradingMode::Live);
    assert_eq!(config.firebase.project_id, "from-env");
    assert_eq!(config.trading.initial_balance, 500.0);
    assert_eq!(config.trading.max_position_size, 0.1);
    assert_eq!(config.neuroevolution.strategy, EvolutionStrategy::HyperNeat);
    assert_eq!(config.neuroevolution.population_size, 80);
    assert_eq!(config.rl, RlConfig::default());
}

#[test]
fn test_rejected_file_keeps_previous_config() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("bad.toml");
    std::fs::write(&file, "[rl]\ngamma = 3.0\n").unwrap();

    let manager = ConfigManager::new();
    let before = manager.get().unwrap();
    let env = env_with_credentials(&write_credentials(dir.path()));

    let err = manager.load_from_file_with_env(&file, &env).unwrap_err();
    assert_eq!(err.field(), Some("gamma"));
    assert_eq!(manager.get().unwrap(), before);
}

#[test]
fn test_malformed_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("broken.toml");
    std::fs::write(&file, "[trading\ninitial_balance = ").unwrap();

    let err = ConfigManager::new()
        .load_from_file_with_env(&file, &HashMap::<String, String>::new())
        .unwrap_err();
    assert!(err.to_string().contains("Failed to parse config"));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigManager::new()
        .load_from_file_with_env(dir.path().join("absent.toml"), &HashMap::<String, String>::new())
        .unwrap_err();
    assert!(matches!(err, ArlNetError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
}

#[test]
fn test_save_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigManager::new()
        .save_to_file(dir.path().join("no-such-dir").join("out.toml"))
        .unwrap_err();
    assert!(matches!(err, ArlNetError::Io(_)));
}

#[test]
fn test_unchecked_file_values_load() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("wide.toml");
    std::fs::write(
        &file,
        "[rl]\nbuffer_size = 32\nbatch_size = 64\ntau = 2.0\n\n[trading]\nmax_drawdown = 1.5\n",
    )
    .unwrap();
    let env = env_with_credentials(&write_credentials(dir.path()));

    let manager = ConfigManager::new();
    manager.load_from_file_with_env(&file, &env).unwrap();
    let config = manager.get().unwrap();
    assert_eq!(config.rl.batch_size, 64);
    assert_eq!(config.trading.max_drawdown, 1.5);
}

#[test]
fn test_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let env = env_with_credentials(&write_credentials(dir.path()));
    let manager = ConfigManager::from_env_source(&env).unwrap();
    manager
        .update(|c| c.neuroevolution.mutation_rate = 0.25)
        .unwrap();

    let file = dir.path().join("saved.toml");
    manager.save_to_file(&file).unwrap();

    let reloaded = ConfigManager::new();
    reloaded
        .load_from_file_with_env(&file, &HashMap::<String, String>::new())
        .unwrap();
    assert_eq!(reloaded.get().unwrap(), manager.get().unwrap());
}

#[test]
fn test_invalid_update_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let env = env_with_credentials(&write_credentials(dir.path()));
    let manager = ConfigManager::from_env_source(&env).unwrap();

    let err = manager
        .update(|c| c.trading.max_position_size = 1.5)
        .unwrap_err();
    assert_eq!(err.field(), Some("max_position_size"));
    assert_eq!(manager.get().unwrap().trading.max_position_size, 0.1);
}

#[test]
fn test_manifests_cover_every_section() {
    let sections: Vec<String> = AppConfig::default()
        .manifests()
        .into_iter()
        .map(|m| m.section)
        .collect();
    assert_eq!(
        sections,
        vec!["Firebase", "Trading", "Reinforcement Learning", "Neuroevolution"]
    );
}

#[test]
#[serial]
fn test_load_reads_process_env() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = write_credentials(dir.path());

    env::set_var(DOTENV_DISABLED_VAR, "1");
    env::set_var("FIREBASE_CREDENTIAL_PATH", &credentials);
    env::set_var("NEURO_POPULATION_SIZE", "120");

    let result = ConfigManager::load();

    env::remove_var(DOTENV_DISABLED_VAR);
    env::remove_var("FIREBASE_CREDENTIAL_PATH");
    env::remove_var("NEURO_POPULATION_SIZE");

    let config = result.unwrap().get().unwrap();
    assert_eq!(config.neuroevolution.population_size, 120);
    assert_eq!(config.neuroevolution.mutation_rate, 0.1);
}

#[test]
#[serial]
fn test_load_fails_on_missing_credentials() {
    let dir = tempfile::tempdir().unwrap();

    env::set_var(DOTENV_DISABLED_VAR, "1");
    env::set_var(
        "FIREBASE_CREDENTIAL_PATH",
        dir.path().join("nope.json").display().to_string(),
    );

    let result = ConfigManager::load();

    env::remove_var(DOTENV_DISABLED_VAR);
    env::remove_var("FIREBASE_CREDENTIAL_PATH");

    assert!(matches!(
        result.err().unwrap(),
        ArlNetError::CredentialsNotFound { .. }
    ));
}
