use std::path::PathBuf;

use ccswitch::config::{ActivationMode, AppConfig, ConfigError};
use tempfile::TempDir;

#[test]
fn missing_file_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.activation, ActivationMode::Auto);
    assert_eq!(config.token_var, "ANTHROPIC_AUTH_TOKEN");
    assert_eq!(config.base_url_var, "ANTHROPIC_BASE_URL");
    assert_eq!(config.setx_program, "setx");
}

#[test]
fn partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"activation = "settings"
settings_path = "/opt/claude/settings.json"
"#,
    )
    .unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.activation, ActivationMode::Settings);
    assert_eq!(
        config.settings_path(),
        Some(PathBuf::from("/opt/claude/settings.json"))
    );
    assert!(config.profiles_path().is_none());
    assert_eq!(config.token_var, "ANTHROPIC_AUTH_TOKEN");
}

#[test]
fn tilde_paths_are_expanded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "profiles_path = \"~/profiles/configs.json\"\n").unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    let resolved = config.profiles_path().unwrap();
    if let Some(home) = dirs::home_dir() {
        assert_eq!(resolved, home.join("profiles/configs.json"));
    }
}

#[test]
fn invalid_toml_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "activation = [").unwrap();

    assert!(matches!(
        AppConfig::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn unknown_activation_mode_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "activation = \"registry\"\n").unwrap();

    assert!(matches!(
        AppConfig::load_from(&path),
        Err(ConfigError::ParseError { .. })
    ));
}

#[test]
fn identical_variable_names_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "token_var = \"X\"\nbase_url_var = \"X\"\n").unwrap();

    assert!(matches!(
        AppConfig::load_from(&path),
        Err(ConfigError::ValidationError { .. })
    ));
}

#[test]
fn empty_variable_name_fails_validation() {
    let config = AppConfig {
        token_var: " ".to_string(),
        ..AppConfig::default()
    };
    assert!(config.validate().is_err());
}
