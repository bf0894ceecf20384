use novabites::config::Config;
use novabites::constants::DEFAULT_API_BASE_URL;
use novabites::utils::datetime;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.ui.items_per_page, 10);
    assert_eq!(config.display.utc_offset_hours, -5);
    assert!(!config.ui.mouse_enabled);
    assert!(!config.logging.enabled);
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    config.api.base_url = "ftp://example.com".to_string();
    assert!(config.validate().is_err());

    config.api.base_url = "http://localhost:3000".to_string();
    config.ui.items_per_page = 0;
    assert!(config.validate().is_err());

    config.ui.items_per_page = 25;
    config.display.utc_offset_hours = 20;
    assert!(config.validate().is_err());

    config.display.utc_offset_hours = -5;
    config.logging.level = "chatty".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("items_per_page = 10"));
    assert!(toml_str.contains("utc_offset_hours = -5"));
    assert!(toml_str.contains("[session]"));
}

#[test]
fn test_partial_config_deserialization() {
    // Partial TOML configs merge with defaults
    let partial_toml = r#"
[api]
base_url = "http://127.0.0.1:8080"

[logging]
enabled = true
level = "debug"
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    assert_eq!(config.api.base_url, "http://127.0.0.1:8080");
    assert!(config.logging.enabled);
    assert_eq!(config.logging.level_filter(), log::LevelFilter::Debug);

    // Unspecified values use defaults
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.display.utc_offset_hours, datetime::APP_UTC_OFFSET_HOURS);
    assert_eq!(config.session.check_interval_secs, 30);
}

#[test]
fn test_load_from_file_and_generate_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    Config::generate_default_config(&path).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.starts_with("# NovaBites Configuration File"));

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.api.base_url, DEFAULT_API_BASE_URL);
    assert_eq!(loaded.ui.toast_seconds, 3);
}

#[test]
fn test_load_from_file_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[ui]\nitems_per_page = 500\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("items_per_page"));
}

#[test]
fn test_timezone_and_paths() {
    let mut config = Config::default();
    assert_eq!(config.display.timezone().local_minus_utc(), -5 * 3600);

    let dir = tempfile::tempdir().unwrap();
    config.session.token_file = Some(dir.path().join("token"));
    assert_eq!(config.session.token_path(), Some(dir.path().join("token")));

    config.downloads.directory = Some(dir.path().to_path_buf());
    assert_eq!(config.downloads.resolve_directory(), dir.path());
}
