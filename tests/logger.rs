use novabites::config::LoggingConfig;
use novabites::logger::Logger;

#[test]
fn test_config_based_logging_disabled() {
    let logger = Logger::from_config(&LoggingConfig::default()).unwrap();
    assert!(!logger.is_enabled());
    assert!(logger.log_file().is_none());

    logger.log("Test message".to_string());
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].contains("Test message"));
}

#[test]
fn test_config_based_logging_enabled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("novabites.log");
    let config = LoggingConfig {
        enabled: true,
        level: "debug".to_string(),
        file: Some(path.clone()),
    };

    let logger = Logger::from_config(&config).unwrap();
    assert!(logger.is_enabled());
    assert_eq!(logger.log_file(), Some(&path));
    // The parent folder is created up front
    assert!(path.parent().unwrap().is_dir());
}

#[test]
fn test_logs_are_newest_first() {
    let logger = Logger::new();
    logger.log("first".to_string());
    logger.log("second".to_string());

    let logs = logger.get_logs();
    assert!(logs[0].contains("second"));
    assert!(logs[1].contains("first"));

    logger.clear();
    assert!(logger.get_logs().is_empty());
}

#[test]
fn test_memory_buffer_is_bounded() {
    let logger = Logger::new();
    for i in 0..2100 {
        logger.log(format!("line {}", i));
    }
    let logs = logger.get_logs();
    assert_eq!(logs.len(), 2000);
    assert!(logs[0].contains("line 2099"));
    assert!(logs.last().unwrap().contains("line 100"));
}

#[test]
fn test_installed_logger_captures_log_macros() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("app.log");
    let config = LoggingConfig {
        enabled: true,
        level: "info".to_string(),
        file: Some(path.clone()),
    };
    let logger = Logger::from_config(&config).unwrap();
    logger.install().unwrap();

    log::info!("order 42 created");
    log::debug!("filtered out below info");

    let logs = logger.get_logs();
    assert!(logs.iter().any(|l| l.contains("order 42 created") && l.contains("INFO")));
    assert!(!logs.iter().any(|l| l.contains("filtered out")));

    log::logger().flush();
    let file = std::fs::read_to_string(&path).unwrap();
    assert!(file.contains("order 42 created"));
}
