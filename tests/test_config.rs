use log::*;
use prettylog::{
    basic_config,
    writers::{Destination, MemorySink},
    DateFormat, LogConfig, LogFormat, Logger, Severity, ENV_FORMAT, ENV_LEVEL,
};

#[test]
fn test_config() {
    let dir = temp_dir::TempDir::new().unwrap();
    let path = dir.child("logging.toml");
    std::fs::write(
        &path,
        "level = \"warning\"\nformat = \"stream\"\nbuffered = true\nbuffer_size = 2\n",
    )
    .unwrap();

    let config = LogConfig::from_file(&path).unwrap();
    assert_eq!(config.level, Severity::WARNING);
    assert_eq!(config.format, LogFormat::Stream);

    // basic_config writes to stderr; the same configuration into memory:
    let handle = basic_config(&config).unwrap();
    assert_eq!(handle.min_severity(), Some(Severity::WARNING));

    let sink = MemorySink::new();
    let handle = Logger::from_config(&config)
        .destination(Destination::Memory(sink.clone()))
        .start()
        .unwrap();
    info!("filtered");
    warn!("first");
    assert!(sink.contents().is_empty());
    warn!("second");
    assert_eq!(
        sink.lines(),
        vec!["WARNING:test_config:first", "WARNING:test_config:second"]
    );

    // from the environment
    std::env::set_var(ENV_LEVEL, "debug");
    std::env::set_var(ENV_FORMAT, "json");
    let config = LogConfig::from_env().unwrap();
    assert_eq!(config.level, Severity::DEBUG);
    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.date_format, DateFormat::Unset);

    sink.clear();
    let _handle = Logger::from_config(&config)
        .destination(Destination::Memory(sink.clone()))
        .start()
        .unwrap();
    debug!("as json");
    let lines = sink.lines();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains(r#""msg":"as json""#));
    assert!(lines[0].contains(r#""level":"debug""#));
    drop(handle);

    std::env::set_var(ENV_FORMAT, "xml");
    assert!(LogConfig::from_env().is_err());
}
