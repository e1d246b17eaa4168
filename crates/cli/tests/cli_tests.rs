use clap::Parser;
use prewarm::{Cli, Commands};
use prewarm_config::{ConfigSource, RetentionPolicy};
use serial_test::serial;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_no_subcommand_defaults_to_invoke() {
    let cli = Cli::try_parse_from(["prewarm"]).unwrap();
    assert_eq!(cli.command.unwrap_or_default(), Commands::Invoke { event: None });
}

#[test]
fn test_subcommand_defaults() {
    let cli = Cli::try_parse_from(["prewarm", "bench"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Bench {
            iterations: 10,
            pause_ms: 100,
            seed_invocations: 0,
        })
    );

    let cli = Cli::try_parse_from(["prewarm", "simulate", "--count", "3"]).unwrap();
    assert_eq!(
        cli.command,
        Some(Commands::Simulate {
            count: 3,
            interval_ms: 100,
        })
    );
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "prewarm",
        "invoke",
        "--event",
        r#"{"id":1}"#,
        "--window-hours",
        "12",
        "--retention",
        "unbounded",
    ])
    .unwrap();

    assert_eq!(cli.global.window_hours, Some(12.0));
    assert_eq!(cli.global.retention, Some(RetentionPolicy::Unbounded));
    assert!(matches!(cli.command, Some(Commands::Invoke { event: Some(_) })));
}

#[test]
fn test_unknown_retention_rejected() {
    assert!(Cli::try_parse_from(["prewarm", "--retention", "forever"]).is_err());
}

#[test]
#[serial]
fn test_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"window_size_hours": 6.0, "confidence_threshold": 0.3}"#).unwrap();

    let cli = Cli::try_parse_from([
        "prewarm",
        "config",
        "--config",
        path.to_str().unwrap(),
        "--confidence-threshold",
        "0.9",
    ])
    .unwrap();

    let loaded = cli.global.load_config().unwrap();
    assert_eq!(loaded.config.window_size_hours, 6.0);
    assert_eq!(loaded.config.confidence_threshold, 0.9);
    assert_eq!(loaded.source, ConfigSource::CommandLine);
}

#[test]
#[serial]
fn test_config_file_alone_reports_its_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"cold_start_delay_secs": 0.25}"#).unwrap();

    let cli = Cli::try_parse_from(["prewarm", "--config", path.to_str().unwrap()]).unwrap();
    let loaded = cli.global.load_config().unwrap();
    assert_eq!(loaded.config.cold_start_delay_secs, 0.25);
    assert_eq!(loaded.source, ConfigSource::ConfigFile(path));
}

#[test]
#[serial]
fn test_out_of_range_flag_rejected() {
    let dir = TempDir::new().unwrap();
    let cli = Cli::try_parse_from([
        "prewarm",
        "--config",
        dir.path().join("missing.json").to_str().unwrap(),
        "--confidence-threshold",
        "1.5",
    ])
    .unwrap();

    assert!(cli.global.load_config().is_err());
}
