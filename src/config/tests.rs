use std::io::Write;

use clap::{Command, FromArgMatches};
use tempfile::NamedTempFile;

use super::*;

fn tmp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write tmp");
    file
}

fn parse_globals(args: &[&str]) -> GlobalArgs {
    let matches = <GlobalArgs as clap::Args>::augment_args(Command::new("cloudadm"))
        .try_get_matches_from(std::iter::once("cloudadm").chain(args.iter().copied()))
        .expect("parse");
    GlobalArgs::from_arg_matches(&matches).expect("globals")
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings {
        endpoint: Some("https://file.example.com".to_string()),
        ..Default::default()
    };
    raw.logging.level = Some("info".to_string());

    let globals = GlobalArgs {
        endpoint: Some("https://cli.example.com/api".to_string()),
        log_level: Some("debug".to_string()),
        output: Some(OutputFormat::Json),
        ..Default::default()
    };

    raw.apply_overrides(&globals);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(
        settings.endpoint.as_ref().map(Url::as_str),
        Some("https://cli.example.com/api")
    );
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.output, OutputFormat::Json);
}

#[test]
fn defaults_are_offline_friendly() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");
    assert!(settings.endpoint.is_none());
    assert!(settings.token.is_none());
    assert_eq!(settings.output, OutputFormat::Table);
    assert_eq!(settings.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(settings.logging.level, LevelFilter::WARN);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
}

#[test]
fn invalid_endpoint_names_the_key() {
    let raw = RawSettings {
        endpoint: Some("not a url".to_string()),
        ..Default::default()
    };
    let err = Settings::from_raw(raw).expect_err("relative url");
    assert!(
        matches!(&err, LoadError::Invalid { key, .. } if key == "endpoint"),
        "{err}"
    );
    assert!(err.to_string().starts_with("invalid configuration for `endpoint`"));
}

#[test]
fn zero_timeout_is_rejected() {
    let raw = RawSettings {
        timeout_seconds: Some(0),
        ..Default::default()
    };
    let err = Settings::from_raw(raw).expect_err("zero timeout");
    assert!(matches!(err, LoadError::Invalid { key, .. } if key == "timeout_seconds"));
}

#[test]
fn token_file_wins_and_is_trimmed() {
    let file = tmp_file(".token", "file-token\n");
    let mut raw = RawSettings::default();
    raw.auth.token = Some("env-token".to_string());

    raw.apply_overrides(&GlobalArgs {
        token_file: Some(file.path().to_path_buf()),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.token.as_deref(), Some("file-token"));
}

#[test]
fn unreadable_token_file_is_reported() {
    let mut raw = RawSettings::default();
    raw.auth.token_file = Some(PathBuf::from("/nonexistent/cloudadm/token"));
    let err = Settings::from_raw(raw).expect_err("missing file");
    assert!(matches!(err, LoadError::TokenFile { .. }));
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    raw.apply_overrides(&GlobalArgs {
        log_json: Some(true),
        ..Default::default()
    });
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn config_file_supplies_services_and_region() {
    let file = tmp_file(
        ".toml",
        r#"
endpoint = "https://gw.example.com/api/"
region = "region-1"
timeout_seconds = 5

[services]
k8s = "https://k8s.example.com/"
"#,
    );
    let globals = GlobalArgs {
        config_file: Some(file.path().to_path_buf()),
        ..Default::default()
    };
    let settings = load(&globals).expect("settings");
    assert_eq!(settings.region.as_deref(), Some("region-1"));
    assert_eq!(settings.timeout, Duration::from_secs(5));
    assert_eq!(
        settings.services.get("k8s").map(Url::as_str),
        Some("https://k8s.example.com/")
    );
}

#[test]
fn global_flags_parse() {
    let globals = parse_globals(&[
        "--endpoint",
        "https://gw.example.com",
        "--output",
        "yaml",
        "--timeout",
        "12",
        "--log-json",
        "yes",
    ]);
    assert_eq!(globals.endpoint.as_deref(), Some("https://gw.example.com"));
    assert_eq!(globals.output, Some(OutputFormat::Yaml));
    assert_eq!(globals.timeout_seconds, Some(12));
    assert_eq!(globals.log_json, Some(true));
}
