//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{collections::BTreeMap, fs, path::PathBuf, str::FromStr, time::Duration};

use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

mod cli;

pub use cli::GlobalArgs;

const LOCAL_CONFIG_BASENAME: &str = "cloudadm";
const ENV_PREFIX: &str = "CLOUDADM";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully-resolved client settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub endpoint: Option<Url>,
    pub region: Option<String>,
    pub services: BTreeMap<String, Url>,
    pub token: Option<String>,
    pub output: OutputFormat,
    pub timeout: Duration,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Kv,
    Json,
    Yaml,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: String, reason: String },
    #[error("failed to read token file {path}: {source}")]
    TokenFile {
        path: String,
        source: std::io::Error,
    },
}

impl LoadError {
    fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(globals: &GlobalArgs) -> Result<Settings, LoadError> {
    let mut builder =
        Config::builder().add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = globals.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(globals);

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    endpoint: Option<String>,
    region: Option<String>,
    services: BTreeMap<String, String>,
    auth: RawAuthSettings,
    output: Option<OutputFormat>,
    timeout_seconds: Option<u64>,
    logging: RawLoggingSettings,
}

impl RawSettings {
    fn apply_overrides(&mut self, globals: &GlobalArgs) {
        if let Some(endpoint) = globals.endpoint.as_ref() {
            self.endpoint = Some(endpoint.clone());
        }
        if let Some(region) = globals.region.as_ref() {
            self.region = Some(region.clone());
        }
        if let Some(token) = globals.token.as_ref() {
            self.auth.token = Some(token.clone());
        }
        if let Some(path) = globals.token_file.as_ref() {
            self.auth.token_file = Some(path.clone());
        }
        if let Some(output) = globals.output {
            self.output = Some(output);
        }
        if let Some(timeout) = globals.timeout_seconds {
            self.timeout_seconds = Some(timeout);
        }
        if let Some(level) = globals.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = globals.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            endpoint,
            region,
            services,
            auth,
            output,
            timeout_seconds,
            logging,
        } = raw;

        let endpoint = non_blank(endpoint)
            .map(|value| parse_url("endpoint", &value))
            .transpose()?;
        let services = services
            .into_iter()
            .map(|(name, value)| {
                let url = parse_url(&format!("services.{name}"), value.trim())?;
                Ok((name, url))
            })
            .collect::<Result<BTreeMap<_, _>, LoadError>>()?;
        let token = build_token(auth)?;
        let timeout = build_timeout(timeout_seconds)?;
        let logging = build_logging_settings(logging)?;

        Ok(Self {
            endpoint,
            region: non_blank(region),
            services,
            token,
            output: output.unwrap_or_default(),
            timeout,
            logging,
        })
    }
}

fn build_token(auth: RawAuthSettings) -> Result<Option<String>, LoadError> {
    if let Some(path) = auth.token_file {
        let token = fs::read_to_string(&path).map_err(|source| LoadError::TokenFile {
            path: path.display().to_string(),
            source,
        })?;
        return Ok(non_blank(Some(token)));
    }
    Ok(non_blank(auth.token))
}

fn build_timeout(seconds: Option<u64>) -> Result<Duration, LoadError> {
    let seconds = seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if seconds == 0 {
        return Err(LoadError::invalid(
            "timeout_seconds",
            "must be greater than zero",
        ));
    }
    Ok(Duration::from_secs(seconds))
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::WARN,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn parse_url(key: &str, value: &str) -> Result<Url, LoadError> {
    let url = Url::parse(value).map_err(|err| LoadError::invalid(key, err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(LoadError::invalid(key, "URL cannot be used as a base"));
    }
    Ok(url)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAuthSettings {
    token: Option<String>,
    token_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[cfg(test)]
mod tests;
