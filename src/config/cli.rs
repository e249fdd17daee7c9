use std::path::PathBuf;

use clap::{Args, ValueHint, builder::BoolishValueParser};

use super::OutputFormat;

/// Flags accepted before the subcommand name.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "CLOUDADM_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub config_file: Option<PathBuf>,

    /// Base URL of the management API gateway.
    #[arg(long = "endpoint", env = "CLOUDADM_ENDPOINT", value_name = "URL")]
    pub endpoint: Option<String>,

    /// Region the request is routed to.
    #[arg(long = "region", env = "CLOUDADM_REGION", value_name = "REGION")]
    pub region: Option<String>,

    /// Read the auth token from this file.
    #[arg(
        long = "token-file",
        env = "CLOUDADM_TOKEN_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath
    )]
    pub token_file: Option<PathBuf>,

    /// Auth token taken from the environment.
    #[arg(
        long = "os-auth-token",
        env = "CLOUDADM_TOKEN",
        hide = true,
        hide_env_values = true
    )]
    pub token: Option<String>,

    /// Output format.
    #[arg(long = "output", env = "CLOUDADM_OUTPUT", value_enum)]
    pub output: Option<OutputFormat>,

    /// Request timeout in seconds.
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}
