//! argv → clap matches → options value → handler → exit code.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::{ArgMatches, Args, Command, FromArgMatches};

use super::error::{
    CliError, CliResult, EXIT_FAILURE, EXIT_INTERRUPTED, EXIT_OK, EXIT_USAGE,
    describe_usage_error,
};
use super::registry::{CommandEntry, Registry};
use crate::client::Session;
use crate::config::{self, GlobalArgs};
use crate::infra::telemetry;

/// The top-level command: global flags plus one subcommand per registry entry.
pub fn root_command(registry: &Registry) -> Command {
    GlobalArgs::augment_args(
        Command::new("cloudadm")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Administrative client for a multi-tenant cloud platform"),
    )
    .subcommand_required(true)
    .arg_required_else_help(true)
    .subcommands(registry.list_all().map(CommandEntry::command))
}

/// Bind `argv` (without a program name) against the options type `O`.
pub fn bind<O, I, T>(name: &str, argv: I) -> Result<O, clap::Error>
where
    O: Args + FromArgMatches,
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let command = O::augment_args(Command::new(name.to_string()).no_binary_name(true));
    let matches = command.try_get_matches_from(argv)?;
    O::from_arg_matches(&matches)
}

/// Resolve `name`, convert `matches` and await the handler.
pub async fn dispatch(
    registry: &Registry,
    session: Session,
    name: &str,
    matches: &ArgMatches,
) -> CliResult<()> {
    let entry = registry.lookup(name)?;
    let future = entry
        .invoke(session, matches)
        .map_err(|err| CliError::InvalidArgument(usage_detail(&err)))?;
    future.await
}

/// Parse `argv` (subcommand name first) against its entry and run it with
/// `session`. Used where the session is built by the caller.
pub async fn run_subcommand<I, T>(registry: &Registry, session: Session, argv: I) -> CliResult<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut argv = argv.into_iter().map(Into::into);
    let Some(name) = argv.next() else {
        return Err(CliError::invalid("a subcommand is required"));
    };
    let name = name.to_string_lossy().into_owned();
    let entry = registry.lookup(&name)?;
    let matches = entry
        .command()
        .no_binary_name(true)
        .try_get_matches_from(argv)
        .map_err(|err| CliError::InvalidArgument(usage_detail(&err)))?;
    dispatch(registry, session, &name, &matches).await
}

/// Run one invocation end to end and return the process exit status.
pub async fn run<I, T>(registry: &Registry, argv: I) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let matches = match root_command(registry).try_get_matches_from(argv) {
        Ok(matches) => matches,
        Err(err) => return report_clap_error(&err),
    };
    let globals = match GlobalArgs::from_arg_matches(&matches) {
        Ok(globals) => globals,
        Err(err) => return report_clap_error(&err),
    };
    let Some((name, sub_matches)) = matches.subcommand() else {
        eprintln!("argument error: a subcommand is required");
        return EXIT_USAGE;
    };

    let settings = match config::load(&globals) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("config error: {err}");
            return EXIT_FAILURE;
        }
    };
    if let Err(err) = telemetry::init(&settings.logging) {
        eprintln!("{err}");
    }
    let session = match Session::from_settings(&settings) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("{err}");
            return err.exit_code();
        }
    };

    tracing::debug!(subcommand = name, "dispatching");
    until_interrupted(
        name,
        dispatch(registry, session, name, sub_matches),
        tokio::signal::ctrl_c(),
    )
    .await
}

/// Run `work` to completion unless `interrupt` fires first. An interrupt
/// source that fails to install never fires.
async fn until_interrupted<W, I>(name: &str, work: W, interrupt: I) -> u8
where
    W: Future<Output = CliResult<()>>,
    I: Future<Output = std::io::Result<()>>,
{
    tokio::select! {
        outcome = work => match outcome {
            Ok(()) => EXIT_OK,
            Err(err) => {
                tracing::debug!(error = ?err, subcommand = name, "command failed");
                eprintln!("{err}");
                err.exit_code()
            }
        },
        Ok(()) = interrupt => {
            eprintln!("interrupted");
            EXIT_INTERRUPTED
        }
    }
}

fn report_clap_error(err: &clap::Error) -> u8 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = err.print();
            EXIT_OK
        }
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            let _ = err.print();
            EXIT_USAGE
        }
        _ => {
            eprintln!("{}", describe_usage_error(err));
            EXIT_USAGE
        }
    }
}

/// `describe_usage_error` without its category prefix.
fn usage_detail(err: &clap::Error) -> String {
    let described = describe_usage_error(err);
    described
        .strip_prefix("argument error: ")
        .map_or_else(|| described.clone(), str::to_string)
}
