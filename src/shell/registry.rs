//! The command registry: subcommand name → (options prototype, description,
//! handler).
//!
//! The registry is assembled once at start-up by the per-family
//! `register` functions and is only read afterwards.

use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use clap::{ArgMatches, Args, Command, FromArgMatches};
use thiserror::Error;

use super::error::{CliError, CliResult};
use crate::client::Session;

pub type HandlerFuture = Pin<Box<dyn Future<Output = CliResult<()>> + Send>>;

type Invoke = dyn Fn(Session, &ArgMatches) -> Result<HandlerFuture, clap::Error> + Send + Sync;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("registry error: duplicate command '{0}'")]
    Duplicate(String),
}

pub struct CommandEntry {
    name: String,
    description: String,
    prototype: fn(Command) -> Command,
    invoke: Box<Invoke>,
}

impl std::fmt::Debug for CommandEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl CommandEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// A fresh clap command built from the options prototype. Every call
    /// returns a new value, so no parse state survives between invocations.
    pub fn command(&self) -> Command {
        (self.prototype)(Command::new(self.name.clone()))
            .about(self.description.clone())
            .long_about(None)
    }

    /// Convert parsed matches into the declared options type and start the
    /// handler.
    pub fn invoke(
        &self,
        session: Session,
        matches: &ArgMatches,
    ) -> Result<HandlerFuture, clap::Error> {
        (self.invoke)(session, matches)
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, CommandEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to the options type `O` and `handler`.
    pub fn register<O, F, Fut>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Result<(), RegistryError>
    where
        O: Args + FromArgMatches + Send + 'static,
        F: Fn(Session, O) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = CliResult<()>> + Send + 'static,
    {
        let name = name.into();
        if self.entries.contains_key(&name) {
            return Err(RegistryError::Duplicate(name));
        }

        let invoke =
            move |session: Session, matches: &ArgMatches| -> Result<HandlerFuture, clap::Error> {
                let options = O::from_arg_matches(matches)?;
                let future: HandlerFuture = Box::pin(handler(session, options));
                Ok(future)
            };

        self.entries.insert(
            name.clone(),
            CommandEntry {
                name,
                description: description.into(),
                prototype: O::augment_args,
                invoke: Box::new(invoke),
            },
        );
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> CliResult<&CommandEntry> {
        self.entries
            .get(name)
            .ok_or_else(|| CliError::invalid(format!("unknown subcommand '{name}'")))
    }

    /// Entries in name order.
    pub fn list_all(&self) -> impl Iterator<Item = &CommandEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
