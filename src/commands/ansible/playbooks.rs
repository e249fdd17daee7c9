//! Playbooks on the ansible service. The playbook is assembled from
//! `--host`, `--mod` and `--file` flags rather than read from a file.

use clap::{ArgAction, Args};
use serde::Serialize;
use serde_json::{Map, Value};

use super::read_named_files;
use crate::client::Session;
use crate::client::modules::ANSIBLE_PLAYBOOKS;
use crate::commands::input::split_pair;
use crate::render::Transform;
use crate::render::transforms::playbook_yaml;
use crate::shell::payload::{BaseListOptions, Params};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliError, CliResult, Registry, RegistryError};

const PLAYBOOK_VIEW: Transform = playbook_yaml;

#[derive(Debug, Serialize)]
struct Playbook {
    inventory: Inventory,
    modules: Vec<Module>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    files: Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct Inventory {
    hosts: Vec<Host>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Host {
    name: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    vars: Map<String, Value>,
}

#[derive(Debug, PartialEq, Serialize)]
struct Module {
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    args: Vec<String>,
}

/// `name [key=value ...]`
fn parse_host(raw: &str) -> CliResult<Host> {
    let mut tokens = raw.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| CliError::invalid("--host: empty host"))?;
    let mut vars = Map::new();
    for token in tokens {
        let (key, value) = split_pair("host", token)?;
        vars.insert(key.to_string(), Value::String(value.to_string()));
    }
    Ok(Host {
        name: name.to_string(),
        vars,
    })
}

/// `module [arg ...]`, e.g. `copy src=/etc/hosts dest=/tmp/hosts`
fn parse_module(raw: &str) -> CliResult<Module> {
    let mut tokens = raw.split_whitespace();
    let name = tokens
        .next()
        .ok_or_else(|| CliError::invalid("--mod: empty module"))?;
    Ok(Module {
        name: name.to_string(),
        args: tokens.map(str::to_string).collect(),
    })
}

async fn build_playbook(hosts: &[String], mods: &[String], files: &[String]) -> CliResult<Value> {
    if hosts.is_empty() || mods.is_empty() {
        return Err(CliError::invalid(
            "a playbook needs at least one --host and one --mod",
        ));
    }
    let playbook = Playbook {
        inventory: Inventory {
            hosts: hosts
                .iter()
                .map(|raw| parse_host(raw))
                .collect::<CliResult<_>>()?,
        },
        modules: mods
            .iter()
            .map(|raw| parse_module(raw))
            .collect::<CliResult<_>>()?,
        files: read_named_files(files).await?,
    };
    serde_json::to_value(&playbook)
        .map_err(|err| CliError::invalid(format!("cannot encode playbook: {err}")))
}

#[derive(Debug, Args)]
pub struct PlaybookCreateOptions {
    /// Name of the playbook
    pub name: String,

    /// Target host as `name [key=value ...]`; repeatable
    #[arg(long = "host", value_name = "HOST", required = true, action = ArgAction::Append)]
    pub hosts: Vec<String>,

    /// Module to run as `module [arg ...]`; repeatable
    #[arg(long = "mod", value_name = "MODULE", required = true, action = ArgAction::Append)]
    pub mods: Vec<String>,

    /// Extra file shipped with the playbook; repeatable
    #[arg(long = "file", value_name = "NAME=PATH", action = ArgAction::Append)]
    pub files: Vec<String>,
}

/// Giving any of `--host`, `--mod` or `--file` replaces the whole playbook.
#[derive(Debug, Args)]
pub struct PlaybookUpdateOptions {
    /// ID or name of the playbook
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// Target host as `name [key=value ...]`; repeatable
    #[arg(long = "host", value_name = "HOST", action = ArgAction::Append)]
    pub hosts: Vec<String>,

    /// Module to run as `module [arg ...]`; repeatable
    #[arg(long = "mod", value_name = "MODULE", action = ArgAction::Append)]
    pub mods: Vec<String>,

    /// Extra file shipped with the playbook; repeatable
    #[arg(long = "file", value_name = "NAME=PATH", action = ArgAction::Append)]
    pub files: Vec<String>,
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let playbooks = ResourceCmd::new(&ANSIBLE_PLAYBOOKS).transform(PLAYBOOK_VIEW);
    playbooks.list::<BaseListOptions>(registry, "List ansible playbooks")?;
    playbooks.show::<ResourceIdOptions>(registry, "Show details of a playbook")?;
    registry.register(playbooks.name("create"), "Create a playbook", create)?;
    registry.register(playbooks.name("update"), "Update a playbook", update)?;
    playbooks.delete::<ResourceIdsOptions>(registry, "Delete playbooks")?;
    playbooks.perform::<ResourceIdOptions>(registry, "run", "Run a playbook")?;
    playbooks.perform::<ResourceIdOptions>(registry, "stop", "Stop a running playbook")
}

async fn create(session: Session, options: PlaybookCreateOptions) -> CliResult<()> {
    let mut params = Params::new();
    params.put("name", &options.name).set(
        "playbook",
        build_playbook(&options.hosts, &options.mods, &options.files).await?,
    );
    let record = ANSIBLE_PLAYBOOKS.create(&session, params).await?;
    session.printer().print_object_with(&record, Some(PLAYBOOK_VIEW))?;
    Ok(())
}

async fn update(session: Session, options: PlaybookUpdateOptions) -> CliResult<()> {
    let mut params = Params::new();
    params.put("name", &options.name);
    if !(options.hosts.is_empty() && options.mods.is_empty() && options.files.is_empty()) {
        params.set(
            "playbook",
            build_playbook(&options.hosts, &options.mods, &options.files).await?,
        );
    }
    let params = params.ensure_update(&format!("ansibleplaybook {}", options.id))?;
    let record = ANSIBLE_PLAYBOOKS.update(&session, &options.id, params).await?;
    session.printer().print_object_with(&record, Some(PLAYBOOK_VIEW))?;
    Ok(())
}
