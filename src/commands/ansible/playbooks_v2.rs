//! Playbooks on the devtool service, stored as YAML documents.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde_json::Value;

use super::read_named_files;
use crate::client::Session;
use crate::client::modules::ANSIBLE_PLAYBOOKS_V2;
use crate::commands::input::read_file;
use crate::render::Transform;
use crate::render::transforms::playbook_yaml;
use crate::shell::payload::{BaseListOptions, Params};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

const PLAYBOOK_VIEW: Transform = playbook_yaml;

#[derive(Debug, Args)]
pub struct PlaybookV2CreateOptions {
    /// Name of the playbook
    pub name: String,

    /// YAML playbook document
    pub playbook_file: PathBuf,

    /// Galaxy requirements file
    #[arg(long, value_name = "FILE")]
    pub requirements_file: Option<PathBuf>,

    /// Extra file shipped with the playbook; repeatable
    #[arg(long = "file", value_name = "NAME=PATH", action = ArgAction::Append)]
    pub files: Vec<String>,
}

#[derive(Debug, Args)]
pub struct PlaybookV2UpdateOptions {
    /// ID or name of the playbook
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// Replacement playbook document
    #[arg(long, value_name = "FILE")]
    pub playbook_file: Option<PathBuf>,

    /// Replacement requirements file
    #[arg(long, value_name = "FILE")]
    pub requirements_file: Option<PathBuf>,

    /// Replace the extra files; repeatable
    #[arg(long = "file", value_name = "NAME=PATH", action = ArgAction::Append)]
    pub files: Vec<String>,
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let playbooks = ResourceCmd::new(&ANSIBLE_PLAYBOOKS_V2)
        .keyword("ansibleplaybookv2")
        .transform(PLAYBOOK_VIEW);
    playbooks.list::<BaseListOptions>(registry, "List devtool playbooks")?;
    playbooks.show::<ResourceIdOptions>(registry, "Show details of a playbook")?;
    registry.register(
        playbooks.name("create"),
        "Create a playbook from local files",
        create,
    )?;
    registry.register(playbooks.name("update"), "Update a playbook", update)?;
    playbooks.delete::<ResourceIdsOptions>(registry, "Delete playbooks")?;
    playbooks.perform::<ResourceIdOptions>(registry, "run", "Run a playbook")?;
    playbooks.perform::<ResourceIdOptions>(registry, "stop", "Stop a running playbook")
}

/// Local files shared by create and update.
async fn file_params(
    playbook: Option<&PathBuf>,
    requirements: Option<&PathBuf>,
    files: &[String],
) -> CliResult<Params> {
    let mut params = Params::new();
    if let Some(path) = playbook {
        params.set("playbook", read_file(path).await?);
    }
    if let Some(path) = requirements {
        params.set("requirements", read_file(path).await?);
    }
    let files = read_named_files(files).await?;
    if !files.is_empty() {
        params.set("files", Value::Object(files));
    }
    Ok(params)
}

async fn create(session: Session, options: PlaybookV2CreateOptions) -> CliResult<()> {
    let mut params = Params::new();
    params.put("name", &options.name);
    params.extend(
        file_params(
            Some(&options.playbook_file),
            options.requirements_file.as_ref(),
            &options.files,
        )
        .await?,
    );
    let record = ANSIBLE_PLAYBOOKS_V2.create(&session, params).await?;
    session.printer().print_object_with(&record, Some(PLAYBOOK_VIEW))?;
    Ok(())
}

async fn update(session: Session, options: PlaybookV2UpdateOptions) -> CliResult<()> {
    let mut params = Params::new();
    params.put("name", &options.name);
    params.extend(
        file_params(
            options.playbook_file.as_ref(),
            options.requirements_file.as_ref(),
            &options.files,
        )
        .await?,
    );
    let params = params.ensure_update(&format!("ansibleplaybook {}", options.id))?;
    let record = ANSIBLE_PLAYBOOKS_V2
        .update(&session, &options.id, params)
        .await?;
    session.printer().print_object_with(&record, Some(PLAYBOOK_VIEW))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    fn temp_with(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "{contents}").expect("write");
        file
    }

    #[tokio::test]
    async fn create_is_a_plain_create_with_file_contents() -> Result<(), CliError> {
        let playbook = temp_with("- hosts: all\n  tasks: []\n");
        let requirements = temp_with("roles: []\n");
        let playbook_path = playbook.path().to_str().expect("utf-8").to_string();
        let requirements_path = requirements.path().to_str().expect("utf-8").to_string();

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/devtool/ansibleplaybooks")
                .json_body(json!({
                    "name": "bootstrap",
                    "playbook": "- hosts: all\n  tasks: []\n",
                    "requirements": "roles: []\n"
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ansibleplaybook":{"id":"pb2","playbook":"- hosts: all\n"}}"#);
        });

        run(
            &server,
            &[
                "ansibleplaybookv2-create",
                "bootstrap",
                &playbook_path,
                "--requirements-file",
                &requirements_path,
            ],
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn run_posts_to_devtool() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/devtool/ansibleplaybooks/pb2/run");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"ansibleplaybook":{"id":"pb2","status":"running"}}"#);
        });

        run(&server, &["ansibleplaybookv2-run", "pb2"]).await?;
        mock.assert();
        Ok(())
    }
}
