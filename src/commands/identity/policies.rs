//! RBAC policies. Policy documents are read from and saved to local files.

use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::Serialize;
use serde_json::Value;

use crate::client::Session;
use crate::client::modules::POLICIES;
use crate::commands::input;
use crate::shell::payload::{BaseListOptions, EnabledState, Params, SystemState, ToParams};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliError, CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct PolicyListOptions {
    /// Filter by policy type
    #[arg(long = "type")]
    #[serde(rename = "type")]
    pub policy_type: Option<String>,

    /// Only policies bound to this role
    #[arg(long)]
    pub role: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args)]
pub struct PolicyShowOptions {
    /// ID or name of the policy
    pub id: String,

    /// Encoding of the policy document
    #[arg(long, default_value = "yaml", value_parser = ["yaml", "json"])]
    pub format: String,

    /// Also save the policy document to this file
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Debug, Args, Serialize)]
pub struct PolicyCreateOptions {
    /// Name of the policy
    pub name: String,

    /// File holding the policy document
    #[serde(skip)]
    pub file: PathBuf,

    /// Domain owning the policy
    #[arg(long)]
    #[serde(rename = "project_domain_id")]
    pub domain: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub enabled: EnabledState,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Scope the policy applies at
    #[arg(long)]
    pub scope: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub system: SystemState,

    /// Organization tree node the policy is limited to; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub org_node_id: Vec<String>,
}

/// Shared by `policy-update` and `policy-patch`.
#[derive(Debug, Args, Serialize)]
pub struct PolicyUpdateOptions {
    /// ID or name of the policy
    #[serde(skip)]
    pub id: String,

    /// File holding the new policy document
    #[arg(long)]
    #[serde(skip)]
    pub file: Option<PathBuf>,

    /// New policy type
    #[arg(long = "type")]
    #[serde(rename = "type")]
    pub policy_type: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub enabled: EnabledState,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub system: SystemState,

    /// Organization tree node the policy is limited to; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub org_node_id: Vec<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct PolicyPublicOptions {
    /// ID or name of the policy
    #[serde(skip)]
    pub id: String,

    /// Sharing scope
    #[arg(long, value_parser = ["system", "domain"])]
    pub scope: Option<String>,

    /// Domain to share with; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub shared_domains: Vec<String>,
}

crate::plain_list!(PolicyListOptions);
crate::whole_struct!(PolicyCreateOptions, PolicyUpdateOptions, PolicyPublicOptions);
crate::resource_id!(PolicyPublicOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let policies = ResourceCmd::new(&POLICIES);
    policies.list::<PolicyListOptions>(registry, "List policies")?;
    registry.register(policies.name("show"), "Show a policy", show)?;
    registry.register(
        policies.name("create"),
        "Create a policy from a document file",
        create,
    )?;
    registry.register(policies.name("update"), "Update a policy", update)?;
    registry.register(policies.name("patch"), "Patch a policy", update)?;
    policies.perform::<PolicyPublicOptions>(registry, "public", "Share a policy")?;
    policies.perform::<ResourceIdOptions>(registry, "private", "Stop sharing a policy")?;
    policies.delete::<ResourceIdsOptions>(registry, "Delete policies")?;
    registry.register(
        policies.name("export"),
        "Print a policy record as JSON",
        export,
    )
}

async fn show(session: Session, options: PolicyShowOptions) -> CliResult<()> {
    let mut query = Params::new();
    query.put("format", &options.format);
    let record = POLICIES.get(&session, &options.id, Some(&query)).await?;
    session.printer().print_object(&record)?;

    if let Some(path) = &options.save {
        let document = match record.get("policy") {
            Some(Value::String(text)) => text.clone(),
            Some(other) => serde_json::to_string_pretty(other)
                .map_err(|err| CliError::Decode(format!("policy {}: {err}", options.id)))?,
            None => {
                return Err(CliError::Decode(format!(
                    "policy {}: record has no policy document",
                    options.id
                )));
            }
        };
        input::write_file(path, &document).await?;
        tracing::debug!(path = %path.display(), "policy document saved");
    }
    Ok(())
}

async fn create(session: Session, options: PolicyCreateOptions) -> CliResult<()> {
    let document = input::read_file(&options.file).await?;
    let mut params = options.params()?;
    params
        .set("type", options.name.as_str())
        .set("policy", document);
    let record = POLICIES.create(&session, params).await?;
    session.printer().print_object(&record)?;
    Ok(())
}

async fn update(session: Session, options: PolicyUpdateOptions) -> CliResult<()> {
    let mut params = options.params()?;
    if let Some(path) = &options.file {
        params.set("policy", input::read_file(path).await?);
    }
    let params = params.ensure_update(&format!("policy {}", options.id))?;
    let record = POLICIES.update(&session, &options.id, params).await?;
    session.printer().print_object(&record)?;
    Ok(())
}

async fn export(session: Session, options: ResourceIdOptions) -> CliResult<()> {
    let record = POLICIES.get(&session, &options.id, None).await?;
    session.printer().print_text(&record)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn create_reads_the_document_file() -> Result<(), CliError> {
        let mut file = tempfile::NamedTempFile::new().expect("tmp");
        write!(file, "scope: project").expect("write");
        let path = file.path().to_str().expect("utf-8 path").to_string();

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/identity/policies").json_body(json!({
                "name": "viewer",
                "enabled": true,
                "is_system": false,
                "type": "viewer",
                "policy": "scope: project"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"policy":{"id":"p1"}}"#);
        });

        run(&server, &["policy-create", "viewer", &path, "--enabled", "--no-system"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn create_with_missing_file_never_calls_out() {
        let server = MockServer::start();
        let err = run(&server, &["policy-create", "viewer", "/nonexistent/policy.yaml"])
            .await
            .expect_err("missing file");
        assert!(matches!(err, CliError::InputFile { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn update_and_patch_share_the_guard() -> Result<(), CliError> {
        let server = MockServer::start();
        for verb in ["policy-update", "policy-patch"] {
            let err = run(&server, &[verb, "p1"]).await.expect_err("empty");
            assert!(matches!(err, CliError::NothingToUpdate(_)), "{verb}");
        }

        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path("/identity/policies/p1")
                .json_body(json!({"enabled": false}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"policy":{"id":"p1"}}"#);
        });
        run(&server, &["policy-patch", "p1", "--disabled"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn show_saves_the_yaml_document() -> Result<(), CliError> {
        let dir = tempfile::tempdir().expect("tmp");
        let target = dir.path().join("viewer.yaml");
        let target_arg = target.to_str().expect("utf-8 path").to_string();

        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/identity/policies/p1")
                .query_param("format", "yaml");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"policy":{"id":"p1","policy":"scope: project\n"}}"#);
        });

        run(&server, &["policy-show", "p1", "--save", &target_arg]).await?;
        mock.assert();
        let saved = std::fs::read_to_string(&target).expect("saved");
        assert_eq!(saved, "scope: project\n");
        Ok(())
    }
}
