//! Platform upgrades, through the update service.

use clap::Args;
use serde::Serialize;

use crate::client::modules::UPDATES;
use crate::shell::payload::{BaseListOptions, is_false};
use crate::shell::resource_cmd::{EmptyOptions, ResourceCmd, ResourceIdOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct UpdatePerformOptions {
    /// ID of the pending update
    #[serde(skip)]
    pub id: String,

    /// Also upgrade compute nodes
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub cmp: bool,
}

crate::whole_struct!(UpdatePerformOptions);
crate::resource_id!(UpdatePerformOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let updates = ResourceCmd::new(&UPDATES);
    updates.list::<BaseListOptions>(registry, "List available updates")?;
    updates.show::<ResourceIdOptions>(registry, "Show details of an update")?;
    updates.perform::<UpdatePerformOptions>(registry, "perform", "Apply an update")?;
    updates.class_perform::<EmptyOptions>(
        registry,
        "refresh",
        "refresh",
        "Check for new updates",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn perform_sends_cmp_only_when_set() -> Result<(), CliError> {
        let server = MockServer::start();
        let with_cmp = server.mock(|when, then| {
            when.method("POST")
                .path("/update/updates/u1/perform")
                .json_body(json!({"cmp": true}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"update":{"id":"u1"}}"#);
        });

        run(&server, &["update-perform", "u1", "--cmp"]).await?;
        with_cmp.assert();
        Ok(())
    }

    #[tokio::test]
    async fn refresh_is_a_class_action() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/update/updates/refresh")
                .json_body(json!({}));
            then.status(200)
                .header("content-type", "application/json")
                .body("{}");
        });

        run(&server, &["update-refresh"]).await?;
        mock.assert();
        Ok(())
    }
}
