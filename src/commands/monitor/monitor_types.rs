use clap::Args;
use serde::Serialize;

use crate::client::modules::MONITOR_TYPES;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct MonitorTypeCreateOptions {
    /// Name of the monitor type
    pub name: String,

    /// Name shown in the console
    #[arg(long)]
    pub display_name: Option<String>,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct MonitorTypeUpdateOptions {
    /// ID or name of the monitor type
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New display name
    #[arg(long)]
    pub display_name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

crate::whole_struct!(MonitorTypeCreateOptions, MonitorTypeUpdateOptions);
crate::resource_id!(MonitorTypeUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let types = ResourceCmd::new(&MONITOR_TYPES);
    types.list::<BaseListOptions>(registry, "List monitor types")?;
    types.show::<ResourceIdOptions>(registry, "Show details of a monitor type")?;
    types.create::<MonitorTypeCreateOptions>(registry, "Create a monitor type")?;
    types.update::<MonitorTypeUpdateOptions>(registry, "Update a monitor type")?;
    types.delete::<ResourceIdsOptions>(registry, "Delete monitor types")
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn create_sends_only_given_fields() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/monitor/monitortypes")
                .json_body(json!({"name": "redis", "display_name": "Redis"}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"monitortype":{"id":"m1","name":"redis"}}"#);
        });

        run(&server, &["monitortype-create", "redis", "--display-name", "Redis"]).await?;
        mock.assert();
        Ok(())
    }
}
