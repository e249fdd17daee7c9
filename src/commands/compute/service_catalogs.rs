use clap::Args;
use serde::Serialize;

use crate::client::modules::SERVICE_CATALOGS;
use crate::shell::payload::{BaseListOptions, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct ServiceCatalogListOptions {
    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ServiceCatalogCreateOptions {
    /// Name of the catalog entry
    pub name: String,

    /// Guest template the entry deploys
    pub guest_template: String,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Icon shown in the catalog
    #[arg(long)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct ServiceCatalogUpdateOptions {
    /// ID or name of the catalog entry
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// New icon
    #[arg(long)]
    pub icon_url: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct ServiceCatalogDeployOptions {
    /// ID or name of the catalog entry
    #[serde(skip)]
    pub id: String,

    /// Name of the new server
    #[arg(long)]
    pub name: Option<String>,

    /// Name pattern used when deploying several servers
    #[arg(long)]
    pub generate_name: Option<String>,

    /// Number of servers to deploy
    #[arg(long)]
    pub count: Option<u32>,

    /// Start servers right after creation
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub auto_start: bool,
}

crate::plain_list!(ServiceCatalogListOptions);
crate::whole_struct!(
    ServiceCatalogCreateOptions,
    ServiceCatalogUpdateOptions,
    ServiceCatalogDeployOptions,
);
crate::resource_id!(ServiceCatalogUpdateOptions, ServiceCatalogDeployOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let catalogs = ResourceCmd::new(&SERVICE_CATALOGS).keyword("service-catalog");
    catalogs.list::<ServiceCatalogListOptions>(registry, "List service catalog entries")?;
    catalogs.show::<ResourceIdOptions>(registry, "Show details of a service catalog entry")?;
    catalogs.create::<ServiceCatalogCreateOptions>(registry, "Create a service catalog entry")?;
    catalogs.update::<ServiceCatalogUpdateOptions>(registry, "Update a service catalog entry")?;
    catalogs.delete::<ResourceIdsOptions>(registry, "Delete service catalog entries")?;
    catalogs.perform::<ServiceCatalogDeployOptions>(
        registry,
        "deploy",
        "Deploy servers from a service catalog entry",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn deploy_sends_count() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/servicecatalogs/sc1/deploy")
                .json_body(json!({"generate_name": "web-##", "count": 3}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"servicecatalog":{"id":"sc1"}}"#);
        });

        run(
            &server,
            &["service-catalog-deploy", "sc1", "--generate-name", "web-##", "--count", "3"],
        )
        .await?;
        mock.assert();
        Ok(())
    }
}
