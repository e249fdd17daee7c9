use clap::{ArgAction, Args};
use serde::Serialize;

use crate::client::modules::CLOUDPROVIDERS;
use crate::shell::payload::{BaseListOptions, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct CloudproviderListOptions {
    /// Filter by cloud account
    #[arg(long)]
    #[serde(rename = "cloudaccount")]
    pub account: Option<String>,

    /// Filter by provider; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub provider: Vec<String>,

    /// Only providers that can be used for new resources
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub usable: bool,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct CloudproviderUpdateOptions {
    /// ID or name of the cloud provider
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct CloudproviderSyncOptions {
    /// ID or name of the cloud provider
    #[serde(skip)]
    pub id: String,

    /// Resync everything rather than only changes
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub full_sync: bool,

    /// Restrict the sync to these regions; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub region: Vec<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct CloudproviderChangeProjectOptions {
    /// ID or name of the cloud provider
    #[serde(skip)]
    pub id: String,

    /// Project to move the provider into
    pub project: String,
}

#[derive(Debug, Args, Serialize)]
pub struct CloudproviderStorageClassesOptions {
    /// ID or name of the cloud provider
    #[serde(skip)]
    pub id: String,

    /// Region to query storage classes in
    #[arg(long)]
    pub cloudregion: Option<String>,
}

crate::plain_list!(CloudproviderListOptions);
crate::whole_struct!(
    CloudproviderUpdateOptions,
    CloudproviderSyncOptions,
    CloudproviderChangeProjectOptions,
    CloudproviderStorageClassesOptions,
);
crate::resource_id!(
    CloudproviderUpdateOptions,
    CloudproviderSyncOptions,
    CloudproviderChangeProjectOptions,
    CloudproviderStorageClassesOptions,
);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let providers = ResourceCmd::new(&CLOUDPROVIDERS).keyword("cloud-provider");
    providers.list::<CloudproviderListOptions>(registry, "List cloud providers")?;
    providers.show::<ResourceIdOptions>(registry, "Show details of a cloud provider")?;
    providers.update::<CloudproviderUpdateOptions>(registry, "Update a cloud provider")?;
    providers.delete::<ResourceIdsOptions>(registry, "Delete cloud providers")?;
    providers.perform::<ResourceIdOptions>(registry, "enable", "Enable a cloud provider")?;
    providers.perform::<ResourceIdOptions>(registry, "disable", "Disable a cloud provider")?;
    providers.perform::<CloudproviderSyncOptions>(
        registry,
        "sync",
        "Sync resources from a cloud provider",
    )?;
    providers.perform::<CloudproviderChangeProjectOptions>(
        registry,
        "change-project",
        "Move a cloud provider to another project",
    )?;
    providers.get_specific::<CloudproviderStorageClassesOptions>(
        registry,
        "storage-classes",
        "storage-classes",
        "Show storage classes offered by a cloud provider",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn sync_sends_regions_as_list() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/cloudproviders/cp1/sync")
                .json_body(json!({"full_sync": true, "region": ["r1", "r2"]}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"cloudprovider":{"id":"cp1"}}"#);
        });

        run(
            &server,
            &["cloud-provider-sync", "cp1", "--full-sync", "--region", "r1", "--region", "r2"],
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn storage_classes_query_the_sub_resource() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/compute/cloudproviders/cp1/storage-classes")
                .query_param("cloudregion", "r1");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"storage_classes":["standard","archive"]}"#);
        });

        run(&server, &["cloud-provider-storage-classes", "cp1", "--cloudregion", "r1"]).await?;
        mock.assert();
        Ok(())
    }
}
