use clap::Args;
use serde::Serialize;

use crate::client::modules::TENANTS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct TenantListOptions {
    /// Filter by domain
    #[arg(long)]
    pub domain: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct TenantCreateOptions {
    /// Name of the tenant
    pub name: String,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Domain the tenant belongs to
    #[arg(long)]
    pub domain: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct TenantUpdateOptions {
    /// ID or name of the tenant
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

crate::plain_list!(TenantListOptions);
crate::whole_struct!(TenantCreateOptions, TenantUpdateOptions);
crate::resource_id!(TenantUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let tenants = ResourceCmd::new(&TENANTS);
    tenants.list::<TenantListOptions>(registry, "List tenants")?;
    tenants.show::<ResourceIdOptions>(registry, "Show details of a tenant")?;
    tenants.create::<TenantCreateOptions>(registry, "Create a tenant")?;
    tenants.update::<TenantUpdateOptions>(registry, "Update a tenant")?;
    tenants.delete::<ResourceIdsOptions>(registry, "Delete tenants")
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn update_puts_renamed_fields() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path("/identity/tenants/t1")
                .json_body(json!({"description": "billing team"}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"tenant":{"id":"t1"}}"#);
        });

        run(&server, &["tenant-update", "t1", "--desc", "billing team"]).await?;
        mock.assert();
        Ok(())
    }
}
