use clap::Args;
use serde::Serialize;

use super::BillingOptions;
use crate::client::modules::NAT_GATEWAYS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct NatGatewayListOptions {
    /// Filter by VPC
    #[arg(long)]
    pub vpc: Option<String>,

    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct NatGatewayCreateOptions {
    /// Name of the gateway
    pub name: String,

    /// VPC the gateway serves
    pub vpc: String,

    /// Network the gateway sits on
    pub network: String,

    /// Gateway size, e.g. small
    #[arg(long)]
    pub nat_spec: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub billing: BillingOptions,
}

crate::plain_list!(NatGatewayListOptions);
crate::whole_struct!(NatGatewayCreateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let gateways = ResourceCmd::new(&NAT_GATEWAYS);
    gateways.list::<NatGatewayListOptions>(registry, "List NAT gateways")?;
    gateways.show::<ResourceIdOptions>(registry, "Show details of a NAT gateway")?;
    gateways.create::<NatGatewayCreateOptions>(registry, "Create a NAT gateway")?;
    gateways.delete::<ResourceIdsOptions>(registry, "Delete NAT gateways")?;
    gateways.perform::<ResourceIdOptions>(registry, "purge", "Purge a NAT gateway record")?;
    gateways.perform::<ResourceIdOptions>(
        registry,
        "syncstatus",
        "Resync the status of a NAT gateway",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn create_carries_billing() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/compute/natgateways").json_body(json!({
                "name": "nat1",
                "vpc": "vpc1",
                "network": "net1",
                "billing_type": "prepaid",
                "duration": "1M"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"natgateway":{"id":"ng1"}}"#);
        });

        run(
            &server,
            &[
                "natgateway-create",
                "nat1",
                "vpc1",
                "net1",
                "--billing-type",
                "prepaid",
                "--duration",
                "1M",
            ],
        )
        .await?;
        mock.assert();
        Ok(())
    }
}
