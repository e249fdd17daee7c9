use clap::Args;
use serde::Serialize;

use crate::client::modules::METER_ALERTS;
use crate::commands::monitor::{ALERT_LEVELS, COMPARATORS};
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct MeterAlertListOptions {
    /// Filter by alert type
    #[arg(long = "type")]
    #[serde(rename = "type")]
    pub alert_type: Option<String>,

    /// Filter by cloud provider
    #[arg(long)]
    pub provider: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct MeterAlertCreateOptions {
    /// Alert type, e.g. dailyResFee or monthResFee
    #[serde(rename = "type")]
    pub alert_type: String,

    /// Fee threshold
    pub threshold: f64,

    /// Comma-separated users to notify
    pub recipients: String,

    /// Only fees of this cloud provider
    #[arg(long)]
    pub provider: Option<String>,

    /// Only fees of this cloud account
    #[arg(long)]
    #[serde(rename = "account_id")]
    pub account: Option<String>,

    /// Only fees of this project
    #[arg(long)]
    #[serde(rename = "project_id")]
    pub project: Option<String>,

    /// Comparison against the threshold
    #[arg(long, value_parser = COMPARATORS)]
    pub comparator: Option<String>,

    /// Alert level
    #[arg(long, value_parser = ALERT_LEVELS)]
    pub level: Option<String>,

    /// Notification channel, e.g. email
    #[arg(long)]
    pub channel: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct MeterAlertUpdateOptions {
    /// ID of the alert
    #[serde(skip)]
    pub id: String,

    /// New threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// New comma-separated recipients
    #[arg(long)]
    pub recipients: Option<String>,

    /// New comparison
    #[arg(long, value_parser = COMPARATORS)]
    pub comparator: Option<String>,

    /// New level
    #[arg(long, value_parser = ALERT_LEVELS)]
    pub level: Option<String>,

    /// New notification channel
    #[arg(long)]
    pub channel: Option<String>,
}

crate::plain_list!(MeterAlertListOptions);
crate::whole_struct!(MeterAlertCreateOptions, MeterAlertUpdateOptions);
crate::resource_id!(MeterAlertUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let alerts = ResourceCmd::new(&METER_ALERTS);
    alerts.list::<MeterAlertListOptions>(registry, "List fee alerts")?;
    alerts.show::<ResourceIdOptions>(registry, "Show details of a fee alert")?;
    alerts.create::<MeterAlertCreateOptions>(registry, "Create a fee alert")?;
    alerts.update::<MeterAlertUpdateOptions>(registry, "Update a fee alert")?;
    alerts.delete::<ResourceIdsOptions>(registry, "Delete fee alerts")?;
    alerts.perform::<ResourceIdOptions>(registry, "enable", "Enable a fee alert")?;
    alerts.perform::<ResourceIdOptions>(registry, "disable", "Disable a fee alert")
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn create_renames_scope_flags() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/meter/meteralerts").json_body(json!({
                "type": "dailyResFee",
                "threshold": 500.0,
                "recipients": "alice,bob",
                "account_id": "acc1"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"meteralert":{"id":"ma1"}}"#);
        });

        run(
            &server,
            &["meteralert-create", "dailyResFee", "500", "alice,bob", "--account", "acc1"],
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn enable_posts_the_action() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/meter/meteralerts/ma1/enable");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"meteralert":{"id":"ma1","status":"enabled"}}"#);
        });

        run(&server, &["meteralert-enable", "ma1"]).await?;
        mock.assert();
        Ok(())
    }
}
