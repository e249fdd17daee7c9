use clap::{ArgAction, Args};
use serde::Serialize;

use super::{ALERT_LEVELS, COMPARATORS, comma_joined};
use crate::client::modules::NODE_ALERTS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

const NODE_TYPES: [&str; 2] = ["host", "guest"];

#[derive(Debug, Args, Serialize)]
pub struct NodeAlertListOptions {
    /// Filter by node name
    #[arg(long)]
    pub node_name: Option<String>,

    /// Filter by node type
    #[arg(long = "type", value_parser = NODE_TYPES)]
    #[serde(rename = "type")]
    pub node_type: Option<String>,

    /// Filter by metric, e.g. cpu.usage_active
    #[arg(long)]
    pub metric: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct NodeAlertCreateOptions {
    /// Metric as <measurement>.<field>, e.g. cpu.usage_active
    pub metric: String,

    /// Name of the host or guest to watch
    pub node_name: String,

    /// Kind of node
    #[arg(value_parser = NODE_TYPES)]
    #[serde(rename = "type")]
    pub node_type: String,

    /// Alert threshold
    pub threshold: f64,

    /// Evaluation window, e.g. 5m
    #[arg(long)]
    pub period: Option<String>,

    /// Comparison against the threshold
    #[arg(long, value_parser = COMPARATORS)]
    pub comparator: Option<String>,

    /// Alert level
    #[arg(long, value_parser = ALERT_LEVELS)]
    pub level: Option<String>,

    /// Notification channel, e.g. email
    #[arg(long)]
    pub channel: Option<String>,

    /// User to notify; repeatable
    #[arg(long, action = ArgAction::Append)]
    #[serde(serialize_with = "comma_joined")]
    pub recipients: Vec<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct NodeAlertUpdateOptions {
    /// ID of the alert
    #[serde(skip)]
    pub id: String,

    /// New metric
    #[arg(long)]
    pub metric: Option<String>,

    /// New threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// New evaluation window
    #[arg(long)]
    pub period: Option<String>,

    /// New comparison
    #[arg(long, value_parser = COMPARATORS)]
    pub comparator: Option<String>,

    /// New level
    #[arg(long, value_parser = ALERT_LEVELS)]
    pub level: Option<String>,

    /// New notification channel
    #[arg(long)]
    pub channel: Option<String>,

    /// Replace the recipients; repeatable
    #[arg(long, action = ArgAction::Append)]
    #[serde(serialize_with = "comma_joined")]
    pub recipients: Vec<String>,
}

crate::plain_list!(NodeAlertListOptions);
crate::whole_struct!(NodeAlertCreateOptions, NodeAlertUpdateOptions);
crate::resource_id!(NodeAlertUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let alerts = ResourceCmd::new(&NODE_ALERTS);
    alerts.list::<NodeAlertListOptions>(registry, "List node alerts")?;
    alerts.show::<ResourceIdOptions>(registry, "Show details of a node alert")?;
    alerts.create::<NodeAlertCreateOptions>(registry, "Create a node alert")?;
    alerts.update::<NodeAlertUpdateOptions>(registry, "Update a node alert")?;
    alerts.delete::<ResourceIdsOptions>(registry, "Delete node alerts")?;
    alerts.perform::<ResourceIdOptions>(registry, "enable", "Enable a node alert")?;
    alerts.perform::<ResourceIdOptions>(registry, "disable", "Disable a node alert")
}
