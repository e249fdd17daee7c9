//! Baremetal host events and the host actions specific to baremetal.

use clap::Args;
use serde::Serialize;
use serde_json::Value;

use crate::client::Session;
use crate::client::modules::{BAREMETAL_EVENTS, HOSTS};
use crate::shell::payload::{BaseListOptions, Params};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions};
use crate::shell::{CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct BaremetalEventListOptions {
    /// Filter by host
    #[arg(long)]
    pub host: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args)]
pub struct BaremetalEventCreateOptions {
    /// ID or name of the host the event happened on
    pub host: String,

    /// Event message
    pub message: String,

    /// Vendor event id
    #[arg(long)]
    pub event_id: Option<String>,

    /// Event type
    #[arg(long = "type")]
    pub event_type: Option<String>,

    /// Event severity
    #[arg(long)]
    pub severity: Option<String>,
}

crate::plain_list!(BaremetalEventListOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let events = ResourceCmd::new(&BAREMETAL_EVENTS).keyword("baremetal-event");
    events.list::<BaremetalEventListOptions>(registry, "List baremetal events")?;
    registry.register(
        events.name("create"),
        "Record an event against a baremetal host",
        create_event,
    )?;

    let hosts = ResourceCmd::new(&HOSTS).keyword("baremetal");
    hosts.perform::<ResourceIdOptions>(registry, "prepare", "Prepare a baremetal host")?;
    hosts.perform::<ResourceIdOptions>(
        registry,
        "ipmi-probe",
        "Probe the IPMI interface of a baremetal host",
    )?;
    hosts.perform::<ResourceIdOptions>(
        registry,
        "maintenance",
        "Put a baremetal host into maintenance",
    )?;
    hosts.perform::<ResourceIdOptions>(
        registry,
        "unmaintenance",
        "Take a baremetal host out of maintenance",
    )
}

/// The host record identifies the event's source; its IPMI address falls
/// back to the access address.
async fn create_event(session: Session, options: BaremetalEventCreateOptions) -> CliResult<()> {
    let host = HOSTS.get(&session, &options.host, None).await?;
    let field = |key: &str| host.get(key).and_then(Value::as_str).unwrap_or_default();
    let ipmi_ip = Some(field("ipmi_ip"))
        .filter(|ip| !ip.is_empty())
        .unwrap_or_else(|| field("access_ip"));

    let mut params = Params::new();
    params
        .put("host_id", field("id"))
        .put("host_name", field("name"))
        .put("ipmi_ip", ipmi_ip)
        .put("message", &options.message)
        .put("event_id", &options.event_id)
        .put("type", &options.event_type)
        .put("severity", &options.severity);

    let record = BAREMETAL_EVENTS.create(&session, params).await?;
    session.printer().print_object(&record)?;
    Ok(())
}
