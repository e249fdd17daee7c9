use clap::Args;
use serde::Serialize;

use crate::client::Session;
use crate::client::modules::{WIRES, ZONES};
use crate::shell::payload::{BaseListOptions, ListOptions, ToParams};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct WireListOptions {
    /// List wires in this zone only
    #[arg(long)]
    #[serde(skip)]
    pub zone: Option<String>,

    /// Filter by VPC
    #[arg(long)]
    pub vpc: Option<String>,

    /// Filter by attached host
    #[arg(long)]
    pub host: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for WireListOptions {}

impl ListOptions for WireListOptions {
    fn context_id(&self) -> Option<&str> {
        self.zone.as_deref()
    }
}

#[derive(Debug, Args, Serialize)]
pub struct WireCreateOptions {
    /// Zone the wire belongs to
    #[serde(skip)]
    pub zone: String,

    /// Name of the wire
    pub name: String,

    /// Bandwidth in Mbps
    #[serde(rename = "bandwidth")]
    pub bw: u64,

    /// Maximum transmission unit
    #[arg(long)]
    pub mtu: Option<u64>,

    /// VPC the wire belongs to
    #[arg(long)]
    pub vpc: Option<String>,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct WireUpdateOptions {
    /// ID or name of the wire
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New bandwidth in Mbps
    #[arg(long)]
    #[serde(rename = "bandwidth")]
    pub bw: Option<u64>,

    /// New MTU
    #[arg(long)]
    pub mtu: Option<u64>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

crate::whole_struct!(WireCreateOptions, WireUpdateOptions);
crate::resource_id!(WireUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let wires = ResourceCmd::new(&WIRES).context(&ZONES);
    wires.list::<WireListOptions>(registry, "List wires")?;
    wires.show::<ResourceIdOptions>(registry, "Show details of a wire")?;
    registry.register("wire-create", "Create a wire in a zone", wire_create)?;
    wires.update::<WireUpdateOptions>(registry, "Update a wire")?;
    wires.delete::<ResourceIdsOptions>(registry, "Delete wires")?;
    wires.perform::<ResourceIdOptions>(
        registry,
        "merge-network",
        "Merge the networks on a wire",
    )
}

async fn wire_create(session: Session, options: WireCreateOptions) -> CliResult<()> {
    let record = WIRES
        .create_in_context(&session, options.params()?, &ZONES, &options.zone)
        .await?;
    session.printer().print_object(&record)?;
    Ok(())
}
