use clap::Args;
use serde::Serialize;

use crate::client::modules::HOST_NETWORKS;
use crate::shell::payload::{BaseListOptions, ToParams};
use crate::shell::resource_cmd::{JointCmd, JointListOptions, JointPair};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct HostNetworkListOptions {
    /// Networks attached to this host
    #[arg(long)]
    #[serde(skip)]
    pub host: Option<String>,

    /// Hosts attached to this network
    #[arg(long)]
    #[serde(skip)]
    pub network: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for HostNetworkListOptions {}

impl JointListOptions for HostNetworkListOptions {
    fn master_id(&self) -> Option<&str> {
        self.host.as_deref()
    }

    fn slave_id(&self) -> Option<&str> {
        self.network.as_deref()
    }
}

#[derive(Debug, Args, Serialize)]
pub struct HostNetworkShowOptions {
    /// ID or name of the host
    #[serde(skip)]
    pub host: String,

    /// ID or name of the network
    #[serde(skip)]
    pub network: String,
}

impl ToParams for HostNetworkShowOptions {}

impl JointPair for HostNetworkShowOptions {
    fn master_id(&self) -> &str {
        &self.host
    }

    fn slave_id(&self) -> &str {
        &self.network
    }
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let joint = JointCmd::new(&HOST_NETWORKS).keyword("host-network");
    joint.list::<HostNetworkListOptions>(registry, "List host and network attachments")?;
    joint.show::<HostNetworkShowOptions>(registry, "Show one host and network attachment")
}
