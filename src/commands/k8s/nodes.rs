use clap::Args;
use serde::Serialize;

use crate::client::modules::K8S_NODES;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::ResourceCmd;
use crate::shell::{Registry, RegistryError};

/// Nodes are only addressable inside a cluster.
#[derive(Debug, Args, Serialize)]
pub struct NodeListOptions {
    /// ID or name of the cluster
    #[arg(long)]
    pub cluster: String,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct NodeOptions {
    /// Name of the node
    #[arg(value_name = "NAME")]
    #[serde(skip)]
    pub id: String,

    /// ID or name of the cluster
    #[arg(long)]
    pub cluster: String,
}

crate::plain_list!(NodeListOptions);
crate::whole_struct!(NodeOptions);
crate::resource_id!(NodeOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let nodes = ResourceCmd::new(&K8S_NODES);
    nodes.list::<NodeListOptions>(registry, "List nodes of a cluster")?;
    nodes.show::<NodeOptions>(registry, "Show details of a node")?;
    nodes.perform::<NodeOptions>(registry, "cordon", "Mark a node unschedulable")?;
    nodes.perform::<NodeOptions>(registry, "uncordon", "Mark a node schedulable")
}
