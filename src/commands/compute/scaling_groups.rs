use clap::{ArgAction, Args};
use serde::Serialize;

use crate::client::modules::SCALING_GROUPS;
use crate::shell::payload::{BaseListOptions, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct ScalingGroupListOptions {
    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    /// Filter by network
    #[arg(long)]
    pub network: Option<String>,

    /// Filter by guest template
    #[arg(long)]
    pub guest_template: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ScalingGroupCreateOptions {
    /// Name of the group
    pub name: String,

    /// Region the instances run in
    #[arg(long)]
    pub cloudregion: String,

    /// Template new instances are created from
    #[arg(long)]
    pub guest_template: String,

    /// Network for new instances; repeatable
    #[arg(long, required = true, action = ArgAction::Append)]
    #[serde(rename = "networks")]
    pub network: Vec<String>,

    /// Lower bound on the instance count
    #[arg(long)]
    pub min_instance_number: u32,

    /// Upper bound on the instance count
    #[arg(long)]
    pub max_instance_number: u32,

    /// Instance count to hold at rest
    #[arg(long)]
    pub desire_instance_number: u32,

    /// Where new instances are placed
    #[arg(long, value_parser = ["balanced"])]
    pub expansion_principle: Option<String>,

    /// Which instances are removed first
    #[arg(long, value_parser = ["earliest", "latest"])]
    pub shrink_principle: Option<String>,

    /// How instance health is judged
    #[arg(long, value_parser = ["normal", "loadbalancer"])]
    pub health_check_mode: Option<String>,

    /// Seconds between health checks
    #[arg(long)]
    pub health_check_cycle: Option<u32>,

    /// Seconds an instance may stay unhealthy before removal
    #[arg(long)]
    pub health_check_gov: Option<u32>,

    /// Load balancer fronting the group
    #[arg(long)]
    pub loadbalancer: Option<String>,

    /// Backend group instances join
    #[arg(long)]
    pub backend_group: Option<String>,

    /// Port instances serve on behind the load balancer
    #[arg(long)]
    pub loadbalancer_backend_port: Option<u32>,
}

#[derive(Debug, Args, Serialize)]
pub struct ScalingGroupDeleteOptions {
    /// IDs or names of the groups
    #[arg(required = true)]
    #[serde(skip)]
    pub ids: Vec<String>,

    /// Also delete the instances the group created
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub clear_instance: bool,
}

crate::plain_list!(ScalingGroupListOptions);
crate::whole_struct!(ScalingGroupCreateOptions, ScalingGroupDeleteOptions);
crate::resource_ids!(ScalingGroupDeleteOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let groups = ResourceCmd::new(&SCALING_GROUPS).keyword("scaling-group");
    groups.list::<ScalingGroupListOptions>(registry, "List scaling groups")?;
    groups.show::<ResourceIdOptions>(registry, "Show details of a scaling group")?;
    groups.create::<ScalingGroupCreateOptions>(registry, "Create a scaling group")?;
    groups.delete::<ScalingGroupDeleteOptions>(registry, "Delete scaling groups")?;
    groups.perform::<ResourceIdOptions>(registry, "enable", "Enable a scaling group")?;
    groups.perform::<ResourceIdOptions>(registry, "disable", "Disable a scaling group")
}
