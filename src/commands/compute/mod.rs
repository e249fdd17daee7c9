//! Commands against the compute service.

mod baremetal;
mod cloudproviders;
mod dbinstances;
mod disks;
mod elastic_caches;
mod host_networks;
mod loadbalancer_acls;
mod loadbalancer_listener_rules;
mod nat_gateways;
mod policy_definitions;
mod scaling_groups;
mod schedtags;
mod server_skus;
mod service_catalogs;
mod snapshots;
mod storage_caches;
mod wires;

use clap::Args;
use serde::Serialize;

use crate::shell::{Registry, RegistryError};

/// Billing mode shared by every purchasable resource.
#[derive(Debug, Args, Serialize)]
pub struct BillingOptions {
    /// Billing mode
    #[arg(long, value_parser = ["postpaid", "prepaid"])]
    pub billing_type: Option<String>,

    /// Prepaid duration, e.g. 1M or 1Y
    #[arg(long)]
    pub duration: Option<String>,
}

/// `<keyword>-renew ID DURATION`
#[derive(Debug, Args, Serialize)]
pub struct RenewOptions {
    /// ID or name of the resource
    #[serde(skip)]
    pub id: String,

    /// Renewal duration, e.g. 1M or 1Y
    pub duration: String,
}

crate::whole_struct!(RenewOptions);
crate::resource_id!(RenewOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    baremetal::register(registry)?;
    cloudproviders::register(registry)?;
    dbinstances::register(registry)?;
    disks::register(registry)?;
    elastic_caches::register(registry)?;
    host_networks::register(registry)?;
    loadbalancer_acls::register(registry)?;
    loadbalancer_listener_rules::register(registry)?;
    nat_gateways::register(registry)?;
    policy_definitions::register(registry)?;
    scaling_groups::register(registry)?;
    schedtags::register(registry)?;
    server_skus::register(registry)?;
    service_catalogs::register(registry)?;
    snapshots::register(registry)?;
    storage_caches::register(registry)?;
    wires::register(registry)
}
