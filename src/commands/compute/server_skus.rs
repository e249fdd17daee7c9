use clap::{ArgAction, Args};
use serde::Serialize;

use crate::client::modules::SERVER_SKUS;
use crate::shell::payload::{BaseListOptions, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

const SALE_STATUS: [&str; 2] = ["available", "soldout"];

#[derive(Debug, Args, Serialize)]
pub struct ServerSkuListOptions {
    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    /// Filter by zone
    #[arg(long)]
    pub zone: Option<String>,

    /// Filter by provider
    #[arg(long)]
    pub provider: Option<String>,

    /// Filter by number of CPU cores
    #[arg(long)]
    pub cpu_core_count: Option<u32>,

    /// Filter by memory size in MiB
    #[arg(long)]
    pub memory_size_mb: Option<u64>,

    /// Filter by postpaid sale status
    #[arg(long, value_parser = SALE_STATUS)]
    pub postpaid_status: Option<String>,

    /// Filter by prepaid sale status
    #[arg(long, value_parser = SALE_STATUS)]
    pub prepaid_status: Option<String>,

    /// Only SKUs that can be used for new servers
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub usable: bool,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ServerSkuCreateOptions {
    /// Number of CPU cores
    #[serde(rename = "cpu_core_count")]
    pub cpu: u32,

    /// Memory size in MiB
    #[serde(rename = "memory_size_mb")]
    pub mem: u64,

    /// Name of the SKU; generated from the size when omitted
    #[arg(long)]
    pub name: Option<String>,

    /// Operating system family
    #[arg(long)]
    pub os_name: Option<String>,

    /// Instance type family, e.g. g1
    #[arg(long)]
    pub instance_type_family: Option<String>,

    /// Local disk category
    #[arg(long)]
    pub local_category: Option<String>,

    /// System disk type
    #[arg(long)]
    pub sys_disk_type: Option<String>,

    /// Data disk types, comma separated
    #[arg(long)]
    pub data_disk_types: Option<String>,

    /// Zone the SKU is offered in
    #[arg(long)]
    pub zone: Option<String>,

    /// Region the SKU is offered in
    #[arg(long)]
    pub cloudregion: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct ServerSkuUpdateOptions {
    /// ID or name of the SKU
    #[serde(skip)]
    pub id: String,

    /// Postpaid sale status
    #[arg(long, value_parser = SALE_STATUS)]
    pub postpaid_status: Option<String>,

    /// Prepaid sale status
    #[arg(long, value_parser = SALE_STATUS)]
    pub prepaid_status: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct ServerSkuSyncOptions {
    /// Provider to sync SKUs from
    #[arg(long)]
    pub provider: Option<String>,

    /// Region to sync; repeatable
    #[arg(long, action = ArgAction::Append)]
    pub cloudregion: Vec<String>,
}

crate::plain_list!(ServerSkuListOptions);
crate::whole_struct!(ServerSkuCreateOptions, ServerSkuUpdateOptions, ServerSkuSyncOptions);
crate::resource_id!(ServerSkuUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let skus = ResourceCmd::new(&SERVER_SKUS).keyword("server-sku");
    skus.list::<ServerSkuListOptions>(registry, "List server SKUs")?;
    skus.show::<ResourceIdOptions>(registry, "Show details of a server SKU")?;
    skus.create::<ServerSkuCreateOptions>(registry, "Create a server SKU")?;
    skus.update::<ServerSkuUpdateOptions>(registry, "Update the sale status of a server SKU")?;
    skus.delete::<ResourceIdsOptions>(registry, "Delete server SKUs")?;
    skus.class_perform::<ServerSkuSyncOptions>(
        registry,
        "sync",
        "sync-skus",
        "Sync server SKUs from a provider",
    )
}
