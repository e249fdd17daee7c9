//! Read-only billing reports. Days are given as `YYYYMMDD`.

use clap::Args;
use serde::Serialize;

use crate::client::modules::{BILL_CONDITIONS, RES_RESULTS, RESOURCE_FEES};
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::ResourceCmd;
use crate::shell::{Registry, RegistryError};

const QUERY_TYPES: [&str; 7] = [
    "brand",
    "cloudaccount",
    "cloudprovider",
    "domain",
    "project",
    "region",
    "res_type",
];

#[derive(Debug, Args, Serialize)]
pub struct BillConditionListOptions {
    /// Dimension to list filter values for
    #[arg(long, value_parser = QUERY_TYPES)]
    pub query_type: String,

    /// First day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub start_day: Option<u32>,

    /// Last day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub end_day: Option<u32>,

    /// Only values under this brand
    #[arg(long)]
    pub brand: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

/// Project filtering comes from the shared `--project` flag.
#[derive(Debug, Args, Serialize)]
pub struct ResourceFeeListOptions {
    /// First day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub start_day: Option<u32>,

    /// Last day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub end_day: Option<u32>,

    /// Only fees of this resource type
    #[arg(long)]
    pub res_type: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ResResultListOptions {
    /// Only results of this resource type
    #[arg(long)]
    pub res_type: Option<String>,

    /// First day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub start_day: Option<u32>,

    /// Last day of the range
    #[arg(long, value_name = "YYYYMMDD")]
    pub end_day: Option<u32>,

    /// Only results of this cloud account
    #[arg(long)]
    pub cloudaccount: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

crate::plain_list!(
    BillConditionListOptions,
    ResourceFeeListOptions,
    ResResultListOptions
);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    ResourceCmd::new(&BILL_CONDITIONS)
        .list::<BillConditionListOptions>(registry, "List values usable as bill filters")?;
    ResourceCmd::new(&RESOURCE_FEES)
        .list::<ResourceFeeListOptions>(registry, "List fees per resource")?;
    ResourceCmd::new(&RES_RESULTS)
        .list::<ResResultListOptions>(registry, "List resource usage results")
}
