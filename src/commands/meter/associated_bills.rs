use clap::Args;
use serde::Serialize;

use crate::client::modules::ASSOCIATED_BILLS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct AssociatedBillCreateOptions {
    /// Name of the bill association
    pub name: String,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Kind of bill being associated
    #[arg(long)]
    pub bill_type: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct AssociatedBillUpdateOptions {
    /// ID or name of the bill association
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// New bill type
    #[arg(long)]
    pub bill_type: Option<String>,
}

crate::whole_struct!(AssociatedBillCreateOptions, AssociatedBillUpdateOptions);
crate::resource_id!(AssociatedBillUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let bills = ResourceCmd::new(&ASSOCIATED_BILLS);
    bills.list::<BaseListOptions>(registry, "List associated bills")?;
    bills.show::<ResourceIdOptions>(registry, "Show details of an associated bill")?;
    bills.create::<AssociatedBillCreateOptions>(registry, "Create an associated bill")?;
    bills.update::<AssociatedBillUpdateOptions>(registry, "Update an associated bill")?;
    bills.delete::<ResourceIdsOptions>(registry, "Delete associated bills")
}
