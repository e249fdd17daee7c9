use clap::Args;
use serde::Serialize;

use crate::client::modules::POLICY_DEFINITIONS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct PolicyDefinitionListOptions {
    /// Filter by category
    #[arg(long)]
    pub category: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

crate::plain_list!(PolicyDefinitionListOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let definitions = ResourceCmd::new(&POLICY_DEFINITIONS);
    definitions.list::<PolicyDefinitionListOptions>(registry, "List cloud policy definitions")?;
    definitions.show::<ResourceIdOptions>(registry, "Show details of a policy definition")?;
    definitions.perform::<ResourceIdOptions>(
        registry,
        "syncstatus",
        "Resync the status of a policy definition",
    )
}
