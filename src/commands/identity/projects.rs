use clap::Args;
use serde::Serialize;

use crate::client::modules::{PROJECT_ADMIN_CANDIDATES, PROJECTS};
use crate::shell::payload::{BaseListOptions, ListOptions, ToParams};
use crate::shell::resource_cmd::ResourceCmd;
use crate::shell::{Registry, RegistryError};

/// `projectadmincandidate-list PROJECT`
#[derive(Debug, Args, Serialize)]
pub struct AdminCandidateListOptions {
    /// ID or name of the project
    #[arg(value_name = "PROJECT")]
    #[serde(skip)]
    pub project_id: String,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for AdminCandidateListOptions {}

impl ListOptions for AdminCandidateListOptions {
    fn context_id(&self) -> Option<&str> {
        Some(&self.project_id)
    }
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    ResourceCmd::new(&PROJECT_ADMIN_CANDIDATES)
        .context(&PROJECTS)
        .list::<AdminCandidateListOptions>(registry, "List users who may administer a project")
}
