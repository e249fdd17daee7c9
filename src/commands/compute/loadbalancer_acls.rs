//! Load-balancer ACLs and their per-region cached copies.
//!
//! Entries are typed on the command line as `cidr[ comment]` and always
//! rendered back in that form.

use clap::{ArgAction, Args};
use cloudadm_api_types::AclEntry;
use serde::Serialize;

use crate::client::modules::{CACHED_LOADBALANCER_ACLS, LOADBALANCER_ACLS};
use crate::render::transforms::acl_entries_text;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

fn parse_acl_entry(raw: &str) -> Result<AclEntry, String> {
    AclEntry::parse(raw).ok_or_else(|| "expected 'cidr[ comment]'".to_string())
}

#[derive(Debug, Args, Serialize)]
pub struct LbaclListOptions {
    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct LbaclCreateOptions {
    /// Name of the ACL
    pub name: String,

    /// Entry as "cidr[ comment]"; repeatable
    #[arg(long = "acl-entry", action = ArgAction::Append, value_parser = parse_acl_entry)]
    pub acl_entries: Vec<AclEntry>,
}

#[derive(Debug, Args, Serialize)]
pub struct LbaclUpdateOptions {
    /// ID or name of the ACL
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Replacement entries as "cidr[ comment]"; repeatable
    #[arg(long = "acl-entry", action = ArgAction::Append, value_parser = parse_acl_entry)]
    pub acl_entries: Vec<AclEntry>,
}

#[derive(Debug, Args, Serialize)]
pub struct LbaclPatchOptions {
    /// ID or name of the ACL
    #[serde(skip)]
    pub id: String,

    /// Entry to add as "cidr[ comment]"; repeatable
    #[arg(long, action = ArgAction::Append, value_parser = parse_acl_entry)]
    #[serde(rename = "adds")]
    pub add: Vec<AclEntry>,

    /// Entry to remove as "cidr[ comment]"; repeatable
    #[arg(long, action = ArgAction::Append, value_parser = parse_acl_entry)]
    #[serde(rename = "dels")]
    pub del: Vec<AclEntry>,
}

#[derive(Debug, Args, Serialize)]
pub struct LbaclCacheListOptions {
    /// Filter by the source ACL
    #[arg(long)]
    pub acl: Option<String>,

    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

crate::plain_list!(LbaclListOptions, LbaclCacheListOptions);
crate::whole_struct!(LbaclCreateOptions, LbaclUpdateOptions, LbaclPatchOptions);
crate::resource_id!(LbaclUpdateOptions, LbaclPatchOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let acls = ResourceCmd::new(&LOADBALANCER_ACLS)
        .keyword("lbacl")
        .transform(acl_entries_text);
    acls.list::<LbaclListOptions>(registry, "List load balancer ACLs")?;
    acls.show::<ResourceIdOptions>(registry, "Show details of a load balancer ACL")?;
    acls.create::<LbaclCreateOptions>(registry, "Create a load balancer ACL")?;
    acls.update::<LbaclUpdateOptions>(registry, "Update a load balancer ACL")?;
    acls.perform::<LbaclPatchOptions>(registry, "patch", "Add or remove ACL entries")?;
    acls.delete::<ResourceIdsOptions>(registry, "Delete load balancer ACLs")?;
    acls.perform::<ResourceIdOptions>(registry, "purge", "Purge a load balancer ACL record")?;

    let cached = ResourceCmd::new(&CACHED_LOADBALANCER_ACLS)
        .keyword("lbacl-cache")
        .transform(acl_entries_text);
    cached.list::<LbaclCacheListOptions>(registry, "List cached load balancer ACLs")?;
    cached.show::<ResourceIdOptions>(registry, "Show details of a cached load balancer ACL")?;
    cached.delete::<ResourceIdsOptions>(registry, "Delete cached load balancer ACLs")?;
    cached.perform::<ResourceIdOptions>(
        registry,
        "purge",
        "Purge a cached load balancer ACL record",
    )
}
