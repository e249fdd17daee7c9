//! Disk snapshots and whole-instance snapshots.

use clap::Args;
use serde::Serialize;

use crate::client::Session;
use crate::client::modules::{INSTANCE_SNAPSHOTS, SERVERS, SNAPSHOTS};
use crate::shell::payload::{BaseListOptions, Params, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct SnapshotListOptions {
    /// Snapshots of this disk
    #[arg(long)]
    pub disk: Option<String>,

    /// Snapshots of disks attached to this server
    #[arg(long)]
    pub guest: Option<String>,

    /// Only snapshots of local disks
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub local: bool,

    /// Only snapshots of shared disks
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub share: bool,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct SnapshotCreateOptions {
    /// Disk to snapshot
    pub disk: String,

    /// Name of the snapshot
    pub name: String,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

/// `name`/`description` update shared by both snapshot kinds.
#[derive(Debug, Args, Serialize)]
pub struct SnapshotUpdateOptions {
    /// ID or name of the snapshot
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct InstanceSnapshotListOptions {
    /// Snapshots of this server
    #[arg(long)]
    pub guest: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct InstanceSnapshotResetOptions {
    /// ID or name of the instance snapshot
    #[serde(skip)]
    pub id: String,

    /// Start the server once the reset finishes
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub auto_start: bool,
}

#[derive(Debug, Args)]
pub struct InstanceSnapshotCreateServerOptions {
    /// ID or name of the instance snapshot
    pub id: String,

    /// Name of the new server
    pub name: String,

    /// Start the server once it is created
    #[arg(long)]
    pub auto_start: bool,
}

crate::plain_list!(SnapshotListOptions, InstanceSnapshotListOptions);
crate::whole_struct!(
    SnapshotCreateOptions,
    SnapshotUpdateOptions,
    InstanceSnapshotResetOptions,
);
crate::resource_id!(SnapshotUpdateOptions, InstanceSnapshotResetOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let snapshots = ResourceCmd::new(&SNAPSHOTS);
    snapshots.list::<SnapshotListOptions>(registry, "List disk snapshots")?;
    snapshots.show::<ResourceIdOptions>(registry, "Show details of a disk snapshot")?;
    snapshots.create::<SnapshotCreateOptions>(registry, "Snapshot a disk")?;
    snapshots.update::<SnapshotUpdateOptions>(registry, "Update a disk snapshot")?;
    snapshots.delete::<ResourceIdsOptions>(registry, "Delete disk snapshots")?;
    snapshots.perform::<ResourceIdOptions>(registry, "purge", "Purge a disk snapshot record")?;

    let instance = ResourceCmd::new(&INSTANCE_SNAPSHOTS);
    instance.list::<InstanceSnapshotListOptions>(registry, "List instance snapshots")?;
    instance.show::<ResourceIdOptions>(registry, "Show details of an instance snapshot")?;
    instance.update::<SnapshotUpdateOptions>(registry, "Update an instance snapshot")?;
    instance.delete::<ResourceIdsOptions>(registry, "Delete instance snapshots")?;
    instance.perform::<InstanceSnapshotResetOptions>(
        registry,
        "reset",
        "Roll a server back to an instance snapshot",
    )?;
    registry.register(
        instance.name("create-server"),
        "Create a server from an instance snapshot",
        create_server,
    )
}

async fn create_server(
    session: Session,
    options: InstanceSnapshotCreateServerOptions,
) -> CliResult<()> {
    let mut params = Params::new();
    params
        .put("name", &options.name)
        .put("instance_snapshot_id", &options.id)
        .put("auto_start", &options.auto_start);
    let record = SERVERS.create(&session, params).await?;
    session.printer().print_object(&record)?;
    Ok(())
}
