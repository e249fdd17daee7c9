use clap::Args;
use serde::Serialize;

use crate::client::Session;
use crate::client::modules::{DISKS, STORAGES};
use crate::shell::payload::{AutoDelete, BaseListOptions, ListOptions, ToParams, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions};
use crate::shell::{CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct DiskListOptions {
    /// List disks on this storage only
    #[arg(long)]
    #[serde(skip)]
    pub storage: Option<String>,

    /// Only disks not attached to any server
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub unused: bool,

    /// Only disks on shared storage
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub share: bool,

    /// Only disks on local storage
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub local: bool,

    /// Disk usage type
    #[arg(long = "type", value_parser = ["sys", "data", "swap"])]
    #[serde(rename = "disk_type")]
    pub disk_type: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for DiskListOptions {}

impl ListOptions for DiskListOptions {
    fn context_id(&self) -> Option<&str> {
        self.storage.as_deref()
    }
}

#[derive(Debug, Args, Serialize)]
pub struct DiskCreateOptions {
    /// Storage to create the disk on
    #[serde(skip)]
    pub storage: String,

    /// Name of the new disk
    pub name: String,

    /// Size, e.g. 50g or 10240m
    #[serde(rename = "disk")]
    pub size: String,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    /// Image to populate the disk from
    #[arg(long)]
    pub image: Option<String>,

    /// Filesystem to format the disk with
    #[arg(long)]
    pub fs_format: Option<String>,
}

impl ToParams for DiskCreateOptions {}

#[derive(Debug, Args, Serialize)]
pub struct DiskUpdateOptions {
    /// ID or name of the disk
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub auto_delete: AutoDelete,
}

#[derive(Debug, Args, Serialize)]
pub struct DiskDeleteOptions {
    /// IDs or names of the disks
    #[arg(required = true)]
    #[serde(skip)]
    pub ids: Vec<String>,

    /// Delete immediately even if the disk is already pending deletion
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub override_pending_delete: bool,
}

#[derive(Debug, Args, Serialize)]
pub struct DiskResizeOptions {
    /// ID or name of the disk
    #[serde(skip)]
    pub id: String,

    /// New size, e.g. 100g
    pub size: String,
}

#[derive(Debug, Args, Serialize)]
pub struct DiskResetOptions {
    /// ID or name of the disk
    #[serde(skip)]
    pub id: String,

    /// Snapshot to roll the disk back to
    #[serde(rename = "snapshot_id")]
    pub snapshot: String,

    /// Start the server once the reset finishes
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub auto_start: bool,
}

#[derive(Debug, Args, Serialize)]
pub struct DiskSaveOptions {
    /// ID or name of the disk
    #[serde(skip)]
    pub id: String,

    /// Name of the image to save as
    pub name: String,

    /// Image format
    #[arg(long, value_parser = ["qcow2", "raw", "vmdk", "vhd"])]
    pub format: Option<String>,
}

crate::whole_struct!(
    DiskUpdateOptions,
    DiskDeleteOptions,
    DiskResizeOptions,
    DiskResetOptions,
    DiskSaveOptions,
);
crate::resource_id!(DiskUpdateOptions, DiskResizeOptions, DiskResetOptions, DiskSaveOptions);
crate::resource_ids!(DiskDeleteOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let disks = ResourceCmd::new(&DISKS).context(&STORAGES);
    disks.list::<DiskListOptions>(registry, "List virtual disks")?;
    disks.show::<ResourceIdOptions>(registry, "Show details of a disk")?;
    registry.register("disk-create", "Create a disk on a storage", disk_create)?;
    disks.update::<DiskUpdateOptions>(registry, "Update properties of a disk")?;
    disks.delete::<DiskDeleteOptions>(registry, "Delete disks")?;
    disks.perform::<DiskResizeOptions>(registry, "resize", "Grow a disk")?;
    disks.perform_as::<DiskResetOptions>(
        registry,
        "reset",
        "disk-reset",
        "Roll a disk back to a snapshot",
    )?;
    disks.perform::<DiskSaveOptions>(registry, "save", "Save a disk as an image")?;
    disks.perform::<ResourceIdOptions>(registry, "purge", "Purge a disk record")?;
    disks.perform::<ResourceIdOptions>(registry, "syncstatus", "Resync the status of a disk")
}

async fn disk_create(session: Session, options: DiskCreateOptions) -> CliResult<()> {
    let record = DISKS
        .create_in_context(&session, options.params()?, &STORAGES, &options.storage)
        .await?;
    session.printer().print_object(&record)?;
    Ok(())
}
