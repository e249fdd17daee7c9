use clap::{ArgAction, Args};
use serde::Serialize;

use super::{BillingOptions, RenewOptions};
use crate::client::Session;
use crate::client::modules::DBINSTANCES;
use crate::shell::payload::{BaseListOptions, ToParams};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct DbInstanceListOptions {
    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    /// Filter by VPC
    #[arg(long)]
    pub vpc: Option<String>,

    /// Filter by engine
    #[arg(long)]
    pub engine: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

/// Compute sizing of an instance; either a type or explicit cpu/memory.
#[derive(Debug, Args, Serialize)]
pub struct DbInstanceSizeOptions {
    /// Instance type (SKU)
    #[arg(long)]
    pub instance_type: Option<String>,

    /// Number of vCPUs
    #[arg(long)]
    pub vcpu_count: Option<u64>,

    /// Memory in MiB
    #[arg(long)]
    pub vmem_size_mb: Option<u64>,
}

#[derive(Debug, Args, Serialize)]
pub struct DbInstanceCreateOptions {
    /// Name of the instance
    pub name: String,

    /// Database engine, e.g. MySQL
    #[arg(long)]
    pub engine: String,

    /// Engine version, e.g. 5.7
    #[arg(long)]
    pub engine_version: String,

    /// Deployment category, e.g. basic or ha
    #[arg(long)]
    pub category: String,

    /// Storage type, e.g. local_ssd
    #[arg(long)]
    pub storage_type: String,

    /// Storage size in GiB
    #[arg(long)]
    pub disk_size_gb: u64,

    #[command(flatten)]
    #[serde(flatten)]
    pub size: DbInstanceSizeOptions,

    /// Network to attach to
    #[arg(long)]
    pub network: Option<String>,

    /// Administrator password
    #[arg(long)]
    pub password: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub billing: BillingOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct DbInstanceChangeConfigOptions {
    /// ID or name of the instance
    #[serde(skip)]
    pub id: String,

    #[command(flatten)]
    #[serde(flatten)]
    pub size: DbInstanceSizeOptions,

    /// New storage size in GiB
    #[arg(long)]
    pub disk_size_gb: Option<u64>,
}

#[derive(Debug, Args, Serialize)]
pub struct DbInstanceRecoveryOptions {
    /// ID or name of the instance
    #[serde(skip)]
    pub id: String,

    /// Backup to recover from
    pub backup: String,

    /// Only recover these databases; repeatable
    #[arg(long, action = ArgAction::Append)]
    #[serde(rename = "databases")]
    pub database: Vec<String>,
}

crate::plain_list!(DbInstanceListOptions);
crate::whole_struct!(
    DbInstanceCreateOptions,
    DbInstanceChangeConfigOptions,
    DbInstanceRecoveryOptions,
);
crate::resource_id!(DbInstanceRecoveryOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let instances = ResourceCmd::new(&DBINSTANCES);
    instances.list::<DbInstanceListOptions>(registry, "List RDS instances")?;
    instances.show::<ResourceIdOptions>(registry, "Show details of an RDS instance")?;
    instances.create::<DbInstanceCreateOptions>(registry, "Create an RDS instance")?;
    instances.delete::<ResourceIdsOptions>(registry, "Delete RDS instances")?;
    instances.perform::<ResourceIdOptions>(registry, "restart", "Restart an RDS instance")?;
    instances.perform::<ResourceIdOptions>(registry, "purge", "Purge an RDS instance record")?;
    instances.perform::<ResourceIdOptions>(
        registry,
        "syncstatus",
        "Resync the status of an RDS instance",
    )?;
    instances.perform::<RenewOptions>(registry, "renew", "Renew a prepaid RDS instance")?;
    registry.register(
        "dbinstance-change-config",
        "Resize an RDS instance",
        change_config,
    )?;
    instances.perform::<DbInstanceRecoveryOptions>(
        registry,
        "recovery",
        "Recover an RDS instance from a backup",
    )
}

/// Refuses to post a resize that changes nothing.
async fn change_config(session: Session, options: DbInstanceChangeConfigOptions) -> CliResult<()> {
    let params = options
        .params()?
        .ensure_update(&format!("dbinstance {}", options.id))?;
    let record = DBINSTANCES
        .perform_action(&session, &options.id, "change-config", params)
        .await?;
    session.printer().print_object(&record)?;
    Ok(())
}
