use std::path::PathBuf;

use clap::{ArgAction, Args};
use serde::Serialize;
use serde_json::{Value, json};

use crate::client::Session;
use crate::client::modules::KUBE_CLUSTERS;
use crate::commands::input;
use crate::shell::payload::{BaseListOptions, FederatedUsed, Params, ToParams, is_false};
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{CliError, CliResult, Registry, RegistryError};

const MODES: [&str; 2] = ["customize", "import"];
const PROVIDERS: [&str; 5] = ["onecloud", "system", "aliyun", "azure", "qcloud"];
const MACHINE_ROLES: [&str; 2] = ["controlplane", "node"];

#[derive(Debug, Args, Serialize)]
pub struct ClusterListOptions {
    #[command(flatten)]
    #[serde(flatten)]
    pub federated: FederatedUsed,

    /// Filter by cluster mode
    #[arg(long, value_parser = MODES)]
    pub mode: Option<String>,

    /// Filter by provider
    #[arg(long, value_parser = PROVIDERS)]
    pub provider: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ClusterCreateOptions {
    /// Name of the cluster
    pub name: String,

    /// Build the cluster or import an existing one
    #[arg(long, value_parser = MODES)]
    pub mode: Option<String>,

    /// Cluster provider
    #[arg(long, value_parser = PROVIDERS)]
    pub provider: Option<String>,

    /// Kind of machines backing the nodes
    #[arg(long, value_parser = ["guest", "baremetal"])]
    pub resource_type: Option<String>,

    /// Kubernetes version, e.g. v1.22.9
    #[arg(long)]
    pub version: Option<String>,

    /// VPC for the node network
    #[arg(long)]
    #[serde(rename = "vpc_id")]
    pub vpc: Option<String>,

    /// Kubeconfig of the cluster to import
    #[arg(long, value_name = "FILE")]
    #[serde(skip)]
    pub import_kubeconfig: Option<PathBuf>,
}

#[derive(Debug, Args, Serialize)]
pub struct ClusterSyncOptions {
    /// ID or name of the cluster
    #[serde(skip)]
    pub id: String,

    /// Sync even when the cluster looks up to date
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub force: bool,
}

#[derive(Debug, Args, Serialize)]
pub struct ClusterPurgeOptions {
    /// ID or name of the cluster
    #[serde(skip)]
    pub id: String,

    /// Purge even if cleanup on the cluster fails
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub force: bool,
}

#[derive(Debug, Args, Serialize)]
pub struct AddMachinesOptions {
    /// ID or name of the cluster
    #[serde(skip)]
    pub id: String,

    /// Machine as role:vcpu:memory_mb, e.g. node:4:8192; repeatable
    #[arg(
        long = "machine",
        value_name = "ROLE:VCPU:MEMORY_MB",
        required = true,
        action = ArgAction::Append
    )]
    #[serde(skip)]
    pub machines: Vec<String>,
}

impl ToParams for AddMachinesOptions {
    fn params(&self) -> CliResult<Params> {
        let machines = self
            .machines
            .iter()
            .map(|raw| parse_machine(raw))
            .collect::<CliResult<Vec<_>>>()?;
        let mut params = Params::new();
        params.set("machines", Value::Array(machines));
        Ok(params)
    }
}

fn parse_machine(raw: &str) -> CliResult<Value> {
    let invalid = |why: &str| CliError::invalid(format!("--machine '{raw}': {why}"));
    let parts: Vec<&str> = raw.split(':').collect();
    let &[role, vcpu, memory_mb] = parts.as_slice() else {
        return Err(invalid("expected role:vcpu:memory_mb"));
    };
    if !MACHINE_ROLES.contains(&role) {
        return Err(invalid("role must be controlplane or node"));
    }
    let vcpu: u32 = vcpu
        .parse()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid("vcpu must be a positive integer"))?;
    let memory_mb: u64 = memory_mb
        .parse()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid("memory_mb must be a positive integer"))?;
    Ok(json!({
        "role": role,
        "cpu": vcpu,
        "memory": format!("{memory_mb}M"),
    }))
}

crate::plain_list!(ClusterListOptions);
crate::whole_struct!(ClusterCreateOptions, ClusterSyncOptions, ClusterPurgeOptions);
crate::resource_id!(ClusterSyncOptions, ClusterPurgeOptions, AddMachinesOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let clusters = ResourceCmd::new(&KUBE_CLUSTERS).keyword("k8s-cluster");
    clusters.list::<ClusterListOptions>(registry, "List kubernetes clusters")?;
    clusters.show::<ResourceIdOptions>(registry, "Show details of a cluster")?;
    registry.register(
        clusters.name("create"),
        "Create or import a cluster",
        create,
    )?;
    clusters.delete::<ResourceIdsOptions>(registry, "Delete clusters")?;
    clusters.perform::<ClusterSyncOptions>(registry, "sync", "Sync cluster state")?;
    clusters.perform::<ResourceIdOptions>(registry, "syncstatus", "Refresh cluster status")?;
    clusters.perform::<ClusterPurgeOptions>(registry, "purge", "Purge a cluster record")?;
    clusters.get_specific_field::<ResourceIdOptions>(
        registry,
        "kubeconfig",
        "kubeconfig",
        "kubeconfig",
        "Print the admin kubeconfig of a cluster",
    )?;
    clusters.perform::<AddMachinesOptions>(registry, "add-machines", "Add machines to a cluster")
}

async fn create(session: Session, options: ClusterCreateOptions) -> CliResult<()> {
    let mut params = options.params()?;
    if let Some(path) = &options.import_kubeconfig {
        if options.mode.as_deref() == Some("customize") {
            return Err(CliError::invalid(
                "--import-kubeconfig cannot be used with --mode customize",
            ));
        }
        let kubeconfig = input::read_file(path).await?;
        params
            .set("mode", "import")
            .put_path(&["import_data", "kubeconfig"], kubeconfig);
    }
    let record = KUBE_CLUSTERS.create(&session, params).await?;
    session.printer().print_object(&record)?;
    Ok(())
}
