//! Managed Redis/Memcached instances and their backups.

use clap::Args;
use serde::Serialize;

use super::{BillingOptions, RenewOptions};
use crate::client::modules::{ELASTIC_CACHE_BACKUPS, ELASTIC_CACHES};
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct ElasticCacheListOptions {
    /// Filter by region
    #[arg(long)]
    pub cloudregion: Option<String>,

    /// Filter by zone
    #[arg(long)]
    pub zone: Option<String>,

    /// Filter by engine
    #[arg(long)]
    pub engine: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ElasticCacheCreateOptions {
    /// Name of the instance
    pub name: String,

    /// Cloud provider that hosts the instance
    #[arg(long)]
    pub manager: String,

    /// Region to create the instance in
    #[arg(long)]
    pub cloudregion: String,

    /// Instance type (SKU)
    #[arg(long)]
    pub instance_type: String,

    /// Cache engine
    #[arg(long, value_parser = ["redis", "memcached"])]
    pub engine: String,

    /// Engine version, e.g. 5.0
    #[arg(long)]
    pub engine_version: String,

    /// Network to attach to
    #[arg(long)]
    pub network: Option<String>,

    /// Access password
    #[arg(long)]
    pub password: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub billing: BillingOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ElasticCacheChangeSpecOptions {
    /// ID or name of the instance
    #[serde(skip)]
    pub id: String,

    /// New instance type (SKU)
    pub sku: String,
}

#[derive(Debug, Args, Serialize)]
pub struct ElasticCacheMaintainTimeOptions {
    /// ID or name of the instance
    #[serde(skip)]
    pub id: String,

    /// Window start, e.g. 00:00Z
    #[serde(rename = "maintain_start_time")]
    pub start: String,

    /// Window end, e.g. 01:00Z
    #[serde(rename = "maintain_end_time")]
    pub end: String,
}

#[derive(Debug, Args, Serialize)]
pub struct ElasticCacheBackupListOptions {
    /// Filter by instance
    #[arg(long)]
    pub elasticcache: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

crate::plain_list!(ElasticCacheListOptions, ElasticCacheBackupListOptions);
crate::whole_struct!(
    ElasticCacheCreateOptions,
    ElasticCacheChangeSpecOptions,
    ElasticCacheMaintainTimeOptions,
);
crate::resource_id!(ElasticCacheChangeSpecOptions, ElasticCacheMaintainTimeOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let caches = ResourceCmd::new(&ELASTIC_CACHES).keyword("elastic-cache");
    caches.list::<ElasticCacheListOptions>(registry, "List elastic cache instances")?;
    caches.show::<ResourceIdOptions>(registry, "Show details of an elastic cache instance")?;
    caches.create::<ElasticCacheCreateOptions>(registry, "Create an elastic cache instance")?;
    caches.delete::<ResourceIdsOptions>(registry, "Delete elastic cache instances")?;
    caches.perform::<ResourceIdOptions>(registry, "restart", "Restart an instance")?;
    caches.perform::<ResourceIdOptions>(
        registry,
        "flush-instance",
        "Drop every key held by an instance",
    )?;
    caches.perform::<ElasticCacheChangeSpecOptions>(
        registry,
        "change-spec",
        "Change the instance type",
    )?;
    caches.perform::<ElasticCacheMaintainTimeOptions>(
        registry,
        "set-maintain-time",
        "Set the maintenance window",
    )?;
    caches.perform::<ResourceIdOptions>(registry, "syncstatus", "Resync the instance status")?;
    caches.perform::<ResourceIdOptions>(registry, "sync", "Sync the instance from the cloud")?;
    caches.perform::<RenewOptions>(registry, "renew", "Renew a prepaid instance")?;

    let backups = ResourceCmd::new(&ELASTIC_CACHE_BACKUPS).keyword("elastic-cache-backup");
    backups.list::<ElasticCacheBackupListOptions>(registry, "List elastic cache backups")?;
    backups.perform::<ResourceIdOptions>(
        registry,
        "restore-instance",
        "Restore the instance from a backup",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn maintain_time_maps_positionals() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/elasticcaches/ec1/set-maintain-time")
                .json_body(json!({
                    "maintain_start_time": "00:00Z",
                    "maintain_end_time": "01:00Z"
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"elasticcache":{"id":"ec1"}}"#);
        });

        run(&server, &["elastic-cache-set-maintain-time", "ec1", "00:00Z", "01:00Z"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn create_requires_engine_flags() -> Result<(), CliError> {
        let server = MockServer::start();
        let err = run(&server, &["elastic-cache-create", "c1", "--manager", "m"])
            .await
            .expect_err("missing required flags");
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--cloudregion"), "{err}");

        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/elasticcaches")
                .json_body(json!({
                    "name": "c1",
                    "manager": "m",
                    "cloudregion": "r1",
                    "instance_type": "redis.small",
                    "engine": "redis",
                    "engine_version": "5.0",
                    "billing_type": "postpaid"
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"elasticcache":{"id":"ec1"}}"#);
        });
        run(
            &server,
            &[
                "elastic-cache-create",
                "c1",
                "--manager",
                "m",
                "--cloudregion",
                "r1",
                "--instance-type",
                "redis.small",
                "--engine",
                "redis",
                "--engine-version",
                "5.0",
                "--billing-type",
                "postpaid",
            ],
        )
        .await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn backup_restore_posts_action() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/elasticcachebackups/b1/restore-instance");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"elasticcachebackup":{"id":"b1"}}"#);
        });

        run(&server, &["elastic-cache-backup-restore-instance", "b1"]).await?;
        mock.assert();
        Ok(())
    }
}
