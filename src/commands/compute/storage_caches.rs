use clap::Args;
use serde::Serialize;

use crate::client::modules::{STORAGE_CACHED_IMAGES, STORAGE_CACHES};
use crate::shell::payload::{BaseListOptions, ToParams, is_false};
use crate::shell::resource_cmd::{
    JointCmd, JointListOptions, ResourceCmd, ResourceIdOptions, ResourceIdsOptions,
};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct StorageCacheListOptions {
    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct StorageCacheUpdateOptions {
    /// ID or name of the storage cache
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New filesystem path of the cache
    #[arg(long)]
    pub path: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct CacheImageOptions {
    /// ID or name of the storage cache
    #[serde(skip)]
    pub id: String,

    /// Image to cache
    pub image: String,

    /// Image format to cache as
    #[arg(long)]
    pub format: Option<String>,

    /// Fetch again even when a copy is cached already
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub is_force: bool,
}

#[derive(Debug, Args, Serialize)]
pub struct UncacheImageOptions {
    /// ID or name of the storage cache
    #[serde(skip)]
    pub id: String,

    /// Image to drop from the cache
    pub image: String,

    /// Drop the image even while it is in use
    #[arg(long)]
    #[serde(skip_serializing_if = "is_false")]
    pub is_force: bool,
}

/// `storage-cache-image-list ID`: images held by one cache.
#[derive(Debug, Args, Serialize)]
pub struct StorageCacheImageListOptions {
    /// ID or name of the storage cache
    #[serde(skip)]
    pub id: String,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for StorageCacheImageListOptions {}

impl JointListOptions for StorageCacheImageListOptions {
    fn master_id(&self) -> Option<&str> {
        Some(&self.id)
    }

    fn slave_id(&self) -> Option<&str> {
        None
    }
}

crate::plain_list!(StorageCacheListOptions);
crate::whole_struct!(StorageCacheUpdateOptions, CacheImageOptions, UncacheImageOptions);
crate::resource_id!(StorageCacheUpdateOptions, CacheImageOptions, UncacheImageOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let caches = ResourceCmd::new(&STORAGE_CACHES).keyword("storage-cache");
    caches.list::<StorageCacheListOptions>(registry, "List storage caches")?;
    caches.show::<ResourceIdOptions>(registry, "Show details of a storage cache")?;
    caches.update::<StorageCacheUpdateOptions>(registry, "Update a storage cache")?;
    caches.delete::<ResourceIdsOptions>(registry, "Delete storage caches")?;
    caches.perform::<CacheImageOptions>(
        registry,
        "cache-image",
        "Cache an image in a storage cache",
    )?;
    caches.perform::<UncacheImageOptions>(
        registry,
        "uncache-image",
        "Drop an image from a storage cache",
    )?;

    JointCmd::new(&STORAGE_CACHED_IMAGES)
        .keyword("storage-cache-image")
        .list::<StorageCacheImageListOptions>(registry, "List images held by a storage cache")
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn cache_image_posts_action() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/storagecaches/sc1/cache-image")
                .json_body(json!({"image": "centos7", "is_force": true}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"storagecache":{"id":"sc1"}}"#);
        });

        run(&server, &["storage-cache-cache-image", "sc1", "centos7", "--is-force"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn image_list_walks_the_joint() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/compute/storagecaches/sc1/cachedimages");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"storagecachedimages":[{"cachedimage":"centos7","status":"active"}],"total":1}"#);
        });

        run(&server, &["storage-cache-image-list", "sc1"]).await?;
        mock.assert();
        Ok(())
    }
}
