//! Scheduler tags and the joints binding them to schedulable resources.
//!
//! Every joint in [`SCHEDTAG_JOINTS`] gets the same list/add/remove commands,
//! plus a `<resource>-set-schedtag` on the tagged resource itself.

use clap::{ArgAction, Args};
use serde::Serialize;

use crate::client::modules::{SCHEDTAG_JOINTS, SCHEDTAGS};
use crate::shell::payload::{BaseListOptions, ToParams};
use crate::shell::resource_cmd::{
    JointCmd, JointListOptions, JointPair, ResourceCmd, ResourceIdOptions, ResourceIdsOptions,
};
use crate::shell::{Registry, RegistryError};

const RESOURCE_TYPES: [&str; 6] = [
    "hosts",
    "storages",
    "networks",
    "cloudproviders",
    "zones",
    "cloudregions",
];

#[derive(Debug, Args, Serialize)]
pub struct SchedtagListOptions {
    /// Only tags for this kind of resource
    #[arg(long, value_parser = RESOURCE_TYPES)]
    pub resource_type: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct SchedtagCreateOptions {
    /// Name of the tag
    pub name: String,

    /// How the scheduler treats candidates carrying the tag
    #[arg(long, value_parser = ["require", "exclude", "prefer", "avoid"])]
    #[serde(rename = "default_strategy")]
    pub strategy: Option<String>,

    /// Kind of resource the tag applies to
    #[arg(long, value_parser = RESOURCE_TYPES)]
    pub resource_type: Option<String>,

    /// Description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct SchedtagUpdateOptions {
    /// ID or name of the tag
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New default strategy
    #[arg(long, value_parser = ["require", "exclude", "prefer", "avoid"])]
    #[serde(rename = "default_strategy")]
    pub strategy: Option<String>,

    /// New description
    #[arg(long)]
    #[serde(rename = "description")]
    pub desc: Option<String>,
}

#[derive(Debug, Args, Serialize)]
pub struct SchedtagJointListOptions {
    /// Resources carrying this tag
    #[arg(long)]
    #[serde(skip)]
    pub schedtag: Option<String>,

    /// Tags carried by this resource
    #[arg(long)]
    #[serde(skip)]
    pub resource: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

impl ToParams for SchedtagJointListOptions {}

impl JointListOptions for SchedtagJointListOptions {
    fn master_id(&self) -> Option<&str> {
        self.schedtag.as_deref()
    }

    fn slave_id(&self) -> Option<&str> {
        self.resource.as_deref()
    }
}

#[derive(Debug, Args, Serialize)]
pub struct SchedtagPairOptions {
    /// ID or name of the tag
    #[serde(skip)]
    pub tag: String,

    /// ID or name of the tagged resource
    #[serde(skip)]
    pub resource: String,
}

impl ToParams for SchedtagPairOptions {}

impl JointPair for SchedtagPairOptions {
    fn master_id(&self) -> &str {
        &self.tag
    }

    fn slave_id(&self) -> &str {
        &self.resource
    }
}

#[derive(Debug, Args, Serialize)]
pub struct SetSchedtagOptions {
    /// ID or name of the resource
    #[serde(skip)]
    pub id: String,

    /// Tag to set; repeatable, replaces the current set
    #[arg(long, required = true, action = ArgAction::Append)]
    pub schedtag: Vec<String>,
}

crate::plain_list!(SchedtagListOptions);
crate::whole_struct!(SchedtagCreateOptions, SchedtagUpdateOptions, SetSchedtagOptions);
crate::resource_id!(SchedtagUpdateOptions, SetSchedtagOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let tags = ResourceCmd::new(&SCHEDTAGS);
    tags.list::<SchedtagListOptions>(registry, "List scheduler tags")?;
    tags.show::<ResourceIdOptions>(registry, "Show details of a scheduler tag")?;
    tags.create::<SchedtagCreateOptions>(registry, "Create a scheduler tag")?;
    tags.update::<SchedtagUpdateOptions>(registry, "Update a scheduler tag")?;
    tags.delete::<ResourceIdsOptions>(registry, "Delete scheduler tags")?;

    for joint in SCHEDTAG_JOINTS {
        let plural = joint.slave.keyword_plural;
        let cmd = JointCmd::new(joint);
        cmd.list::<SchedtagJointListOptions>(
            registry,
            &format!("List scheduler tags bound to {plural}"),
        )?;
        cmd.attach::<SchedtagPairOptions>(
            registry,
            &format!("Bind a scheduler tag to one of the {plural}"),
        )?;
        cmd.detach::<SchedtagPairOptions>(
            registry,
            &format!("Unbind a scheduler tag from one of the {plural}"),
        )?;
        ResourceCmd::new(joint.slave).perform::<SetSchedtagOptions>(
            registry,
            "set-schedtag",
            &format!("Replace the scheduler tags of one of the {plural}"),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn hosts_add_attaches_the_pair() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/compute/schedtags/mytag/hosts/host7");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"schedtaghost":{"schedtag_id":"mytag","host_id":"host7"}}"#);
        });

        run(&server, &["schedtag-hosts-add", "mytag", "host7"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn zones_list_by_resource_walks_from_the_slave() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET").path("/compute/zones/z1/schedtags");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"schedtags":[],"total":0}"#);
        });

        run(&server, &["schedtag-zones-list", "--resource", "z1"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn set_schedtag_replaces_the_tag_set() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/hosts/host1/set-schedtag")
                .json_body(json!({"schedtag": ["ssd", "gpu"]}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"host":{"id":"host1"}}"#);
        });

        run(
            &server,
            &["host-set-schedtag", "host1", "--schedtag", "ssd", "--schedtag", "gpu"],
        )
        .await?;
        mock.assert();

        let err = run(&server, &["host-set-schedtag", "host1"])
            .await
            .expect_err("tag required");
        assert_eq!(err.exit_code(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn create_renames_strategy() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST").path("/compute/schedtags").json_body(json!({
                "name": "ssd",
                "default_strategy": "prefer",
                "resource_type": "hosts"
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"schedtag":{"id":"t1"}}"#);
        });

        run(
            &server,
            &["schedtag-create", "ssd", "--strategy", "prefer", "--resource-type", "hosts"],
        )
        .await?;
        mock.assert();
        Ok(())
    }
}
