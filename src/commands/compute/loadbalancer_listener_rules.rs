use clap::Args;
use serde::Serialize;

use crate::client::modules::LOADBALANCER_LISTENER_RULES;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions, ResourceIdsOptions};
use crate::shell::{Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct ListenerRuleListOptions {
    /// Filter by listener
    #[arg(long)]
    pub listener: Option<String>,

    /// Filter by HTTP host
    #[arg(long)]
    pub domain: Option<String>,

    /// Filter by URL path
    #[arg(long)]
    pub path: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

/// Per-rule request throttling.
#[derive(Debug, Args, Serialize)]
pub struct RateLimitOptions {
    /// Requests per second across all sources
    #[arg(long)]
    pub http_request_rate: Option<u64>,

    /// Requests per second from a single source
    #[arg(long)]
    pub http_request_rate_per_src: Option<u64>,
}

#[derive(Debug, Args, Serialize)]
pub struct ListenerRuleCreateOptions {
    /// Listener the rule belongs to
    pub listener: String,

    /// Name of the rule
    pub name: String,

    /// HTTP host to match
    #[arg(long)]
    pub domain: Option<String>,

    /// URL path prefix to match
    #[arg(long)]
    pub path: Option<String>,

    /// Backend group to forward matches to
    #[arg(long)]
    pub backend_group: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub rate: RateLimitOptions,
}

#[derive(Debug, Args, Serialize)]
pub struct ListenerRuleUpdateOptions {
    /// ID or name of the rule
    #[serde(skip)]
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New backend group
    #[arg(long)]
    pub backend_group: Option<String>,

    #[command(flatten)]
    #[serde(flatten)]
    pub rate: RateLimitOptions,
}

crate::plain_list!(ListenerRuleListOptions);
crate::whole_struct!(ListenerRuleCreateOptions, ListenerRuleUpdateOptions);
crate::resource_id!(ListenerRuleUpdateOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let rules = ResourceCmd::new(&LOADBALANCER_LISTENER_RULES).keyword("lblistenerrule");
    rules.list::<ListenerRuleListOptions>(registry, "List load balancer listener rules")?;
    rules.show::<ResourceIdOptions>(registry, "Show details of a listener rule")?;
    rules.create::<ListenerRuleCreateOptions>(registry, "Create a listener rule")?;
    rules.update::<ListenerRuleUpdateOptions>(registry, "Update a listener rule")?;
    rules.delete::<ResourceIdsOptions>(registry, "Delete listener rules")?;
    rules.perform::<ResourceIdOptions>(registry, "purge", "Purge a listener rule record")?;
    rules.perform::<ResourceIdOptions>(
        registry,
        "syncstatus",
        "Resync the status of a listener rule",
    )
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn create_flattens_rate_limits() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/compute/loadbalancerlistenerrules")
                .json_body(json!({
                    "listener": "l1",
                    "name": "api",
                    "path": "/api",
                    "http_request_rate": 100
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"loadbalancerlistenerrule":{"id":"r1"}}"#);
        });

        run(
            &server,
            &["lblistenerrule-create", "l1", "api", "--path", "/api", "--http-request-rate", "100"],
        )
        .await?;
        mock.assert();
        Ok(())
    }
}
