//! Alarm logs are filtered by a position in the monitor tree. The tree is
//! addressed by label names on the command line and by node ids on the wire,
//! so each prefix of the label path is resolved before listing.

use clap::{ArgAction, Args};
use serde_json::Value;

use crate::client::Session;
use crate::client::modules::{ALARM_LOGS, TREE_NODES};
use crate::commands::input::parse_time_opt;
use crate::shell::payload::{BaseListOptions, Params, ToParams};
use crate::shell::{CliError, CliResult, Registry, RegistryError};

/// Tree levels, top down.
const LABEL_LEVELS: [&str; 5] = ["corp", "owt", "pdl", "srv", "env"];

#[derive(Debug, Args)]
pub struct AlarmLogListOptions {
    /// Tree node label, top level first; repeat for each level, at most five
    #[arg(long = "label", value_name = "LABEL", action = ArgAction::Append)]
    pub labels: Vec<String>,

    /// Only logs at or after this RFC 3339 time
    #[arg(long)]
    pub start_time: Option<String>,

    /// Only logs before this RFC 3339 time
    #[arg(long)]
    pub end_time: Option<String>,

    #[command(flatten)]
    pub base: BaseListOptions,
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register("alarmlog-list", "List alarm logs", list)
}

async fn list(session: Session, options: AlarmLogListOptions) -> CliResult<()> {
    if options.labels.len() > LABEL_LEVELS.len() {
        return Err(CliError::invalid(format!(
            "--label: at most {} levels, got {}",
            LABEL_LEVELS.len(),
            options.labels.len()
        )));
    }

    let mut params = options.base.params()?;
    params
        .put(
            "start_time",
            &parse_time_opt("start-time", options.start_time.as_deref())?,
        )
        .put(
            "end_time",
            &parse_time_opt("end-time", options.end_time.as_deref())?,
        );
    if !options.labels.is_empty() {
        params.set(
            "node_labels",
            resolve_node_labels(&session, &options.labels).await?,
        );
    }

    let logs = ALARM_LOGS.list(&session, &params).await?;
    session.printer().print_list(&logs, ALARM_LOGS.columns)?;
    Ok(())
}

/// `corp=<id>,owt=<id>,...`, one entry per label.
async fn resolve_node_labels(session: &Session, labels: &[String]) -> CliResult<String> {
    let mut resolved = Vec::with_capacity(labels.len());
    for (depth, level) in LABEL_LEVELS.iter().enumerate().take(labels.len()) {
        let path = labels[..=depth].join(",");
        let mut query = Params::new();
        query.set("labels", path.as_str());
        let node = TREE_NODES
            .get(session, "get-node-id", Some(&query))
            .await
            .map_err(|err| CliError::invalid(format!("--label {path}: {err}")))?;
        let pid = node_id(&node)
            .ok_or_else(|| CliError::invalid(format!("--label {path}: no such tree node")))?;
        tracing::debug!(%path, %pid, "tree node resolved");
        resolved.push(format!("{level}={pid}"));
    }
    Ok(resolved.join(","))
}

fn node_id(node: &Value) -> Option<String> {
    match node.get("pid")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use super::node_id;
    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[test]
    fn node_id_accepts_numbers_and_strings() {
        assert_eq!(node_id(&json!({"pid": 7})).as_deref(), Some("7"));
        assert_eq!(node_id(&json!({"pid": "7"})).as_deref(), Some("7"));
        assert_eq!(node_id(&json!({"pid": ""})), None);
        assert_eq!(node_id(&json!({})), None);
    }

    #[tokio::test]
    async fn labels_resolve_prefix_by_prefix() -> Result<(), CliError> {
        let server = MockServer::start();
        let top = server.mock(|when, then| {
            when.method("GET")
                .path("/monitor/tree_nodes/get-node-id")
                .query_param("labels", "acme");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"pid":1}"#);
        });
        let second = server.mock(|when, then| {
            when.method("GET")
                .path("/monitor/tree_nodes/get-node-id")
                .query_param("labels", "acme,storage");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"pid":7}"#);
        });
        let logs = server.mock(|when, then| {
            when.method("GET")
                .path("/log/alarmlogs")
                .query_param("node_labels", "corp=1,owt=7")
                .query_param("start_time", "2024-05-01T00:00:00Z");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"alarmlogs":[],"total":0}"#);
        });

        run(
            &server,
            &[
                "alarmlog-list",
                "--label",
                "acme",
                "--label",
                "storage",
                "--start-time",
                "2024-05-01T00:00:00Z",
            ],
        )
        .await?;
        top.assert();
        second.assert();
        logs.assert();
        Ok(())
    }

    #[tokio::test]
    async fn resolver_failure_is_an_argument_error() {
        let server = MockServer::start();
        let resolver = server.mock(|when, then| {
            when.method("GET").path("/monitor/tree_nodes/get-node-id");
            then.status(404).body("tree node not found");
        });
        let logs = server.mock(|when, then| {
            when.method("GET").path("/log/alarmlogs");
            then.status(200).body(r#"{"alarmlogs":[]}"#);
        });

        let err = run(&server, &["alarmlog-list", "--label", "ghost"])
            .await
            .expect_err("unresolved");
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("--label ghost"));
        resolver.assert();
        logs.assert_calls(0);
    }

    #[tokio::test]
    async fn missing_pid_is_an_argument_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("GET").path("/monitor/tree_nodes/get-node-id");
            then.status(200)
                .header("content-type", "application/json")
                .body("{}");
        });

        let err = run(&server, &["alarmlog-list", "--label", "acme"])
            .await
            .expect_err("no pid");
        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn more_than_five_labels_never_calls_out() {
        let server = MockServer::start();
        let resolver = server.mock(|when, then| {
            when.method("GET").path("/monitor/tree_nodes/get-node-id");
            then.status(200).body(r#"{"pid":1}"#);
        });

        let mut argv = vec!["alarmlog-list"];
        for label in ["a", "b", "c", "d", "e", "f"] {
            argv.extend(["--label", label]);
        }
        let err = run(&server, &argv).await.expect_err("too deep");
        assert_eq!(err.exit_code(), 2);
        resolver.assert_calls(0);
    }

    #[tokio::test]
    async fn bad_start_time_is_an_argument_error() {
        let server = MockServer::start();
        let err = run(&server, &["alarmlog-list", "--start-time", "yesterday"])
            .await
            .expect_err("bad time");
        assert_eq!(err.exit_code(), 2);
    }
}
