use clap::Args;
use cloudadm_api_types::AlarmEventAckRequest;
use serde::Serialize;

use super::ALERT_LEVELS;
use crate::client::Session;
use crate::client::modules::ALARM_EVENTS;
use crate::shell::payload::BaseListOptions;
use crate::shell::resource_cmd::{ResourceCmd, ResourceIdOptions};
use crate::shell::{CliError, CliResult, Registry, RegistryError};

#[derive(Debug, Args, Serialize)]
pub struct AlarmEventListOptions {
    /// Only events raised by this alarm
    #[arg(long)]
    pub alarm_id: Option<String>,

    /// Filter by level
    #[arg(long, value_parser = ALERT_LEVELS)]
    pub level: Option<String>,

    /// Filter by acknowledgement status
    #[arg(long)]
    pub ack_status: Option<i64>,

    #[command(flatten)]
    #[serde(flatten)]
    pub base: BaseListOptions,
}

/// `alarmevent-ack-update ID STATUS`
#[derive(Debug, Args)]
pub struct AlarmEventAckOptions {
    /// ID of the alarm event
    pub id: String,

    /// New acknowledgement status
    pub status: i64,
}

crate::plain_list!(AlarmEventListOptions);

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    let events = ResourceCmd::new(&ALARM_EVENTS);
    events.list::<AlarmEventListOptions>(registry, "List alarm events")?;
    events.show::<ResourceIdOptions>(registry, "Show details of an alarm event")?;
    registry.register(
        events.name("ack-update"),
        "Acknowledge an alarm event",
        ack_update,
    )
}

async fn ack_update(session: Session, options: AlarmEventAckOptions) -> CliResult<()> {
    let request = AlarmEventAckRequest::single(options.id, options.status);
    let body = serde_json::to_value(&request)
        .map_err(|err| CliError::Decode(format!("alarm event ack: {err}")))?;
    let result = ALARM_EVENTS.batch_update(&session, body).await?;
    session.printer().print_object(&result)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;
    use serde_json::json;

    use crate::commands::test_support::run;
    use crate::shell::CliError;

    #[tokio::test]
    async fn ack_update_wraps_a_single_event() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("PUT")
                .path("/monitor/alarmevents")
                .json_body(json!({"alarm_events": [{"id": "abc", "ack_status": 1}]}));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"alarm_events":[{"id":"abc","ack_status":1}]}"#);
        });

        run(&server, &["alarmevent-ack-update", "abc", "1"]).await?;
        mock.assert();
        Ok(())
    }

    #[tokio::test]
    async fn ack_status_must_be_numeric() {
        let server = MockServer::start();
        let err = run(&server, &["alarmevent-ack-update", "abc", "yes"])
            .await
            .expect_err("not a number");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn list_filters_by_alarm() -> Result<(), CliError> {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method("GET")
                .path("/monitor/alarmevents")
                .query_param("alarm_id", "al1")
                .query_param("ack_status", "0");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"alarmevents":[],"total":0}"#);
        });

        run(&server, &["alarmevent-list", "--alarm-id", "al1", "--ack-status", "0"]).await?;
        mock.assert();
        Ok(())
    }
}
