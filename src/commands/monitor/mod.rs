//! Commands against the monitor service, plus alarm logs kept by the log
//! service.

mod alarm_events;
mod alarm_logs;
mod monitor_types;
mod node_alerts;

use serde::Serializer;

use crate::shell::{Registry, RegistryError};

pub(crate) const COMPARATORS: [&str; 5] = [">=", "<=", ">", "<", "=="];
pub(crate) const ALERT_LEVELS: [&str; 3] = ["normal", "important", "fatal"];

/// Recipient lists travel as one comma-separated string.
pub(crate) fn comma_joined<S: Serializer>(
    items: &[String],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&items.join(","))
}

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    alarm_events::register(registry)?;
    alarm_logs::register(registry)?;
    monitor_types::register(registry)?;
    node_alerts::register(registry)
}
