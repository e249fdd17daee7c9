//! Process-level bootstrap that is not specific to any command.

pub mod error;
pub mod telemetry;
