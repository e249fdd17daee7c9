//! The command framework: registry, binder, payload conventions and the
//! templated handler shapes every command family is built from.

pub mod binder;
pub mod error;
pub mod payload;
pub mod registry;
pub mod resource_cmd;

pub use error::{CliError, CliResult};
pub use registry::{Registry, RegistryError};
