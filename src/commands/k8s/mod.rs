//! Commands against the kubernetes service.

mod clusters;
mod nodes;

use crate::shell::{Registry, RegistryError};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    clusters::register(registry)?;
    nodes::register(registry)
}
