//! Commands against the identity service.

mod credentials;
mod idps;
mod policies;
mod projects;
mod tenants;

use crate::shell::{Registry, RegistryError};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    credentials::register(registry)?;
    idps::register(registry)?;
    policies::register(registry)?;
    projects::register(registry)?;
    tenants::register(registry)
}
