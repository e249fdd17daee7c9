//! Every subcommand, grouped by the service it talks to.
//!
//! Each family exposes `register(&mut Registry)`; [`registry`] assembles them
//! once at start-up.

pub mod ansible;
pub mod compute;
pub mod identity;
pub mod input;
pub mod k8s;
pub mod meter;
pub mod modules;
pub mod monitor;
pub mod notify;
pub mod update;

use crate::shell::{Registry, RegistryError};

pub fn registry() -> Result<Registry, RegistryError> {
    let mut registry = Registry::new();
    compute::register(&mut registry)?;
    identity::register(&mut registry)?;
    monitor::register(&mut registry)?;
    meter::register(&mut registry)?;
    notify::register(&mut registry)?;
    k8s::register(&mut registry)?;
    ansible::register(&mut registry)?;
    update::register(&mut registry)?;
    modules::register(&mut registry)?;
    tracing::trace!(commands = registry.len(), "registry assembled");
    Ok(registry)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_assembles_without_duplicates() {
        let registry = registry().expect("registry");
        for name in [
            "disk-update",
            "disk-create",
            "alarmevent-ack-update",
            "lbacl-show",
            "schedtag-hosts-add",
            "schedtag-cloudregions-remove",
            "host-set-schedtag",
            "idp-create-ldap-single-domain",
            "idp-create-qywechat-oauth2",
            "idp-config-edit",
            "alarmlog-list",
            "policy-show",
            "k8s-cluster-add-machines",
            "k8s-node-cordon",
            "notify-template-create",
            "ansibleplaybookv2-create",
            "billcondition-list",
            "update-refresh",
            "module-list",
        ] {
            assert!(registry.lookup(name).is_ok(), "{name} is registered");
        }
    }

    #[test]
    fn every_command_builds_a_valid_clap_definition() {
        let registry = registry().expect("registry");
        for entry in registry.list_all() {
            entry.command().debug_assert();
        }
        crate::shell::binder::root_command(&registry).debug_assert();
    }
}
