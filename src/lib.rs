//! cloudadm: administrative command-line client for a multi-tenant cloud
//! platform.
//!
//! The binary is a thin shell over [`commands::registry`] and
//! [`shell::binder::run`]; everything else lives here so the documentation
//! generator and the tests can reach it.

pub mod client;
pub mod commands;
pub mod config;
pub mod infra;
pub mod render;
pub mod shell;
