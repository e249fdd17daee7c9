//! Remote side: the authenticated session and the resource managers on top of it.

pub mod manager;
pub mod modules;
pub mod session;

pub use manager::{JointManager, ResourceManager};
pub use session::Session;
