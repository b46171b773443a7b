/**
 * registry module
 * Port assignments, blocked-port rules and their JSON document
 */

pub mod model;
pub mod registry;
pub mod store;

pub use model::{default_blocked_ports, Assignment, BlockedPort};
pub use registry::{PortStatus, Registry};
