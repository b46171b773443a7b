//! # portreg - static port assignment registry
//!
//! Keeps track of which local ports are reserved for which projects so
//! development servers never collide.
//!
//! ## Core Principle
//!
//! **One JSON file is the whole state**: every command loads the registry,
//! performs at most one mutation and rewrites the file atomically.
//!
//! ```text
//! ~/.portreg.json
//! {
//!   "assignments":  [ { "port": 3100, "description": "web", "path": "/src/web" } ],
//!   "blockedPorts": [ { "ports": "3306", "description": "MySQL default port" } ]
//! }
//! ```
//!
//! Concurrent invocations are not locked against each other; the atomic
//! rename only guarantees that readers never see a half-written file.

pub mod errors;
pub mod locator;
pub mod logging;
pub mod output;
pub mod port;
pub mod registry;

pub use errors::{PortregError, Result};
pub use locator::resolve_registry_path;
pub use port::{is_port_in_range, PortRange};
pub use registry::{Assignment, BlockedPort, PortStatus, Registry};

/// Crate version reported by `portreg version`
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
