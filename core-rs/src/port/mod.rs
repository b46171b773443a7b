/**
 * port module
 * Port range specs and auto-assignment bounds
 */

pub mod range;

pub use range::{is_port_in_range, PortRange};

/// First port considered by auto-assignment
pub const AUTO_ASSIGN_START: u16 = 3100;

/// Last port considered by auto-assignment
pub const AUTO_ASSIGN_END: u16 = u16::MAX;
