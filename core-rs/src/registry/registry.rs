/**
 * registry.rs
 * Port assignment registry backed by a single JSON document
 *
 * Document format:
 * ```json
 * {
 *   "assignments": [ { "port": 3100, "description": "api", "path": "/src/api" } ],
 *   "blockedPorts": [ { "ports": "3306", "description": "MySQL default port" } ]
 * }
 * ```
 *
 * Assignments keep insertion order. Every mutation rewrites the whole
 * document; in-memory state only changes once that write has succeeded.
 */

use std::path::{Path, PathBuf};
use tracing::info;

use crate::errors::{PortregError, Result};
use crate::port::{AUTO_ASSIGN_END, AUTO_ASSIGN_START};
use crate::registry::model::{default_blocked_ports, Assignment, BlockedPort};
use crate::registry::store;

/// Why a port is or is not available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortStatus<'a> {
    Available,
    Assigned(&'a Assignment),
    Blocked(&'a BlockedPort),
}

/// Port Registry - assignments and blocked-port rules for one file
#[derive(Debug)]
pub struct Registry {
    path: PathBuf,
    assignments: Vec<Assignment>,
    blocked_ports: Vec<BlockedPort>,
}

impl Registry {
    /// Load the registry stored at `path`
    ///
    /// A missing file yields an empty registry; call [`Registry::init`] to
    /// create it with the default blocked ports.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let document = store::read_document(&path)?.unwrap_or_default();

        Ok(Registry {
            path,
            assignments: document.assignments,
            blocked_ports: document.blocked_ports,
        })
    }

    /// Get registry file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the registry file with default blocked ports
    ///
    /// # Errors
    /// Returns `AlreadyInitialized` if a file already exists at the path
    pub fn init(&mut self) -> Result<()> {
        let exists = self.path.try_exists().map_err(|e| {
            PortregError::io(format!("failed to check {}", self.path.display()), e)
        })?;
        if exists {
            return Err(PortregError::AlreadyInitialized(self.path.clone()));
        }

        let blocked_ports = default_blocked_ports();
        store::write_document(&self.path, &[], &blocked_ports)?;

        self.assignments.clear();
        self.blocked_ports = blocked_ports;

        info!(path = %self.path.display(), "registry initialized");
        Ok(())
    }

    /// Persist current state to disk
    pub fn save(&self) -> Result<()> {
        store::write_document(&self.path, &self.assignments, &self.blocked_ports)
    }

    /// Assign a specific port
    ///
    /// # Errors
    /// Returns error if:
    /// - Port is 0
    /// - Port is already assigned
    /// - Port matches a blocked-port rule
    /// - Registry cannot be saved (the assignment is then discarded)
    pub fn assign_port(
        &mut self,
        port: u16,
        description: Option<String>,
        path: Option<String>,
    ) -> Result<()> {
        if port == 0 {
            return Err(PortregError::InvalidPort(port));
        }

        if let Some(existing) = self.get(port) {
            return Err(PortregError::PortAlreadyAssigned {
                port,
                description: existing.description.clone(),
            });
        }

        if self.is_port_blocked(port) {
            return Err(PortregError::PortBlocked(port));
        }

        let mut assignments = self.assignments.clone();
        assignments.push(Assignment::new(port, description, path));
        self.commit(assignments)?;

        info!(port, "port assigned");
        Ok(())
    }

    /// Assign the lowest available port from 3100 upward
    ///
    /// # Returns
    /// The assigned port
    pub fn assign_next_available(
        &mut self,
        description: Option<String>,
        path: Option<String>,
    ) -> Result<u16> {
        let port = self
            .find_next_available_port()
            .ok_or(PortregError::NoPortsAvailable)?;

        self.assign_port(port, description, path)?;
        Ok(port)
    }

    /// Release a port assignment
    ///
    /// # Returns
    /// The removed assignment
    pub fn unassign_port(&mut self, port: u16) -> Result<Assignment> {
        let index = self
            .assignments
            .iter()
            .position(|a| a.port == port)
            .ok_or(PortregError::PortNotAssigned(port))?;

        let mut assignments = self.assignments.clone();
        let removed = assignments.remove(index);
        self.commit(assignments)?;

        info!(port, "port unassigned");
        Ok(removed)
    }

    /// All assignments in insertion order
    pub fn list_assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// All blocked-port rules in file order
    pub fn blocked_ports(&self) -> &[BlockedPort] {
        &self.blocked_ports
    }

    /// Get assignment for a port
    pub fn get(&self, port: u16) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.port == port)
    }

    /// Check if a port can be assigned
    pub fn is_port_available(&self, port: u16) -> bool {
        self.status(port) == PortStatus::Available
    }

    /// Check if a port matches any blocked-port rule
    pub fn is_port_blocked(&self, port: u16) -> bool {
        self.blocking_rule(port).is_some()
    }

    /// First blocked-port rule matching `port`
    pub fn blocking_rule(&self, port: u16) -> Option<&BlockedPort> {
        self.blocked_ports.iter().find(|b| b.matches(port))
    }

    /// Explain whether a port is available
    ///
    /// An existing assignment takes precedence over a blocking rule.
    pub fn status(&self, port: u16) -> PortStatus<'_> {
        if let Some(assignment) = self.get(port) {
            return PortStatus::Assigned(assignment);
        }
        match self.blocking_rule(port) {
            Some(rule) => PortStatus::Blocked(rule),
            None => PortStatus::Available,
        }
    }

    /// Find the lowest available port in 3100..=65535
    pub fn find_next_available_port(&self) -> Option<u16> {
        (AUTO_ASSIGN_START..=AUTO_ASSIGN_END).find(|&port| self.is_port_available(port))
    }

    fn commit(&mut self, assignments: Vec<Assignment>) -> Result<()> {
        store::write_document(&self.path, &assignments, &self.blocked_ports)?;
        self.assignments = assignments;
        Ok(())
    }
}
