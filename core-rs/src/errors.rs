//! Error types for portreg

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortregError {
    #[error("registry file already exists at {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("port {port} is already assigned to '{}'", .description.as_deref().unwrap_or(""))]
    PortAlreadyAssigned {
        port: u16,
        description: Option<String>,
    },

    #[error("port {0} is not assigned")]
    PortNotAssigned(u16),

    #[error("port {0} is in blocked range")]
    PortBlocked(u16),

    #[error("no available ports found")]
    NoPortsAvailable,

    #[error("invalid port: {0}")]
    InvalidPort(u16),

    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HOME environment variable not set; pass --registry to choose a registry file")]
    HomeNotSet,
}

impl PortregError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        PortregError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, PortregError>;
