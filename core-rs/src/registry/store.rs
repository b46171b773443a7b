/**
 * store.rs
 * Reading and atomically replacing the registry document
 *
 * Writes go to a temporary file in the target's directory which is then
 * renamed over the target, so readers see either the old or the new
 * document. There is no locking: two writers racing on the same file
 * both succeed and the last rename wins.
 */

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::{Builder, PersistError};
use tracing::{debug, warn};

use crate::errors::{PortregError, Result};
use crate::registry::model::{Assignment, BlockedPort};

/// Registry document as read from disk
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryDocument {
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    #[serde(default)]
    pub blocked_ports: Vec<BlockedPort>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RegistryDocumentRef<'a> {
    assignments: &'a [Assignment],
    blocked_ports: &'a [BlockedPort],
}

/// Read the registry document at `path`
///
/// # Returns
/// `None` if no file exists at `path`
pub fn read_document(path: &Path) -> Result<Option<RegistryDocument>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "registry file not found");
            return Ok(None);
        }
        Err(e) => {
            return Err(PortregError::io(
                format!("failed to read registry file {}", path.display()),
                e,
            ))
        }
    };

    let document: RegistryDocument = serde_json::from_str(&content)?;
    debug!(
        path = %path.display(),
        assignments = document.assignments.len(),
        blocked_ports = document.blocked_ports.len(),
        "registry loaded"
    );

    Ok(Some(document))
}

/// Serialize the registry document
pub fn render_document(assignments: &[Assignment], blocked_ports: &[BlockedPort]) -> Result<String> {
    let document = RegistryDocumentRef {
        assignments,
        blocked_ports,
    };
    serde_json::to_string_pretty(&document).map_err(|e| {
        PortregError::SerializationError(format!("failed to serialize registry: {}", e))
    })
}

/// Atomically replace the registry document at `path`
///
/// Creates the parent directory if missing. If the final rename fails the
/// temporary file is removed and the previous document is left untouched.
pub fn write_document(
    path: &Path,
    assignments: &[Assignment],
    blocked_ports: &[BlockedPort],
) -> Result<()> {
    let json = render_document(assignments, blocked_ports)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| {
        PortregError::io(format!("failed to create directory {}", dir.display()), e)
    })?;

    let mut tmp = Builder::new()
        .prefix(".portreg-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| PortregError::io("failed to create temporary file", e))?;

    tmp.write_all(json.as_bytes())
        .map_err(|e| PortregError::io("failed to write temporary file", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PortregError::io("failed to flush temporary file", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(tmp.path(), fs::Permissions::from_mode(0o644))
            .map_err(|e| PortregError::io("failed to set registry permissions", e))?;
    }

    tmp.persist(path).map_err(|PersistError { error, file }| {
        if let Err(cleanup) = file.close() {
            warn!(error = %cleanup, "failed to remove temporary registry file");
        }
        PortregError::io(format!("failed to save registry {}", path.display()), error)
    })?;

    debug!(path = %path.display(), bytes = json.len(), "registry saved atomically");
    Ok(())
}
