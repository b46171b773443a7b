//! Registry file location
//!
//! The registry path is an explicit override when one is given, otherwise
//! `$HOME/.portreg.json`.

use std::env;
use std::ffi::OsStr;
use std::path::PathBuf;

use crate::errors::{PortregError, Result};

/// File name of the default registry in the home directory
pub const DEFAULT_REGISTRY_FILE: &str = ".portreg.json";

/// Environment variable read by the CLI as a registry override
pub const REGISTRY_ENV_VAR: &str = "PORTREG_REGISTRY";

/// Resolve the registry path from an optional override and `$HOME`
pub fn resolve_registry_path(override_path: Option<PathBuf>) -> Result<PathBuf> {
    let home = env::var_os("HOME");
    registry_path_from(override_path, home.as_deref())
}

fn registry_path_from(override_path: Option<PathBuf>, home: Option<&OsStr>) -> Result<PathBuf> {
    if let Some(path) = override_path.filter(|p| !p.as_os_str().is_empty()) {
        return Ok(path);
    }

    match home {
        Some(home) if !home.is_empty() => Ok(PathBuf::from(home).join(DEFAULT_REGISTRY_FILE)),
        _ => Err(PortregError::HomeNotSet),
    }
}
