/**
 * model.rs
 * Assignment and blocked-port records
 *
 * Both records are stored verbatim in the registry document. Optional text
 * fields are omitted from the file when absent, and an empty string read
 * from an older file is treated the same as an absent field.
 */

use serde::{Deserialize, Deserializer, Serialize};

use crate::port::is_port_in_range;

/// A reservation of one port for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub port: u16,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
}

impl Assignment {
    pub fn new(port: u16, description: Option<String>, path: Option<String>) -> Self {
        Assignment {
            port,
            description: non_empty(description),
            path: non_empty(path),
        }
    }
}

/// A rule forbidding assignment of a single port or an inclusive range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockedPort {
    /// Range spec: `"N"` or `"N-M"`
    #[serde(rename = "ports", default)]
    pub spec: String,
    #[serde(
        default,
        deserialize_with = "empty_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
}

impl BlockedPort {
    pub fn new(spec: impl Into<String>, description: Option<String>) -> Self {
        BlockedPort {
            spec: spec.into(),
            description: non_empty(description),
        }
    }

    /// Check if this rule blocks `port`
    ///
    /// Malformed specs block nothing.
    pub fn matches(&self, port: u16) -> bool {
        is_port_in_range(port, &self.spec)
    }
}

/// Blocked ports seeded by `Registry::init`
pub fn default_blocked_ports() -> Vec<BlockedPort> {
    [
        ("3306", "MySQL default port"),
        ("5432", "PostgreSQL default port"),
        ("6379", "Redis default port"),
        ("8080", "Common HTTP alternative port"),
        ("27017", "MongoDB default port"),
    ]
    .into_iter()
    .map(|(spec, description)| BlockedPort::new(spec, Some(description.to_string())))
    .collect()
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(non_empty(value))
}
