//! Rendering of assignments and blocked ports for the CLI

use crate::errors::{PortregError, Result};
use crate::registry::{Assignment, BlockedPort};

const COLUMN_GAP: usize = 2;

/// Render assignments as an aligned PORT / DESCRIPTION / PATH table
///
/// Returns "No ports assigned" for an empty list.
pub fn render_assignments_table(assignments: &[Assignment]) -> String {
    if assignments.is_empty() {
        return "No ports assigned\n".to_string();
    }

    let mut rows = vec![
        vec!["PORT".to_string(), "DESCRIPTION".to_string(), "PATH".to_string()],
        vec!["----".to_string(), "-----------".to_string(), "----".to_string()],
    ];
    rows.extend(assignments.iter().map(|a| {
        vec![
            a.port.to_string(),
            a.description.clone().unwrap_or_default(),
            a.path.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }));

    render_rows(&rows)
}

/// Render assignments as a pretty JSON array
pub fn render_assignments_json(assignments: &[Assignment]) -> Result<String> {
    serde_json::to_string_pretty(assignments)
        .map_err(|e| PortregError::SerializationError(format!("failed to marshal JSON: {}", e)))
}

/// Render blocked-port rules as a PORTS / DESCRIPTION table
pub fn render_blocked_table(blocked_ports: &[BlockedPort]) -> String {
    if blocked_ports.is_empty() {
        return "No blocked ports\n".to_string();
    }

    let mut rows = vec![
        vec!["PORTS".to_string(), "DESCRIPTION".to_string()],
        vec!["-----".to_string(), "-----------".to_string()],
    ];
    rows.extend(
        blocked_ports
            .iter()
            .map(|b| vec![b.spec.clone(), b.description.clone().unwrap_or_default()]),
    );

    render_rows(&rows)
}

// Pads every column but the last to its widest cell plus the gap
fn render_rows(rows: &[Vec<String>]) -> String {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..columns)
        .map(|col| {
            rows.iter()
                .filter_map(|row| row.get(col))
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for row in rows {
        let last = row.len().saturating_sub(1);
        for (col, cell) in row.iter().enumerate() {
            if col == last {
                out.push_str(cell);
            } else {
                out.push_str(&format!("{:<width$}", cell, width = widths[col] + COLUMN_GAP));
            }
        }
        out.push('\n');
    }
    out
}
