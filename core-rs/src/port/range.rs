/**
 * range.rs
 * Blocked-port range specs
 *
 * A spec is either a single port ("8080") or an inclusive range ("3000-3010").
 * Specs come straight from a hand-editable file, so a malformed spec never
 * raises an error: it simply matches no port.
 */

/// Inclusive range parsed from a blocked-port spec
///
/// Bounds are kept as `i64` so out-of-range numbers in the file
/// ("70000", "-1") parse and then just fail to match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRange {
    pub start: i64,
    pub end: i64,
}

impl PortRange {
    /// Parse a range spec
    ///
    /// # Returns
    /// `None` when the range spec is malformed
    pub fn parse(spec: &str) -> Option<PortRange> {
        if spec.contains('-') {
            let parts: Vec<&str> = spec.split('-').collect();
            if parts.len() != 2 {
                return None;
            }

            let start = parts[0].trim().parse::<i64>().ok()?;
            let end = parts[1].trim().parse::<i64>().ok()?;

            return Some(PortRange { start, end });
        }

        let single = spec.trim().parse::<i64>().ok()?;
        Some(PortRange {
            start: single,
            end: single,
        })
    }

    /// Check if port is within this range
    ///
    /// A reversed range (start > end) contains nothing.
    pub fn contains(&self, port: u16) -> bool {
        let port = i64::from(port);
        port >= self.start && port <= self.end
    }
}

/// Check whether `port` matches a range spec
///
/// Malformed specs match nothing.
pub fn is_port_in_range(port: u16, spec: &str) -> bool {
    PortRange::parse(spec).is_some_and(|range| range.contains(port))
}
