//! Integration tests for the complete registry lifecycle
//!
//! Tests the full lifecycle of registry operations including:
//! - Initialization
//! - Assignment (explicit and automatic)
//! - Reload from disk
//! - Release

use portreg::{PortregError, Registry};
use std::fs;
use tempfile::TempDir;

fn desc(s: &str) -> Option<String> {
    Some(s.to_string())
}

#[test]
fn test_complete_registry_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("registry.json");

    // 1. Initialize
    let mut registry = Registry::load(&registry_path).unwrap();
    registry.init().unwrap();
    assert!(registry_path.exists());

    // 2. Assign explicitly and automatically
    registry
        .assign_port(8000, desc("api"), desc("/src/api"))
        .unwrap();
    let web_port = registry.assign_next_available(desc("web"), desc("/src/web")).unwrap();
    assert_eq!(web_port, 3100);

    // 3. Defaults block well-known service ports
    let err = registry.assign_port(5432, desc("db"), None).unwrap_err();
    assert!(matches!(err, PortregError::PortBlocked(5432)));

    // 4. A fresh process sees the same state
    let reloaded = Registry::load(&registry_path).unwrap();
    assert_eq!(reloaded.list_assignments(), registry.list_assignments());
    assert_eq!(reloaded.blocked_ports(), registry.blocked_ports());

    // 5. Release
    let mut reloaded = reloaded;
    reloaded.unassign_port(8000).unwrap();

    let final_state = Registry::load(&registry_path).unwrap();
    let ports: Vec<u16> = final_state.list_assignments().iter().map(|a| a.port).collect();
    assert_eq!(ports, vec![3100]);
}

#[test]
fn test_round_trip_preserves_order_and_fields() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("registry.json");

    let mut registry = Registry::load(&registry_path).unwrap();
    registry.init().unwrap();
    registry.assign_port(9000, desc("nine"), None).unwrap();
    registry.assign_port(4000, None, desc("/src/four")).unwrap();
    registry.assign_port(7000, desc("seven"), desc("/src/seven")).unwrap();
    registry.save().unwrap();

    let reloaded = Registry::load(&registry_path).unwrap();
    assert_eq!(reloaded.list_assignments(), registry.list_assignments());
    assert_eq!(reloaded.blocked_ports(), registry.blocked_ports());
}

#[test]
fn test_hand_edited_blocked_ranges() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("registry.json");

    fs::write(
        &registry_path,
        r#"{
  "assignments": [ { "port": 3100 }, { "port": 3101 } ],
  "blockedPorts": [
    { "ports": "not-a-range" },
    { "ports": "3102-3105", "description": "reserved for tooling" }
  ]
}"#,
    )
    .unwrap();

    let mut registry = Registry::load(&registry_path).unwrap();
    assert!(!registry.is_port_available(3104));

    let port = registry.assign_next_available(None, None).unwrap();
    assert_eq!(port, 3106);
}

#[test]
fn test_blocked_rule_added_later_keeps_existing_assignment() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("registry.json");

    let mut registry = Registry::load(&registry_path).unwrap();
    registry.assign_port(4500, desc("legacy"), None).unwrap();

    // Simulate a manual edit that blocks the assigned port
    let content = fs::read_to_string(&registry_path).unwrap();
    let edited = content.replace(
        "\"blockedPorts\": []",
        "\"blockedPorts\": [ { \"ports\": \"4000-4999\" } ]",
    );
    fs::write(&registry_path, edited).unwrap();

    let mut registry = Registry::load(&registry_path).unwrap();
    assert_eq!(registry.list_assignments().len(), 1);
    assert!(registry.is_port_blocked(4500));

    registry.unassign_port(4500).unwrap();
    assert!(registry.list_assignments().is_empty());
}

#[test]
fn test_save_into_missing_directory() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("config/portreg/registry.json");

    let mut registry = Registry::load(&registry_path).unwrap();
    registry.assign_port(8000, None, None).unwrap();

    assert!(registry_path.exists());
}

#[test]
fn test_corrupt_file_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let registry_path = temp_dir.path().join("registry.json");
    fs::write(&registry_path, "{ \"assignments\": [").unwrap();

    let err = Registry::load(&registry_path).unwrap_err();
    assert!(matches!(err, PortregError::ParseError(_)));

    // The broken file is left for the user to inspect
    assert_eq!(
        fs::read_to_string(&registry_path).unwrap(),
        "{ \"assignments\": ["
    );
}
