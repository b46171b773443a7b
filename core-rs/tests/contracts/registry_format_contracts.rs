// Registry File Format Contract Tests
//
// The registry file is shared with other tools and edited by hand.
// These tests pin its exact on-disk shape.

use portreg::Registry;
use std::fs;
use tempfile::TempDir;

/// WHY: Field order and key names are part of the file format
/// REASON: Files are diffed, committed to dotfile repos and read by other tools
/// BREAKS: Compatibility with registries written by earlier releases
#[test]
fn document_layout_is_stable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut registry = Registry::load(&path).unwrap();
    registry
        .assign_port(3100, Some("web".to_string()), Some("/src/web".to_string()))
        .unwrap();
    registry.assign_port(3200, None, None).unwrap();

    let expected = r#"{
  "assignments": [
    {
      "port": 3100,
      "description": "web",
      "path": "/src/web"
    },
    {
      "port": 3200
    }
  ],
  "blockedPorts": []
}"#;
    assert_eq!(fs::read_to_string(&path).unwrap(), expected);
}

/// WHY: Empty optional fields are omitted, not written as ""
/// BREAKS: Byte-for-byte round trips of existing files
#[test]
fn empty_optional_fields_are_omitted() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");
    fs::write(
        &path,
        r#"{"assignments":[{"port":8000,"description":"","path":""}],"blockedPorts":[{"ports":"9000","description":""}]}"#,
    )
    .unwrap();

    let registry = Registry::load(&path).unwrap();
    registry.save().unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(!content.contains("description"));
    assert!(!content.contains("\"path\""));
    assert!(content.contains("\"ports\": \"9000\""));
}

/// WHY: Init seeds exactly these blocked ports, in this order
/// BREAKS: Users who rely on well-known service ports never being assigned
#[test]
fn init_seeds_default_blocked_ports() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut registry = Registry::load(&path).unwrap();
    registry.init().unwrap();

    let reloaded = Registry::load(&path).unwrap();
    let blocked: Vec<(&str, Option<&str>)> = reloaded
        .blocked_ports()
        .iter()
        .map(|b| (b.spec.as_str(), b.description.as_deref()))
        .collect();

    assert_eq!(
        blocked,
        vec![
            ("3306", Some("MySQL default port")),
            ("5432", Some("PostgreSQL default port")),
            ("6379", Some("Redis default port")),
            ("8080", Some("Common HTTP alternative port")),
            ("27017", Some("MongoDB default port")),
        ]
    );
    assert!(reloaded.list_assignments().is_empty());
}

/// WHY: Init never overwrites an existing registry
/// BREAKS: Users would lose every assignment by re-running init
#[test]
fn init_never_clobbers_existing_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("registry.json");

    let mut registry = Registry::load(&path).unwrap();
    registry.init().unwrap();
    registry.assign_port(3100, Some("keep me".to_string()), None).unwrap();
    let before = fs::read(&path).unwrap();

    let mut second = Registry::load(&path).unwrap();
    assert!(second.init().is_err());
    assert_eq!(fs::read(&path).unwrap(), before);
}

/// WHY: A missing file is an empty registry, not an error
/// REASON: `assign` and `list` work before `init` has ever been run
#[test]
fn missing_file_loads_as_empty_registry() {
    let temp_dir = TempDir::new().unwrap();
    let registry = Registry::load(temp_dir.path().join("never-created.json")).unwrap();

    assert!(registry.list_assignments().is_empty());
    assert!(registry.blocked_ports().is_empty());
    assert!(!registry.path().exists());
}
