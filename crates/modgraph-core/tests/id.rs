use modgraph_core::id::{ModuleSelector, ModuleVersionId};

#[test]
fn module_version_id_parse_valid() {
    let id = ModuleVersionId::parse("com.example:my-lib:1.0.0").unwrap();
    assert_eq!(id.group, "com.example");
    assert_eq!(id.name, "my-lib");
    assert_eq!(id.version, "1.0.0");
}

#[test]
fn module_version_id_parse_two_parts_returns_none() {
    assert!(ModuleVersionId::parse("group:name").is_none());
}

#[test]
fn module_version_id_parse_empty_string() {
    assert!(ModuleVersionId::parse("").is_none());
}

#[test]
fn module_version_id_parse_four_parts_returns_none() {
    assert!(ModuleVersionId::parse("group:name:version:extra").is_none());
}

#[test]
fn module_version_id_display_roundtrip() {
    let s = "com.example:my-lib:1.0.0";
    assert_eq!(ModuleVersionId::parse(s).unwrap().to_string(), s);
}

#[test]
fn module_version_id_key_drops_version() {
    let id = ModuleVersionId::new("org.a", "a", "1.2");
    assert_eq!(id.key(), "org.a:a");
}

#[test]
fn module_version_ids_differ_by_version() {
    let a = ModuleVersionId::new("org.a", "a", "1.0");
    let b = ModuleVersionId::new("org.a", "a", "2.0");
    assert_ne!(a, b);
    assert_eq!(a.key(), b.key());
}

#[test]
fn selector_parse_keeps_dynamic_constraint() {
    let sel = ModuleSelector::parse("org.a:a:1.+").unwrap();
    assert_eq!(sel.version, "1.+");
    assert!(sel.matches_module(&ModuleVersionId::new("org.a", "a", "1.4")));
    assert!(!sel.matches_module(&ModuleVersionId::new("org.b", "a", "1.4")));
}
