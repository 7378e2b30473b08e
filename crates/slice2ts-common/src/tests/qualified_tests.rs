use crate::qualified::{QualifiedName, join_module_path, module_segments, top_level_module};

#[test]
fn parses_unqualified_name() {
    let name = QualifiedName::parse("Identity");
    assert!(!name.rooted);
    assert!(!name.is_qualified());
    assert_eq!(name.name, "Identity");
}

#[test]
fn parses_rooted_qualified_name() {
    let name = QualifiedName::parse("::Ice::Identity");
    assert!(name.rooted);
    assert_eq!(name.qualifier, vec!["Ice"]);
    assert_eq!(name.name, "Identity");
    assert_eq!(name.to_ts_path(), "Ice.Identity");
}

#[test]
fn ts_path_escapes_each_segment() {
    let name = QualifiedName::parse("Demo::default::Item");
    assert_eq!(name.to_ts_path(), "Demo._default.Item");
    assert_eq!(name.qualifier_text(), "Demo::default");
}

#[test]
fn module_path_helpers() {
    assert_eq!(join_module_path("", "Foo"), "::Foo");
    assert_eq!(join_module_path("::Foo", "Bar"), "::Foo::Bar");
    assert_eq!(top_level_module("::Foo::Bar"), Some("Foo"));
    assert_eq!(top_level_module(""), None);
    assert_eq!(module_segments("::Foo::Bar").collect::<Vec<_>>(), vec!["Foo", "Bar"]);
}
