//! Scope tree properties over many reopened files.

use serde_json::json;
use slice2ts_binder::{Binding, ScopeId, build_scope};
use slice2ts_syntax::{LoadedModule, LoadedModules, SliceSource};

fn file_declaring(index: usize) -> LoadedModule {
    let tree = json!({"modules": [{
        "type": "module",
        "name": "Shared",
        "content": [
            {"type": "const", "name": format!("Value{index}"), "dataType": "int"},
            {"type": "module", "name": "Nested", "content": [
                {"type": "sequence", "name": format!("List{index}"), "dataType": "string"}
            ]}
        ]
    }]});
    let parsed: SliceSource = serde_json::from_value(tree).expect("valid tree");
    LoadedModule::new(format!("Part{index}"), "", parsed)
}

#[test]
fn reopening_across_many_files_yields_the_union() {
    const FILES: usize = 12;
    let modules: LoadedModules = (0..FILES).map(file_declaring).collect();

    let tree = build_scope(&modules).expect("builds");
    let shared = tree.child_scope(ScopeId::ROOT, "Shared").expect("Shared");
    let nested = tree.child_scope(shared, "Nested").expect("Nested");

    // root, ::Shared, ::Shared::Nested
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.get(shared).local_names().count(), FILES + 1);
    assert_eq!(tree.get(nested).local_names().count(), FILES);

    for index in 0..FILES {
        let name = format!("Shared::Nested::List{index}");
        let resolved = tree.resolve(ScopeId::ROOT, &name).expect("resolves");
        assert_eq!(resolved.scope, nested);
    }
}

#[test]
fn names_in_parent_stay_visible_from_nested_scopes() {
    let modules: LoadedModules = (0..3).map(file_declaring).collect();
    let tree = build_scope(&modules).expect("builds");
    let shared = tree.child_scope(ScopeId::ROOT, "Shared").expect("Shared");
    let nested = tree.child_scope(shared, "Nested").expect("Nested");

    assert!(matches!(
        tree.lookup(nested, "Value2"),
        Some((owner, Binding::Declaration(_))) if owner == shared
    ));
    assert_eq!(tree.scope_by_path("::Shared::Nested"), Some(nested));
    assert_eq!(tree.scope_by_path("::Missing"), None);
}
