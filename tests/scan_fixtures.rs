use std::path::PathBuf;

use jstruct::{ClassType, ScanConfig, ScanWarning, TypeEntry, java::LinkKind, scan};

fn fixture_root(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("java")
        .join(name)
}

fn qualified_names(entries: &[TypeEntry]) -> Vec<String> {
    entries.iter().map(TypeEntry::qualified_name).collect()
}

fn fields_of(entry: &TypeEntry) -> Vec<(String, String)> {
    entry
        .fields()
        .iter()
        .map(|f| (f.name().to_string(), f.ty().to_string()))
        .collect()
}

#[test]
fn catalog_lists_top_level_types_in_path_order() {
    let catalog = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");

    assert_eq!(
        qualified_names(catalog.entries()),
        vec![
            "com.example.api.Marker",
            "com.example.legacy.Config",
            "com.example.model.Color",
            "com.example.model.Config",
            "com.example.model.Entity",
            "com.example.model.Named",
            "com.example.model.Player",
            "com.example.model.Point",
        ]
    );
    assert_eq!(catalog.files().len(), 10);
}

#[test]
fn player_fields_skip_methods_and_anonymous_classes() {
    let catalog = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");
    let player = catalog.resolve("Player").expect("player found");

    assert_eq!(player.class_type(), ClassType::Class);
    assert_eq!(player.extends(), Some("Entity"));
    assert_eq!(player.implements(), ["Comparable", "Named"]);
    assert_eq!(player.line(), 10);
    assert_eq!(
        fields_of(player),
        vec![
            ("PREFIX".to_string(), "String".to_string()),
            ("name".to_string(), "String".to_string()),
            ("score".to_string(), "int".to_string()),
            ("history".to_string(), "List<Map<String, Integer>>".to_string()),
            ("onDeath".to_string(), "Runnable".to_string()),
        ]
    );
}

#[test]
fn kinds_and_members_per_declaration() {
    let catalog = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");

    let marker = catalog.resolve("Marker").expect("marker");
    assert_eq!(marker.class_type(), ClassType::Annotation);
    assert_eq!(fields_of(marker), vec![("PRIORITY".to_string(), "int".to_string())]);

    let color = catalog.resolve("Color").expect("color");
    assert_eq!(color.class_type(), ClassType::Enum);
    assert_eq!(fields_of(color), vec![("code".to_string(), "String".to_string())]);

    let named = catalog.resolve("Named").expect("named");
    assert_eq!(named.class_type(), ClassType::Interface);
    assert_eq!(fields_of(named), vec![("UNKNOWN".to_string(), "String".to_string())]);

    let point = catalog.resolve("Point").expect("point");
    assert_eq!(point.class_type(), ClassType::Record);
    assert_eq!(
        fields_of(point),
        vec![
            ("x".to_string(), "int".to_string()),
            ("y".to_string(), "int".to_string()),
            ("ORIGIN".to_string(), "Point".to_string()),
        ]
    );
}

#[test]
fn warnings_cover_files_without_types() {
    let root = fixture_root("catalog");
    let catalog = scan(&root, &ScanConfig::default()).expect("scan fixtures");

    let package_info = root.join("com/example/model/package-info.java");
    let module_info = root.join("module-info.java");
    assert_eq!(
        catalog.warnings(),
        [
            ScanWarning::NoDeclarations {
                path: package_info.clone(),
            },
            ScanWarning::UnrecognizedDeclaration {
                path:   module_info.clone(),
                line:   1,
                header: "module com.example".to_string(),
            },
            ScanWarning::NoDeclarations { path: module_info },
        ]
    );

    let info = catalog
        .files()
        .iter()
        .find(|f| f.path() == package_info)
        .expect("package-info visited");
    assert_eq!(info.declared_package(), Some("com.example.model"));
    assert_eq!(info.type_count(), 0);
}

#[test]
fn unresolved_references_are_library_types_and_qualified_names() {
    let catalog = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");

    let dangling: Vec<(String, LinkKind, String)> = catalog
        .unresolved()
        .into_iter()
        .map(|u| (u.from, u.kind, u.name))
        .collect();
    assert_eq!(
        dangling,
        vec![
            (
                "com.example.model.Config".to_string(),
                LinkKind::Extends,
                "com.example.legacy.Config".to_string()
            ),
            (
                "com.example.model.Entity".to_string(),
                LinkKind::Implements,
                "Serializable".to_string()
            ),
            (
                "com.example.model.Player".to_string(),
                LinkKind::Implements,
                "Comparable".to_string()
            ),
        ]
    );
}

#[test]
fn nested_and_hidden_are_opt_in() {
    let config = ScanConfig::builder()
        .include_nested(true)
        .include_hidden(true)
        .build();
    let catalog = scan(fixture_root("catalog"), &config).expect("scan fixtures");

    let names = qualified_names(catalog.entries());
    assert_eq!(names.first().map(String::as_str), Some(".hidden.Ghost"));
    let stats_at = names
        .iter()
        .position(|n| n == "com.example.model.Player.Stats")
        .expect("nested Stats listed");
    assert_eq!(names[stats_at - 1], "com.example.model.Player");

    let stats = &catalog.entries()[stats_at];
    assert_eq!(stats.enclosing(), Some("Player"));
    assert_eq!(
        fields_of(stats),
        vec![
            ("kills".to_string(), "int".to_string()),
            ("deaths".to_string(), "int".to_string()),
        ]
    );
}

#[test]
fn relative_roots_keep_directory_packages() {
    // integration tests run from the package root
    let absolute = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");

    for relative in ["fixtures/java/catalog", "./fixtures/java/catalog", "fixtures/./java/catalog"] {
        let catalog = scan(relative, &ScanConfig::default()).expect("scan relative root");
        assert_eq!(
            qualified_names(catalog.entries()),
            qualified_names(absolute.entries()),
            "root {relative}"
        );
        let player = catalog.resolve("Player").expect("player found");
        assert_eq!(player.relative_package(), ["com", "example", "model"]);
        assert_eq!(catalog.filter(None, Some("legacy")).len(), 1);
        assert_eq!(catalog.warnings().len(), absolute.warnings().len());
    }
}

#[test]
fn catalog_serializes_to_json() {
    let catalog = scan(fixture_root("catalog"), &ScanConfig::default()).expect("scan fixtures");
    let snapshot = serde_json::to_value(catalog.resolve("Entity").unwrap()).unwrap();
    assert_eq!(snapshot["class_type"], "class");
    assert_eq!(snapshot["implements"][0], "Serializable");
    assert_eq!(snapshot["fields"][0]["type"], "long");
    assert_eq!(snapshot["extends"], serde_json::Value::Null);
}
