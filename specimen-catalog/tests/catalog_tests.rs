//! Integration tests for specimen-catalog crate.

use specimen_catalog::{
    Catalog, CatalogBuilder, CatalogDocument, CatalogError, FileRecord, FontCatalog,
    HASH_PRIME, NameKey, hash_name, write_document,
};
use specimen_config::FixedLocator;

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn face(path: &str, family: &[&str], style: &[&str], full: &[&str], ps: &[&str]) -> FileRecord {
    FileRecord {
        path: path.to_string(),
        index: 0,
        family: strings(family),
        style: strings(style),
        full: strings(full),
        postscript: strings(ps),
        ..Default::default()
    }
}

/// A small family of three faces plus an unrelated one.
fn sample_catalog() -> Catalog {
    let mut builder = CatalogBuilder::new();
    builder.extend([
        face(
            "fonts/Arial.ttf",
            &["Arial"],
            &["Regular"],
            &["Arial"],
            &["ArialMT"],
        ),
        face(
            "fonts/ArialBold.ttf",
            &["Arial"],
            &["Bold"],
            &["Arial Bold"],
            &["Arial-BoldMT"],
        ),
        face(
            "fonts/ArialItalic.ttf",
            &["Arial"],
            &["Italic"],
            &["Arial Italic"],
            &["Arial-ItalicMT"],
        ),
        face(
            "fonts/Symbol.ttf",
            &["Symbol"],
            &["Regular"],
            &["Symbol"],
            &["SymbolMT"],
        ),
    ]);
    Catalog::from_document(builder.build()).expect("generated catalog should load")
}

#[test]
fn test_spec_example_document() {
    let json = format!(
        r#"{{
            "files": [{{"path": "A.ttf", "index": 0, "family": ["Arial"], "style": [], "full": [],
                        "prefer_family": [], "prefer_style": [], "postscript": []}}],
            "links": [{{"name": "Arial", "inst": [0]}}],
            "fontsets": [],
            "link_hash": [{{"key": {}, "vals": [0]}}],
            "fontset_hash": []
        }}"#,
        hash_name("Arial").unwrap()
    );
    let catalog = Catalog::from_json(&json).unwrap();
    let font = catalog.search_by_name("Arial");
    assert!(font.is_some(), "Arial should resolve");
    assert_eq!(font.unwrap().path(), "A.ttf");
}

#[test]
fn test_search_by_name_every_link_kind() {
    let catalog = sample_catalog();
    for (name, path) in [
        ("ArialMT", "fonts/Arial.ttf"),
        ("Arial Bold", "fonts/ArialBold.ttf"),
        ("Arial-Italic", "fonts/ArialItalic.ttf"),
        ("Symbol-Regular", "fonts/Symbol.ttf"),
    ] {
        let font = catalog.search_by_name(name);
        assert!(font.is_some(), "{name} should resolve");
        assert_eq!(font.unwrap().path(), path, "{name} resolved to wrong face");
    }
}

#[test]
fn test_search_by_name_not_found() {
    let catalog = sample_catalog();
    assert!(catalog.search_by_name("").is_none());
    assert!(catalog.search_by_name("no-such-font").is_none());
    assert!(
        catalog.search_by_name("arialmt").is_none(),
        "matching is case-sensitive"
    );
}

#[test]
fn test_collision_disambiguation() {
    // "ab" and "Vx" share bucket 292.
    assert_eq!(hash_name("ab"), hash_name("Vx"));

    let mut builder = CatalogBuilder::new();
    builder.extend([
        face("ab.ttf", &[], &[], &["ab"], &[]),
        face("vx.ttf", &[], &[], &["Vx"], &[]),
    ]);
    let doc = builder.build();
    assert_eq!(doc.link_hash.len(), 1, "both names should share one bucket");
    assert_eq!(doc.link_hash[0].vals, vec![0, 1]);

    let catalog = Catalog::from_document(doc).unwrap();
    assert_eq!(catalog.search_by_name("ab").unwrap().path(), "ab.ttf");
    assert_eq!(catalog.search_by_name("Vx").unwrap().path(), "vx.ttf");
    assert!(
        catalog.search_by_name("Uz").is_none(),
        "same bucket, no record"
    );
}

#[test]
fn test_first_exact_match_wins() {
    let catalog = Catalog::from_json(
        r#"{
            "file": [{"path": "first.ttf"}, {"path": "second.ttf"}],
            "link": [{"name": "ab", "inst": [1]}, {"name": "ab", "inst": [0]}],
            "link_hash": [{"key": 292, "vals": [1, 0]}]
        }"#,
    )
    .unwrap();
    assert_eq!(catalog.search_by_name("ab").unwrap().path(), "first.ttf");
}

#[test]
fn test_only_first_instance_is_used() {
    let catalog = Catalog::from_json(
        r#"{
            "file": [{"path": "a.ttf"}, {"path": "b.ttf"}],
            "link": [{"name": "ab", "inst": [1, 0]}],
            "link_hash": [{"key": 292, "vals": [0]}]
        }"#,
    )
    .unwrap();
    assert_eq!(catalog.search_by_name("ab").unwrap().path(), "b.ttf");
}

#[test]
fn test_family_lookup_returns_all_members() {
    let catalog = sample_catalog();
    let fontset = catalog.search_by_family("Arial");
    assert!(fontset.is_some(), "Arial family should exist");
    let fontset = fontset.unwrap();
    assert_eq!(fontset.name(), "Arial");
    assert_eq!(fontset.len(), 3);
    assert_eq!(fontset.members(), &[0, 1, 2]);

    let paths: Vec<&str> = (0..fontset.len())
        .map(|i| catalog.fontset_get_font(&fontset, i).path())
        .collect();
    assert_eq!(
        paths,
        vec![
            "fonts/Arial.ttf",
            "fonts/ArialBold.ttf",
            "fonts/ArialItalic.ttf"
        ]
    );
    assert_eq!(fontset.iter().count(), 3);
    assert!(fontset.get(3).is_none());
}

#[test]
fn test_single_face_family_is_not_a_fontset() {
    let catalog = sample_catalog();
    assert!(catalog.search_by_family("Symbol").is_none());
    assert!(catalog.search_by_family("").is_none());
}

#[test]
#[should_panic(expected = "out of range")]
fn test_fontset_index_out_of_range_panics() {
    let catalog = sample_catalog();
    let fontset = catalog.search_by_family("Arial").unwrap();
    let _ = catalog.fontset_get_font(&fontset, 3);
}

#[test]
fn test_font_name_accessors() {
    let catalog = sample_catalog();
    let font = catalog.search_by_name("Arial-BoldMT").unwrap();
    assert_eq!(font.index(), 0);
    assert_eq!(font.name_count(NameKey::Family), 1);
    assert_eq!(font.name(NameKey::Style, 0), Some("Bold"));
    assert_eq!(font.name(NameKey::FullName, 0), Some("Arial Bold"));
    assert_eq!(font.name(NameKey::PostScript, 0), Some("Arial-BoldMT"));
    assert_eq!(font.name_count(NameKey::PreferFamily), 0);
    assert_eq!(font.name(NameKey::PreferStyle, 0), None);
    assert_eq!(font.name(NameKey::Family, 5), None);
}

#[test]
fn test_name_key_raw_values() {
    for key in NameKey::ALL {
        assert_eq!(NameKey::from_raw(key.to_raw()), Some(key));
    }
    assert_eq!(NameKey::from_raw(2), Some(NameKey::FullName));
    assert_eq!(NameKey::from_raw(6), None);
    assert_eq!(NameKey::PreferFamily.field_name(), "prefer_family");
}

#[test]
fn test_resolve_collects_family_members() {
    let catalog = sample_catalog();
    let resolution = catalog.resolve("Arial Italic").unwrap();
    assert_eq!(resolution.font.path(), "fonts/ArialItalic.ttf");
    assert_eq!(resolution.names.family_names, vec!["Arial"]);
    let paths: Vec<&str> = resolution.members.iter().map(|f| f.path()).collect();
    assert_eq!(
        paths,
        vec![
            "fonts/ArialItalic.ttf",
            "fonts/Arial.ttf",
            "fonts/ArialBold.ttf"
        ]
    );

    let lone = catalog.resolve("SymbolMT").unwrap();
    assert_eq!(lone.members.len(), 1);
    assert!(catalog.resolve("Helvetica").is_none());
}

#[test]
fn test_every_bucket_key_matches_name_hash() {
    let catalog = sample_catalog();
    let doc = catalog.document();
    for bucket in &doc.link_hash {
        assert!(bucket.key < HASH_PRIME);
        for &i in &bucket.vals {
            assert_eq!(hash_name(&doc.links[i as usize].name), Some(bucket.key));
        }
    }
    assert_eq!(catalog.link_table().entries(), catalog.link_count());
    assert_eq!(catalog.fontset_table().entries(), catalog.fontset_count());
}

#[test]
fn test_load_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xetex-fontdb.json");
    let doc = sample_catalog().document().clone();
    write_document(&doc, &path).unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.file_count(), 4);
    assert!(catalog.search_by_name("SymbolMT").is_some());

    let catalog = Catalog::init(&FixedLocator::new(path)).unwrap();
    assert_eq!(catalog.fonts().count(), 4);
    catalog.teardown();
}

#[test]
fn test_load_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));
    assert!(err.is_not_found());
}

#[test]
fn test_load_malformed_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, "{ truncated").unwrap();
    let err = Catalog::load(&path).unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
    assert!(!err.is_not_found());
}

#[test]
fn test_generated_document_survives_json() {
    let doc = sample_catalog().document().clone();
    let json = doc.to_json_string().unwrap();
    assert!(json.starts_with(r#"{"file":["#));
    let reparsed = CatalogDocument::from_json_str(&json).unwrap();
    assert_eq!(reparsed, doc);
}

#[test]
fn test_session_handle_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("xetex-fontdb.json");
    write_document(sample_catalog().document(), &path).unwrap();

    let mut fonts = FontCatalog::new();
    assert!(fonts.initialize(&FixedLocator::new(path)));
    assert_eq!(
        fonts.search_name("ArialMT").map(|f| f.path().to_string()),
        Some("fonts/Arial.ttf".to_string())
    );
    assert_eq!(fonts.search_family("Arial").map(|s| s.len()), Some(3));
    fonts.terminate();
    fonts.terminate();
    assert!(fonts.search_name("ArialMT").is_none());
}
