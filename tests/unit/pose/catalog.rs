use super::*;

#[test]
fn keeps_file_order_and_reads_types() {
    let catalog = Catalog::from_json_str(
        r#"{
            "zeta-walk": {"title": "Walk", "type": "legacy"},
            "alpha-dance": {"title": "Dance", "type": "extended"},
            "mid-jump": {"title": "Jump", "type": "compact"}
        }"#,
    )
    .unwrap();

    let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["zeta-walk", "alpha-dance", "mid-jump"]);
    assert_eq!(catalog.get("alpha-dance").unwrap().kind, EntryType::Extended);
    assert_eq!(catalog.get("mid-jump").unwrap().title, "Jump");
    assert_eq!(catalog.len(), 3);
}

#[test]
fn unknown_or_missing_type_falls_back_to_legacy() {
    let catalog =
        Catalog::from_json_str(r#"{"a": {"title": "A", "type": "holographic"}, "b": {}}"#).unwrap();
    assert_eq!(catalog.get("a").unwrap().kind, EntryType::Legacy);
    assert_eq!(catalog.get("b").unwrap().kind, EntryType::Legacy);
    assert_eq!(catalog.get("b").unwrap().title, "");
}

#[test]
fn type_tags_serialize_lowercase() {
    for (kind, tag) in [
        (EntryType::Legacy, "\"legacy\""),
        (EntryType::Compact, "\"compact\""),
        (EntryType::Extended, "\"extended\""),
    ] {
        assert_eq!(serde_json::to_string(&kind).unwrap(), tag);
        assert_eq!(serde_json::from_str::<EntryType>(tag).unwrap(), kind);
    }
    assert_eq!(EntryType::default(), EntryType::Legacy);
}

#[test]
fn empty_or_invalid_catalogs_are_rejected() {
    assert!(matches!(
        Catalog::from_json_str("{}"),
        Err(PoseDistError::Validation(_))
    ));
    assert!(Catalog::from_json_str("[]").is_err());
    assert!(Catalog::from_json_str(r#"{"a": 3}"#).is_err());
}

#[test]
fn retain_names_filters_in_place() {
    let mut catalog =
        Catalog::from_json_str(r#"{"a": {}, "b": {}, "c": {}}"#).unwrap();
    catalog.retain_names(&["c".to_owned(), "a".to_owned()]);
    let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "c"]);
}
