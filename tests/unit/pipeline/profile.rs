use super::*;

#[test]
fn frame_names_follow_the_naming_conventions() {
    let profile = EntryProfile::for_type(EntryType::Legacy);
    assert_eq!(
        profile.frame_candidates(66),
        ["frame-66.jpg".to_owned(), "snapshot-66.jpg".to_owned()]
    );
    assert_eq!(profile.output_frame_name(66), "frame-66.jpg");

    let profile = EntryProfile::for_type(EntryType::Extended);
    assert_eq!(profile.output_frame_name(0), "frame-0.webp");
}

#[test]
fn field_lists_differ_per_type() {
    assert_eq!(
        EntryProfile::for_type(EntryType::Legacy).record_fields,
        &["d", "vectors"]
    );
    assert_eq!(
        EntryProfile::for_type(EntryType::Compact).record_fields,
        &["d", "v"]
    );
    assert!(EntryProfile::for_type(EntryType::Extended).trim.is_none());
}

#[test]
fn only_exact_black_is_trim_eligible() {
    let policy = TrimPolicy::BLACK_LETTERBOX;
    assert!(policy.is_eligible(Some(ColorCode::rgb(0, 0, 0))));
    assert!(!policy.is_eligible(Some(ColorCode::rgb(1, 0, 0))));
    assert!(!policy.is_eligible(None));
    assert_eq!(policy.fit_width, 800);
    assert_eq!(policy.quality, 80);
}
