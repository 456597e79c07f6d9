use super::*;
use crate::test_support::temp_dir;

#[test]
fn default_roots_validate() {
    let cfg = DistConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.entry_out_dir("a"), PathBuf::from("dist").join("a"));
}

#[test]
fn empty_roots_are_rejected() {
    let cfg = DistConfig {
        out_dir: PathBuf::new(),
        ..DistConfig::default()
    };
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("output directory"));
}

#[test]
fn archive_lookup_prefers_plain_name_then_poses_suffix() {
    let tmp = temp_dir("config_archive_lookup");
    std::fs::create_dir_all(&tmp).unwrap();
    let cfg = DistConfig {
        poses_dir: tmp.clone(),
        ..DistConfig::default()
    };

    assert!(matches!(
        cfg.locate_archive("walk"),
        Err(PoseDistError::MissingArchive(name)) if name == "walk"
    ));

    std::fs::write(tmp.join("walk-poses.zip"), b"x").unwrap();
    assert_eq!(cfg.locate_archive("walk").unwrap(), tmp.join("walk-poses.zip"));

    std::fs::write(tmp.join("walk.zip"), b"x").unwrap();
    assert_eq!(cfg.locate_archive("walk").unwrap(), tmp.join("walk.zip"));

    std::fs::remove_dir_all(&tmp).ok();
}
