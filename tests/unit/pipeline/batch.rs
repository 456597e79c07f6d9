use std::path::{Path, PathBuf};

use super::*;
use crate::test_support::{temp_dir, write_zip};

fn config_in(root: &Path) -> DistConfig {
    let cfg = DistConfig {
        catalog_path: root.join("poses").join("poses.json"),
        poses_dir: root.join("poses"),
        out_dir: root.join("dist"),
    };
    std::fs::create_dir_all(&cfg.poses_dir).unwrap();
    cfg
}

const DOC: &[u8] = br#"{"poses": [{"t": 0, "d": 1, "vectors": []}]}"#;

#[test]
fn failures_are_isolated_and_counted_separately() {
    let root = temp_dir("batch_isolation");
    let cfg = config_in(&root);

    write_zip(&cfg.poses_dir.join("good.zip"), &[("poses.json", DOC)]);
    write_zip(
        &cfg.poses_dir.join("suffixed-poses.zip"),
        &[("poses.json", DOC)],
    );
    write_zip(
        &cfg.poses_dir.join("empty.zip"),
        &[("readme.txt", b"x".as_slice())],
    );
    std::fs::write(cfg.poses_dir.join("corrupt.zip"), b"not a zip").unwrap();
    std::fs::create_dir_all(cfg.out_dir.join("done")).unwrap();

    let catalog = Catalog::from_json_str(
        r#"{
            "missing": {"title": "No archive"},
            "good": {"title": "Good"},
            "empty": {"title": "No payload"},
            "corrupt": {"title": "Corrupt"},
            "done": {"title": "Already there"},
            "suffixed": {"title": "Suffixed archive"}
        }"#,
    )
    .unwrap();

    let report = BatchRunner::new(cfg.clone()).unwrap().run(&catalog);
    assert_eq!(report.total(), 6);
    assert_eq!(report.converted(), 2);
    assert_eq!(report.skipped(), 1);
    assert_eq!(report.failed(), 3);

    let names: Vec<_> = report.outcomes.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(
        names,
        vec!["missing", "good", "empty", "corrupt", "done", "suffixed"]
    );
    assert!(matches!(
        report.outcome("empty"),
        Some(EntryOutcome::Failed(msg)) if msg.contains("poses.json")
    ));
    assert!(matches!(
        report.outcome("missing"),
        Some(EntryOutcome::Failed(msg)) if msg.contains("missing archive")
    ));
    assert!(!cfg.out_dir.join("empty").exists());
    assert!(cfg.out_dir.join("suffixed").join("poses.json").is_file());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn second_run_skips_everything() {
    let root = temp_dir("batch_rerun");
    let cfg = config_in(&root);
    write_zip(&cfg.poses_dir.join("a.zip"), &[("poses.json", DOC)]);
    write_zip(&cfg.poses_dir.join("b.zip"), &[("poses.json", DOC)]);
    let catalog = Catalog::from_json_str(r#"{"a": {}, "b": {}}"#).unwrap();

    let runner = BatchRunner::new(cfg.clone()).unwrap();
    let first = runner.run(&catalog);
    assert_eq!(first.converted(), 2);
    let before = std::fs::read(cfg.out_dir.join("a").join("poses.json")).unwrap();

    let second = runner.run(&catalog);
    assert_eq!(second.skipped(), 2);
    assert_eq!(second.converted(), 0);
    assert_eq!(
        std::fs::read(cfg.out_dir.join("a").join("poses.json")).unwrap(),
        before
    );

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = DistConfig {
        poses_dir: PathBuf::new(),
        ..DistConfig::default()
    };
    assert!(BatchRunner::new(cfg).is_err());
}

#[test]
fn panic_payloads_become_messages() {
    let payload = std::panic::catch_unwind(|| panic!("pixel out of range")).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "pixel out of range");

    let payload = std::panic::catch_unwind(|| panic!("{} {}", "formatted", 1)).unwrap_err();
    assert_eq!(panic_message(payload.as_ref()), "formatted 1");
}
