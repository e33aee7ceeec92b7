//! Integration tests for corpus replay and resource checks.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use firequery_harness::{
    check_resources, FuzzTarget, HarnessError, ReplayConfig, Replayer, CONTINUE,
};

/// Resources shipped with the fuzz crate.
fn shipped_resources() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fuzz")
        .join("resources")
        .to_string_lossy()
        .into_owned()
}

/// Helper to lay out a resource root with the given seeds per owner.
fn create_resource_root(seeds: &[(FuzzTarget, &str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let root = dir.path().to_string_lossy().into_owned();

    for target in FuzzTarget::ALL.into_iter().filter(|t| t.owns_resources()) {
        fs::create_dir_all(target.corpus_location(&root)).expect("Failed to create corpus");
        fs::write(target.dictionary_location(&root), "\"where\"\n")
            .expect("Failed to write dictionary");
    }
    for (target, name, contents) in seeds {
        let path = PathBuf::from(target.corpus_location(&root)).join(name);
        fs::write(path, contents).expect("Failed to write seed");
    }

    dir
}

// =============================================================================
// Replay
// =============================================================================

#[test]
fn test_replay_directory_in_path_order() {
    let dir = create_resource_root(&[
        (FuzzTarget::Query, "b", "rooms where a > 1"),
        (FuzzTarget::Query, "a", "rooms"),
        (FuzzTarget::Query, "c", ""),
    ]);
    let root = dir.path().to_string_lossy().into_owned();

    let report = Replayer::new(FuzzTarget::Query)
        .replay_paths(&[FuzzTarget::Query.corpus_location(&root)])
        .expect("Replay failed");

    assert_eq!(report.executed_count(), 3);
    assert_eq!(report.skipped_count(), 0);
    let names: Vec<_> = report
        .executed
        .iter()
        .map(|input| input.path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert!(report.executed.iter().all(|input| input.status == CONTINUE));
    assert_eq!(report.executed[0].len, 5);
    assert!(report.executed[0].digest.starts_with("sha256:"));
}

#[test]
fn test_replay_skips_oversized_inputs() {
    let big = "a".repeat(64);
    let dir = create_resource_root(&[
        (FuzzTarget::FieldPath, "small", "a.b"),
        (FuzzTarget::FieldPath, "big", &big),
    ]);
    let root = dir.path().to_string_lossy().into_owned();

    let report = Replayer::new(FuzzTarget::CollectionReference)
        .with_config(ReplayConfig {
            max_len: 16,
            ..ReplayConfig::default()
        })
        .replay_paths(&[FuzzTarget::CollectionReference.corpus_location(&root)])
        .expect("Replay failed");

    assert_eq!(report.executed_count(), 1);
    assert_eq!(report.skipped_count(), 1);
    assert!(report.skipped[0].ends_with("big"));
}

#[test]
fn test_replay_recursive() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("nested");
    fs::create_dir(&nested).unwrap();
    fs::write(dir.path().join("top"), b"a").unwrap();
    fs::write(nested.join("inner"), b"b").unwrap();

    let flat = Replayer::new(FuzzTarget::FieldPath)
        .replay_paths(&[dir.path()])
        .unwrap();
    assert_eq!(flat.executed_count(), 1);

    let deep = Replayer::new(FuzzTarget::FieldPath)
        .with_config(ReplayConfig {
            recursive: true,
            ..ReplayConfig::default()
        })
        .replay_paths(&[dir.path()])
        .unwrap();
    assert_eq!(deep.executed_count(), 2);
}

#[test]
fn test_replay_single_file_and_missing_file() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("crash-1");
    fs::write(&file, b"collection/doc\0").unwrap();

    let report = Replayer::new(FuzzTarget::Query)
        .replay_paths(&[&file])
        .unwrap();
    assert_eq!(report.executed_count(), 1);

    let missing = dir.path().join("missing");
    let result = Replayer::new(FuzzTarget::Query).replay_paths(&[&missing]);
    assert!(matches!(result, Err(HarnessError::Io { path, .. }) if path == missing));
}

#[test]
fn test_replay_shipped_corpora() {
    let root = shipped_resources();
    for target in FuzzTarget::ALL {
        let report = Replayer::new(target)
            .replay_paths(&[target.corpus_location(&root)])
            .expect("Shipped corpus should be readable");
        assert!(report.executed_count() > 0, "{} corpus is empty", target);
    }
}

// =============================================================================
// Resource Checks
// =============================================================================

#[test]
fn test_check_complete_resources() {
    let dir = create_resource_root(&[
        (FuzzTarget::FieldPath, "seed", "a.b"),
        (FuzzTarget::Query, "seed", "rooms"),
    ]);
    let root = dir.path().to_string_lossy().into_owned();

    let statuses = check_resources(&root).unwrap();
    assert_eq!(statuses.len(), 2);
    assert!(statuses.iter().all(|status| status.is_complete()));
}

#[test]
fn test_check_reports_empty_corpus() {
    let dir = create_resource_root(&[(FuzzTarget::FieldPath, "seed", "a.b")]);
    let root = dir.path().to_string_lossy().into_owned();

    let statuses = check_resources(&root).unwrap();
    let query = statuses
        .iter()
        .find(|status| status.owner == FuzzTarget::Query)
        .unwrap();
    assert!(query.dictionary_exists);
    assert!(query.corpus_exists);
    assert_eq!(query.seed_count, 0);
    assert!(!query.is_complete());
}

#[test]
fn test_shipped_resources_are_complete() {
    let statuses = check_resources(&shipped_resources()).unwrap();
    for status in statuses {
        assert!(status.is_complete(), "incomplete resources for {}", status.owner);
    }
}
