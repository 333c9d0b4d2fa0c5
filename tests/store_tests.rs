//! Integration tests for the incremental artifact store

use sitemark::store::{fingerprint, MirrorStore, SaveOutcome, StoreError};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_create_skip_update_sequence() {
    let dir = tempdir().unwrap();
    let store = MirrorStore::new(dir.path());

    // No prior file: created.
    assert_eq!(store.save("k1", "Hello").unwrap(), SaveOutcome::Created);
    assert_eq!(
        fs::read_to_string(store.artifact_path("k1")).unwrap(),
        "Hello"
    );

    // Identical content: skipped, file untouched.
    assert_eq!(store.save("k1", "Hello").unwrap(), SaveOutcome::Unchanged);
    assert_eq!(
        fs::read_to_string(store.artifact_path("k1")).unwrap(),
        "Hello"
    );

    // Different content: overwritten.
    assert_eq!(store.save("k1", "World").unwrap(), SaveOutcome::Updated);
    assert_eq!(
        fs::read_to_string(store.artifact_path("k1")).unwrap(),
        "World"
    );
}

#[test]
fn test_output_directory_created_on_first_write() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("mirror").join("pages");
    let store = MirrorStore::new(&root);

    assert!(!root.exists());
    store.save("k1", "content").unwrap();
    assert!(root.exists());
}

#[test]
fn test_save_error_surfaces_to_caller() {
    // Using a regular file as the store root makes directory creation
    // fail, which must surface as an error rather than vanish.
    let dir = tempdir().unwrap();
    let blocker = dir.path().join("not-a-directory");
    fs::write(&blocker, "occupied").unwrap();

    let store = MirrorStore::new(&blocker);
    let result = store.save("k1", "content");
    assert!(matches!(result, Err(StoreError::CreateDir { .. })));
}

#[test]
fn test_fingerprint_round_trip_matches_store_decision() {
    let dir = tempdir().unwrap();
    let store = MirrorStore::new(dir.path());

    store.save("k1", "stable content").unwrap();
    let on_disk = fs::read_to_string(store.artifact_path("k1")).unwrap();

    // What the store wrote fingerprints identically to the input, so
    // the next save with the same input is a guaranteed skip.
    assert_eq!(
        fingerprint(on_disk.as_bytes()),
        fingerprint("stable content".as_bytes())
    );
    assert_eq!(
        store.save("k1", "stable content").unwrap(),
        SaveOutcome::Unchanged
    );
}

#[test]
fn test_artifacts_never_deleted() {
    let dir = tempdir().unwrap();
    let store = MirrorStore::new(dir.path());

    store.save("old", "kept").unwrap();
    store.save("new", "fresh").unwrap();

    // Saving other keys never removes existing artifacts.
    assert!(store.artifact_path("old").exists());
    assert!(store.artifact_path("new").exists());
}

#[test]
fn test_empty_artifact_is_valid_content() {
    let dir = tempdir().unwrap();
    let store = MirrorStore::new(dir.path());

    assert_eq!(store.save("k1", "").unwrap(), SaveOutcome::Created);
    assert_eq!(store.save("k1", "").unwrap(), SaveOutcome::Unchanged);
    assert_eq!(store.save("k1", "now full").unwrap(), SaveOutcome::Updated);
}
