//! Integration tests for rename handling.

use linkdrop::{ErrorKind, TreeEvent};

use crate::helpers::{RecordedCall, TestTree};

#[tokio::test]
async fn test_rename_file_success() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.handle.rename_item(f1, "quarterly-report.pdf").await.unwrap();

    let item = tree.handle.get(f1).await.unwrap().unwrap();
    assert_eq!(item.name, "quarterly-report.pdf");
    assert_eq!(
        tree.actions.calls(),
        vec![RecordedCall::Rename {
            item_id: f1,
            new_name: "quarterly-report.pdf".to_string(),
        }]
    );
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::FileRenamed { item_id, name }]
            if *item_id == f1 && name == "quarterly-report.pdf"
    ));
    // Stale without forced refetch.
    assert_eq!(tree.cache.invalidations(), vec![(
        format!("linkdrop:tree:{}", tree.container_id),
        false
    )]);
}

#[tokio::test]
async fn test_rename_folder_emits_folder_event() {
    let tree = TestTree::new();

    tree.handle.rename_item(tree.folder_b, "inbox").await.unwrap();

    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::FolderRenamed { item_id, .. }] if *item_id == tree.folder_b
    ));
}

#[tokio::test]
async fn test_rename_failure_reverts_optimistic_name() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.actions.fail_next("name already taken");
    let err = tree.handle.rename_item(f1, "duplicate").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    // The optimistic name change is rolled back.
    let item = tree.handle.get(f1).await.unwrap().unwrap();
    assert_eq!(item.name, "f1");
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::FileRenameFailed { item_id, .. }] if *item_id == f1
    ));
    assert_eq!(tree.cache.invalidations().len(), 1);
    assert!(tree.cache.invalidations()[0].1);
}

#[tokio::test]
async fn test_rename_to_same_name_is_noop() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.handle.rename_item(f1, "f1").await.unwrap();
    assert!(tree.actions.calls().is_empty());
    assert!(tree.sink.is_empty());
}

#[tokio::test]
async fn test_rename_empty_name_rejected() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let err = tree.handle.rename_item(f1, "   ").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(tree.actions.calls().is_empty());
}

#[tokio::test]
async fn test_rename_applies_server_canonical_name() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    // The scripted double echoes the requested name; a canonicalising
    // server is simulated by the engine accepting whatever comes back.
    tree.handle.rename_item(f1, "  trimmed-name  ").await.unwrap();
    let item = tree.handle.get(f1).await.unwrap().unwrap();
    assert_eq!(item.name, "trimmed-name");
}
