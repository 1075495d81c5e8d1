//! Integration tests for batch move and delete.

use linkdrop::{ErrorKind, TreeEvent};

use crate::helpers::{RecordedCall, TestTree};

#[tokio::test]
async fn test_batch_move_is_single_bulk_call() {
    let tree = TestTree::new();
    let [f1, f2, _] = tree.files;

    let outcome = tree
        .handle
        .batch_move(vec![f1, f2], tree.folder_b)
        .await
        .unwrap();
    assert!(outcome.clear_selection);
    assert_eq!(outcome.progress.total, 2);
    assert_eq!(outcome.progress.completed, 2);
    assert_eq!(outcome.progress.failed, 0);

    assert_eq!(tree.children_of(tree.folder_b).await, vec![f1, f2]);
    // One bulk persistence call for the whole set, not one per item.
    assert_eq!(
        tree.actions.calls(),
        vec![RecordedCall::Move {
            container_id: tree.container_id,
            item_ids: vec![f1, f2],
            target_parent_id: Some(tree.folder_b),
        }]
    );
    // Published progress matches the outcome.
    assert_eq!(tree.progress().completed, 2);
}

#[tokio::test]
async fn test_batch_move_failure_rolls_back_as_unit() {
    let tree = TestTree::new();
    let [f1, f2, _] = tree.files;

    tree.actions.fail_next("bulk move refused");
    let err = tree
        .handle
        .batch_move(vec![f1, f2], tree.folder_b)
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    assert_eq!(tree.children_of(tree.folder_a).await, tree.files.to_vec());
    assert!(tree.children_of(tree.folder_b).await.is_empty());

    let progress = tree.progress();
    assert_eq!(progress.failed, 2);
    assert_eq!(progress.errors.len(), 2);
    // Rollback forces a refetch.
    assert!(tree.cache.invalidations().iter().any(|(_, now)| *now));
}

#[tokio::test]
async fn test_batch_move_rejects_file_target() {
    let tree = TestTree::new();
    let [f1, f2, f3] = tree.files;

    let err = tree.handle.batch_move(vec![f1, f2], f3).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);
    assert!(tree.actions.calls().is_empty());
}

#[tokio::test]
async fn test_batch_delete_cascades_locally_sends_top_ids() {
    let tree = TestTree::new();

    let outcome = tree.handle.batch_delete(vec![tree.folder_a]).await.unwrap();
    assert!(outcome.clear_selection);

    // Folder and all three files are gone from the view...
    let view = tree.handle.view().await.unwrap();
    assert!(view.find(tree.folder_a).is_none());
    for id in tree.files {
        assert!(view.find(id).is_none());
    }
    // ...but the server only receives the selected top-level ID.
    assert_eq!(
        tree.actions.calls(),
        vec![RecordedCall::Delete {
            item_ids: vec![tree.folder_a],
        }]
    );
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::ItemsDeleted { removed_count, .. }] if *removed_count == 4
    ));
}

#[tokio::test]
async fn test_batch_delete_drops_nested_selection() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    // f1 lives inside folder-a; selecting both must not double-delete.
    let outcome = tree
        .handle
        .batch_delete(vec![tree.folder_a, f1])
        .await
        .unwrap();
    assert_eq!(outcome.progress.total, 2);
    assert_eq!(
        tree.actions.calls(),
        vec![RecordedCall::Delete {
            item_ids: vec![tree.folder_a],
        }]
    );
}

#[tokio::test]
async fn test_batch_delete_failure_restores_tree() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.actions.fail_next("delete refused");
    let err = tree.handle.batch_delete(vec![f1]).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    assert_eq!(tree.children_of(tree.folder_a).await, tree.files.to_vec());
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::BatchDeleteFailed { item_ids, .. }] if item_ids == &vec![f1]
    ));
    assert!(tree.cache.invalidations().iter().any(|(_, now)| *now));
}

#[tokio::test]
async fn test_empty_batch_is_noop() {
    let tree = TestTree::new();

    let outcome = tree
        .handle
        .batch_move(Vec::new(), tree.folder_b)
        .await
        .unwrap();
    assert!(!outcome.clear_selection);

    let outcome = tree.handle.batch_delete(Vec::new()).await.unwrap();
    assert!(!outcome.clear_selection);

    assert!(tree.actions.calls().is_empty());
    assert!(tree.sink.is_empty());
}
