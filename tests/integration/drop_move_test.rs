//! Integration tests for drop/move handling.

use linkdrop::{DragOperation, DropOutcome, ErrorKind, TreeEvent};

use crate::helpers::{RecordedCall, TestTree};

#[tokio::test]
async fn test_move_file_between_folders() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let outcome = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_b))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            item_ids: vec![f1],
            persisted: true,
        }
    );

    let moved = tree.handle.get(f1).await.unwrap().unwrap();
    assert_eq!(moved.parent_id, Some(tree.folder_b));
    assert!(!tree.children_of(tree.folder_a).await.contains(&f1));
    assert_eq!(tree.children_of(tree.folder_b).await, vec![f1]);

    assert_eq!(
        tree.actions.calls(),
        vec![RecordedCall::Move {
            container_id: tree.container_id,
            item_ids: vec![f1],
            target_parent_id: Some(tree.folder_b),
        }]
    );
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::ItemsMoved { item_ids, .. }] if item_ids == &vec![f1]
    ));
    // Success marks the cache stale without forcing a refetch.
    assert_eq!(tree.cache.invalidations().len(), 1);
    assert!(!tree.cache.invalidations()[0].1);
}

#[tokio::test]
async fn test_drop_onto_self_rejected() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let err = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], f1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);

    // No mutation, no persistence call, no success notification.
    assert!(tree.actions.calls().is_empty());
    assert_eq!(
        tree.children_of(tree.folder_a).await,
        tree.files.to_vec()
    );
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::InvalidDropTarget { target_id, .. }] if *target_id == f1
    ));
}

#[tokio::test]
async fn test_drop_onto_file_rejected() {
    let tree = TestTree::new();
    let [f1, f2, _] = tree.files;

    let err = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], f2))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);
    assert!(tree.actions.calls().is_empty());
}

#[tokio::test]
async fn test_drop_into_own_descendant_rejected() {
    let tree = TestTree::new();

    // Nest folder-b under folder-a, then try to drop folder-a into it.
    tree.handle
        .drop_items(DragOperation::onto(vec![tree.folder_b], tree.folder_a))
        .await
        .unwrap();

    let err = tree
        .handle
        .drop_items(DragOperation::onto(vec![tree.folder_a], tree.folder_b))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);

    // Only the first (valid) move reached persistence.
    assert_eq!(tree.actions.calls().len(), 1);
    let folder_a = tree.handle.get(tree.folder_a).await.unwrap().unwrap();
    assert!(folder_a.is_root());
}

#[tokio::test]
async fn test_move_already_in_target_is_noop() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let outcome = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_a))
        .await
        .unwrap();
    assert_eq!(outcome, DropOutcome::NoChange);
    assert!(tree.actions.calls().is_empty());
    assert!(tree.sink.is_empty());
}

#[tokio::test]
async fn test_move_failure_rolls_back() {
    let tree = TestTree::new();
    let [f1, f2, _] = tree.files;

    tree.actions.fail_next("server rejected the move");
    let err = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1, f2], tree.folder_b))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Persistence);

    // The store equals its pre-operation state.
    assert_eq!(
        tree.children_of(tree.folder_a).await,
        tree.files.to_vec()
    );
    assert!(tree.children_of(tree.folder_b).await.is_empty());
    assert_eq!(
        tree.handle.get(f1).await.unwrap().unwrap().parent_id,
        Some(tree.folder_a)
    );

    // Error notification names both items; the cache refetches now.
    assert!(matches!(
        tree.sink.tree_events().as_slice(),
        [TreeEvent::MoveFailed { item_ids, .. }] if item_ids == &vec![f1, f2]
    ));
    assert_eq!(tree.cache.invalidations().len(), 1);
    assert!(tree.cache.invalidations()[0].1);
}

#[tokio::test]
async fn test_empty_drag_is_noop() {
    let tree = TestTree::new();
    let outcome = tree
        .handle
        .drop_items(DragOperation::onto(Vec::new(), tree.folder_b))
        .await
        .unwrap();
    assert_eq!(outcome, DropOutcome::NoChange);
    assert!(tree.actions.calls().is_empty());
}
