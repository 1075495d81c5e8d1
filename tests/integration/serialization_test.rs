//! Integration tests for operation serialization and the
//! drag-operation-active flag.

use std::time::Duration;

use linkdrop::DragOperation;

use crate::helpers::{RecordedCall, TestTree};

#[tokio::test]
async fn test_back_to_back_drops_serialize() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    // Keep the first persistence call pending long enough for the second
    // gesture to arrive while it is in flight.
    tree.actions.delay_calls(Duration::from_millis(50));

    let drop_to_b = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_b));
    let drop_to_a = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_a));
    let (first, second) = futures::future::join(drop_to_b, drop_to_a).await;
    first.unwrap();
    second.unwrap();

    // The second drop was applied strictly after the first completed:
    // both persistence calls ran, in submission order, and the final
    // parent is the second target.
    assert_eq!(
        tree.actions.calls(),
        vec![
            RecordedCall::Move {
                container_id: tree.container_id,
                item_ids: vec![f1],
                target_parent_id: Some(tree.folder_b),
            },
            RecordedCall::Move {
                container_id: tree.container_id,
                item_ids: vec![f1],
                target_parent_id: Some(tree.folder_a),
            },
        ]
    );
    assert_eq!(
        tree.handle.get(f1).await.unwrap().unwrap().parent_id,
        Some(tree.folder_a)
    );
}

#[tokio::test]
async fn test_queued_drop_waits_for_failed_predecessor() {
    let tree = TestTree::new();
    let [f1, f2, _] = tree.files;

    tree.actions.delay_calls(Duration::from_millis(50));
    tree.actions.fail_next("first move refused");

    let failing = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_b));
    let queued = tree
        .handle
        .drop_items(DragOperation::onto(vec![f2], tree.folder_b));
    let (first, second) = futures::future::join(failing, queued).await;

    // The failure path (rollback included) completed before the queued
    // operation started; the queued one still succeeded.
    assert!(first.is_err());
    second.unwrap();
    assert_eq!(
        tree.handle.get(f1).await.unwrap().unwrap().parent_id,
        Some(tree.folder_a)
    );
    assert_eq!(
        tree.handle.get(f2).await.unwrap().unwrap().parent_id,
        Some(tree.folder_b)
    );
}

#[tokio::test]
async fn test_gate_raised_while_persistence_pending() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.actions.delay_calls(Duration::from_millis(100));

    let handle = tree.handle.clone();
    let pending = tokio::spawn(async move {
        handle
            .drop_items(DragOperation::onto(vec![f1], tree.folder_b))
            .await
    });

    // Give the engine time to start the persistence call.
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(
        tree.handle.gate().is_active(),
        "flag must be raised while the move is in flight"
    );

    pending.await.unwrap().unwrap();
    assert!(
        !tree.handle.gate().is_active(),
        "flag must be released on completion"
    );
}

#[tokio::test]
async fn test_gate_released_after_failure() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.actions.fail_next("refused");
    let _ = tree
        .handle
        .drop_items(DragOperation::onto(vec![f1], tree.folder_b))
        .await;
    assert!(!tree.handle.gate().is_active());
}

#[tokio::test]
async fn test_refresh_payload_discarded_during_mutation() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    tree.actions.delay_calls(Duration::from_millis(100));

    let handle = tree.handle.clone();
    let pending = tokio::spawn(async move {
        handle
            .drop_items(DragOperation::onto(vec![f1], tree.folder_b))
            .await
    });
    tokio::time::sleep(Duration::from_millis(30)).await;

    // A refresh arriving mid-operation queues behind it, but the engine
    // also re-checks the gate; an empty payload applied here would wipe
    // the tree.
    tree.handle.apply_refresh(Vec::new()).await.unwrap();
    pending.await.unwrap().unwrap();

    let view = tree.handle.view().await.unwrap();
    assert!(view.find(f1).is_some(), "refresh must not clobber the tree");
}
