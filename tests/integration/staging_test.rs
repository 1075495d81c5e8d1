//! Integration tests for the upload staging flow.

use bytes::Bytes;

use linkdrop::{
    DragOperation, DropOutcome, DropPosition, ErrorKind, ForeignPayload, IncomingFile, ItemId,
    TreeItem, UploadEvent,
};

use crate::helpers::TestTree;

fn os_files(names: &[&str]) -> ForeignPayload {
    ForeignPayload::OsFiles(
        names
            .iter()
            .map(|name| IncomingFile::new(*name, Bytes::from_static(b"content")))
            .collect(),
    )
}

#[tokio::test]
async fn test_foreign_drop_queues_files() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(
            DropPosition::OnItem(tree.folder_b),
            os_files(&["photo.jpg", "scan.pdf"]),
        )
        .await
        .unwrap();
    assert_eq!(staged.len(), 2);

    // Staged items render under the folder, marked staged; nothing hits
    // persistence until upload.
    let view = tree.handle.view().await.unwrap();
    for id in &staged {
        let node = view.find(*id).unwrap();
        assert!(node.staged);
    }
    assert_eq!(tree.children_of(tree.folder_b).await, staged);
    assert!(tree.actions.calls().is_empty());
    assert_eq!(tree.staging.queued_uploads().len(), 2);
    assert!(matches!(
        tree.sink.upload_events().as_slice(),
        [UploadEvent::FilesQueued { count: 2, .. }]
    ));
}

#[tokio::test]
async fn test_foreign_drop_between_items_admissible() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(
            DropPosition::Between {
                parent_id: tree.folder_a,
                index: 1,
            },
            os_files(&["dropped.txt"]),
        )
        .await
        .unwrap();
    assert_eq!(staged.len(), 1);
    assert!(tree.children_of(tree.folder_a).await.contains(&staged[0]));
}

#[tokio::test]
async fn test_foreign_drop_onto_file_rejected() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let err = tree
        .handle
        .foreign_drop(DropPosition::OnItem(f1), os_files(&["nope.txt"]))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);
    assert!(tree.staging.is_empty());
}

#[tokio::test]
async fn test_cross_tree_drop_deferred() {
    let tree = TestTree::new();

    let err = tree
        .handle
        .foreign_drop(
            DropPosition::OnItem(tree.folder_b),
            ForeignPayload::TreeItemRefs(vec!["item-from-other-tree".to_string()]),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotImplemented);
    assert!(tree.staging.is_empty());
}

#[tokio::test]
async fn test_staged_move_short_circuits_persistence() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(DropPosition::OnItem(tree.folder_a), os_files(&["a", "b"]))
        .await
        .unwrap();

    let outcome = tree
        .handle
        .drop_items(DragOperation::onto(staged.clone(), tree.folder_b))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Moved {
            item_ids: staged.clone(),
            persisted: false,
        }
    );

    // No persistence action ran; the staging mirror followed the move.
    assert!(tree.actions.calls().is_empty());
    assert_eq!(tree.children_of(tree.folder_b).await, staged);
    for item in tree.staging.staged_files() {
        assert_eq!(item.parent_id, Some(tree.folder_b));
    }
}

#[tokio::test]
async fn test_mixed_drag_persists_only_persisted_subset() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let staged = tree
        .handle
        .foreign_drop(DropPosition::OnItem(tree.folder_a), os_files(&["queued"]))
        .await
        .unwrap();

    tree.handle
        .drop_items(DragOperation::onto(vec![staged[0], f1], tree.folder_b))
        .await
        .unwrap();

    let calls = tree.actions.calls();
    assert_eq!(calls.len(), 1);
    assert!(matches!(
        &calls[0],
        crate::helpers::RecordedCall::Move { item_ids, .. } if item_ids == &vec![f1]
    ));
    // Both items ended up under the target.
    let children = tree.children_of(tree.folder_b).await;
    assert!(children.contains(&staged[0]));
    assert!(children.contains(&f1));
}

#[tokio::test]
async fn test_staged_reorder_is_local_only() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(DropPosition::OnItem(tree.folder_b), os_files(&["x", "y"]))
        .await
        .unwrap();

    let outcome = tree
        .handle
        .drop_items(DragOperation::at_index(
            vec![staged[1]],
            tree.folder_b,
            0,
        ))
        .await
        .unwrap();
    assert_eq!(
        outcome,
        DropOutcome::Reordered {
            parent_id: tree.folder_b
        }
    );
    assert_eq!(
        tree.children_of(tree.folder_b).await,
        vec![staged[1], staged[0]]
    );
    assert!(tree.actions.calls().is_empty());
}

#[tokio::test]
async fn test_commit_upload_swaps_identity_in_place() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(DropPosition::OnItem(tree.folder_b), os_files(&["up.bin"]))
        .await
        .unwrap();
    let staged_id = staged[0];

    let server_item = TreeItem::file(ItemId::new(), "up.bin", Some(tree.folder_b));
    let server_id = server_item.id;
    tree.handle.commit_upload(staged_id, server_item).await.unwrap();

    let view = tree.handle.view().await.unwrap();
    assert!(view.find(staged_id).is_none());
    let committed = view.find(server_id).unwrap();
    assert!(!committed.staged);
    assert_eq!(tree.children_of(tree.folder_b).await, vec![server_id]);
    assert!(tree.staging.is_empty());
    assert!(matches!(
        tree.sink.upload_events().as_slice(),
        [
            UploadEvent::FilesQueued { .. },
            UploadEvent::UploadCommitted { item_id, .. }
        ] if *item_id == server_id
    ));
}

#[tokio::test]
async fn test_abandon_upload_cascades_through_staged_folder() {
    let tree = TestTree::new();

    let staged_folder = tree
        .handle
        .stage_folder("incoming", Some(tree.folder_b))
        .await
        .unwrap();
    let staged_files = tree
        .handle
        .foreign_drop(DropPosition::OnItem(staged_folder.id), os_files(&["q1", "q2"]))
        .await
        .unwrap();

    tree.handle.abandon_upload(staged_folder.id).await.unwrap();

    let view = tree.handle.view().await.unwrap();
    assert!(view.find(staged_folder.id).is_none());
    for id in staged_files {
        assert!(view.find(id).is_none());
    }
    assert!(tree.staging.is_empty());
    assert!(tree
        .sink
        .upload_events()
        .iter()
        .any(|event| matches!(event, UploadEvent::UploadAbandoned { item_id } if *item_id == staged_folder.id)));
}

#[tokio::test]
async fn test_refresh_merge_preserves_staged_items() {
    let tree = TestTree::new();

    let staged = tree
        .handle
        .foreign_drop(DropPosition::OnItem(tree.folder_b), os_files(&["pending.txt"]))
        .await
        .unwrap();

    // A background refresh payload never contains staged items.
    let mut server = vec![
        TreeItem::folder(tree.folder_a, "folder-a", None),
        TreeItem::folder(tree.folder_b, "folder-b", None),
    ];
    for (index, id) in tree.files.iter().enumerate() {
        server.push(TreeItem::file(
            *id,
            format!("f{}", index + 1),
            Some(tree.folder_a),
        ));
    }
    tree.handle.apply_refresh(server).await.unwrap();

    // The view command queues behind the refresh, so the merge is done.
    let view = tree.handle.view().await.unwrap();
    let node = view.find(staged[0]).expect("staged item survives refresh");
    assert!(node.staged);
    assert!(tree.children_of(tree.folder_b).await.contains(&staged[0]));
}

#[tokio::test]
async fn test_stage_folder_under_file_rejected() {
    let tree = TestTree::new();
    let [f1, ..] = tree.files;

    let err = tree
        .handle
        .stage_folder("nope", Some(f1))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidTarget);
    assert!(tree.staging.is_empty());
}
