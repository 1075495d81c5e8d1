//! The authoritative in-memory tree for one container view.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use linkdrop_core::error::AppError;
use linkdrop_core::result::AppResult;
use linkdrop_core::types::ItemId;
use linkdrop_entity::item::TreeItem;
use linkdrop_entity::tree::{TreeNode, TreeView};

use super::snapshot::TreeSnapshot;

/// Mapping of item ID to item, plus the ordered root list.
///
/// Owned exclusively by the engine task for the duration of a view
/// session; every structural mutation keeps the parent/children links
/// bidirectionally consistent, and the render tree is rebuilt from
/// scratch via [`TreeStore::build_view`] rather than diffed.
#[derive(Debug, Clone, Default)]
pub struct TreeStore {
    /// Item ID → item.
    items: HashMap<ItemId, TreeItem>,
    /// Root-level item IDs, in sibling order.
    roots: Vec<ItemId>,
}

impl TreeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a flat item list (e.g. a server tree payload).
    ///
    /// Children lists carried by the input are discarded and relinked
    /// from each item's `parent_id`; sibling order follows input order.
    /// An item whose declared parent is missing or is a file is attached
    /// at the root instead, so no input item is silently lost.
    pub fn from_items(items: Vec<TreeItem>) -> Self {
        let mut store = Self::new();
        let mut order: Vec<ItemId> = Vec::with_capacity(items.len());

        for mut item in items {
            item.children = match item.kind {
                linkdrop_entity::item::ItemKind::Folder => Some(Vec::new()),
                linkdrop_entity::item::ItemKind::File => None,
            };
            let id = item.id;
            if store.items.insert(id, item).is_some() {
                // Last occurrence wins; the ID is already queued for linking.
                warn!(item_id = %id, "Duplicate item ID in tree payload");
            } else {
                order.push(id);
            }
        }

        for id in order {
            let parent_id = store.items.get(&id).and_then(|item| item.parent_id);
            match parent_id {
                Some(pid) if store.items.get(&pid).is_some_and(|p| p.is_folder()) => {
                    if let Some(parent) = store.items.get_mut(&pid) {
                        parent.children.get_or_insert_with(Vec::new).push(id);
                    }
                }
                Some(pid) => {
                    warn!(item_id = %id, parent_id = %pid, "Parent missing or not a folder; attaching item at root");
                    if let Some(item) = store.items.get_mut(&id) {
                        item.parent_id = None;
                    }
                    store.roots.push(id);
                }
                None => store.roots.push(id),
            }
        }

        store
    }

    /// Look up an item by ID. No side effects.
    pub fn get(&self, id: ItemId) -> Option<&TreeItem> {
        self.items.get(&id)
    }

    /// Whether the store contains an item.
    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Number of items in the store.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The root-level item IDs, in order.
    pub fn roots(&self) -> &[ItemId] {
        &self.roots
    }

    /// The ordered children of a folder, if `id` names one.
    pub fn child_ids_of(&self, id: ItemId) -> Option<&[ItemId]> {
        self.items.get(&id).map(|item| item.child_ids())
    }

    /// Iterate over all items in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &TreeItem> {
        self.items.values()
    }

    /// All items currently marked staged.
    pub fn staged_items(&self) -> Vec<TreeItem> {
        self.items
            .values()
            .filter(|item| item.staged)
            .cloned()
            .collect()
    }

    /// Insert an item and attach it to its parent's children list (or the
    /// root list when it has no parent).
    ///
    /// Returns `false` without inserting when the ID already exists or the
    /// declared parent is missing or is a file; callers are expected to
    /// validate first, so this only logs a warning.
    pub fn add_item(&mut self, item: TreeItem) -> bool {
        if self.items.contains_key(&item.id) {
            warn!(item_id = %item.id, "Refusing to add duplicate item");
            return false;
        }

        match item.parent_id {
            Some(pid) => {
                let Some(parent) = self.items.get_mut(&pid) else {
                    warn!(item_id = %item.id, parent_id = %pid, "Parent does not exist; item not added");
                    return false;
                };
                if parent.is_file() {
                    warn!(item_id = %item.id, parent_id = %pid, "Parent is a file; item not added");
                    return false;
                }
                parent.children.get_or_insert_with(Vec::new).push(item.id);
            }
            None => self.roots.push(item.id),
        }

        self.items.insert(item.id, item);
        true
    }

    /// Remove a single item and detach it from its parent.
    ///
    /// Removing a folder that still has children is rejected; cascade
    /// removal is the explicit [`TreeStore::remove_subtree`] operation.
    pub fn remove_item(&mut self, id: ItemId) -> AppResult<TreeItem> {
        let item = self
            .items
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;

        if !item.child_ids().is_empty() {
            return Err(AppError::validation(
                "Cannot remove a folder that still has children; use remove_subtree",
            ));
        }

        self.detach(id);
        self.items
            .remove(&id)
            .ok_or_else(|| AppError::internal(format!("Item {id} vanished during removal")))
    }

    /// Remove an item and every descendant. Returns all removed IDs,
    /// the subtree root first.
    pub fn remove_subtree(&mut self, id: ItemId) -> AppResult<Vec<ItemId>> {
        if !self.items.contains_key(&id) {
            return Err(AppError::not_found(format!("Item {id} not found")));
        }

        let removed = self.subtree_ids(id);
        self.detach(id);
        for rid in &removed {
            self.items.remove(rid);
        }
        Ok(removed)
    }

    /// All IDs in the subtree rooted at `id`, root first, siblings in order.
    pub fn subtree_ids(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            if let Some(item) = self.items.get(&current) {
                // Reverse so the first child is popped first.
                stack.extend(item.child_ids().iter().rev().copied());
            }
        }
        out
    }

    /// Reparent an item, appending it to the new parent's children.
    ///
    /// Rejects moves into a file, into the item itself, or into one of
    /// its own descendants. Moving to the current parent is a no-op.
    pub fn move_item(&mut self, id: ItemId, new_parent_id: Option<ItemId>) -> AppResult<()> {
        let current_parent = self
            .items
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?
            .parent_id;

        if current_parent == new_parent_id {
            return Ok(());
        }

        if let Some(pid) = new_parent_id {
            if pid == id {
                return Err(AppError::invalid_target("Cannot move an item into itself"));
            }
            let parent = self
                .items
                .get(&pid)
                .ok_or_else(|| AppError::not_found(format!("Target folder {pid} not found")))?;
            if parent.is_file() {
                return Err(AppError::invalid_target("Files cannot contain children"));
            }
            if self.is_descendant_of(pid, id) {
                return Err(AppError::invalid_target(
                    "Cannot move an item into one of its own descendants",
                ));
            }
        }

        self.detach(id);
        match new_parent_id {
            Some(pid) => {
                if let Some(parent) = self.items.get_mut(&pid) {
                    parent.children.get_or_insert_with(Vec::new).push(id);
                }
            }
            None => self.roots.push(id),
        }
        if let Some(item) = self.items.get_mut(&id) {
            item.parent_id = new_parent_id;
        }
        Ok(())
    }

    /// Recompute a folder's child order by removing `dragged` from their
    /// old positions and splicing them in at `insertion_index` (an index
    /// into the list that remains after removal, clamped to its length).
    ///
    /// Returns the new order, or `None` when the resulting order equals
    /// the current one — the caller must then skip persistence entirely.
    pub fn reorder_children(
        &mut self,
        parent_id: ItemId,
        dragged: &[ItemId],
        insertion_index: usize,
    ) -> AppResult<Option<Vec<ItemId>>> {
        let parent = self
            .items
            .get(&parent_id)
            .ok_or_else(|| AppError::not_found(format!("Folder {parent_id} not found")))?;
        if parent.is_file() {
            return Err(AppError::invalid_target("Files have no child order"));
        }

        let current = parent.child_ids().to_vec();
        let dragged_set: HashSet<ItemId> = dragged.iter().copied().collect();
        if dragged_set.len() != dragged.len() {
            return Err(AppError::validation("Dragged IDs must be unique"));
        }
        for id in dragged {
            if !current.contains(id) {
                return Err(AppError::validation(format!(
                    "Item {id} is not a child of folder {parent_id}"
                )));
            }
        }

        let mut reordered: Vec<ItemId> = current
            .iter()
            .copied()
            .filter(|id| !dragged_set.contains(id))
            .collect();
        let index = insertion_index.min(reordered.len());
        for (offset, id) in dragged.iter().enumerate() {
            reordered.insert(index + offset, *id);
        }

        if reordered == current {
            return Ok(None);
        }

        if let Some(parent) = self.items.get_mut(&parent_id) {
            parent.children = Some(reordered.clone());
        }
        Ok(Some(reordered))
    }

    /// Rename an item in place.
    pub fn rename(&mut self, id: ItemId, new_name: &str) -> AppResult<()> {
        let item = self
            .items
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        item.name = new_name.to_string();
        Ok(())
    }

    /// Replace a staged item with its server-assigned identity, keeping
    /// its position among siblings and adopting its children.
    pub fn replace_item(&mut self, old_id: ItemId, mut new_item: TreeItem) -> AppResult<()> {
        if new_item.id != old_id && self.items.contains_key(&new_item.id) {
            return Err(AppError::conflict(format!(
                "Item {} already exists in the tree",
                new_item.id
            )));
        }
        let old = self
            .items
            .remove(&old_id)
            .ok_or_else(|| AppError::not_found(format!("Item {old_id} not found")))?;

        new_item.parent_id = old.parent_id;
        if old.is_folder() && new_item.is_folder() {
            new_item.children = old.children.clone();
            for child_id in old.child_ids() {
                if let Some(child) = self.items.get_mut(child_id) {
                    child.parent_id = Some(new_item.id);
                }
            }
        }

        let new_id = new_item.id;
        match old.parent_id {
            Some(pid) => {
                if let Some(children) = self.items.get_mut(&pid).and_then(|p| p.children.as_mut()) {
                    if let Some(slot) = children.iter_mut().find(|sid| **sid == old_id) {
                        *slot = new_id;
                    }
                }
            }
            None => {
                if let Some(slot) = self.roots.iter_mut().find(|sid| **sid == old_id) {
                    *slot = new_id;
                }
            }
        }

        self.items.insert(new_item.id, new_item);
        Ok(())
    }

    /// Whether `id`'s parent chain passes through `potential_ancestor`.
    ///
    /// The walk is bounded by the store size, so it terminates even on
    /// corrupt input.
    pub fn is_descendant_of(&self, id: ItemId, potential_ancestor: ItemId) -> bool {
        let mut current = self.items.get(&id).and_then(|item| item.parent_id);
        let mut steps = 0;
        while let Some(pid) = current {
            if pid == potential_ancestor {
                return true;
            }
            steps += 1;
            if steps > self.items.len() {
                warn!(item_id = %id, "Parent chain exceeded store size; assuming cycle");
                return false;
            }
            current = self.items.get(&pid).and_then(|item| item.parent_id);
        }
        false
    }

    /// The parent chain of an item, nearest parent first.
    pub fn ancestors(&self, id: ItemId) -> Vec<ItemId> {
        let mut out = Vec::new();
        let mut current = self.items.get(&id).and_then(|item| item.parent_id);
        while let Some(pid) = current {
            if out.len() > self.items.len() {
                break;
            }
            out.push(pid);
            current = self.items.get(&pid).and_then(|item| item.parent_id);
        }
        out
    }

    /// Capture a value copy of the whole store.
    pub fn snapshot(&self) -> TreeSnapshot {
        TreeSnapshot {
            items: self.items.clone(),
            roots: self.roots.clone(),
        }
    }

    /// Replace the live state with a previously captured snapshot.
    pub fn restore(&mut self, snapshot: TreeSnapshot) {
        self.items = snapshot.items;
        self.roots = snapshot.roots;
    }

    /// Rebuild the nested render tree from the root list.
    pub fn build_view(&self) -> TreeView {
        let roots = self
            .roots
            .iter()
            .filter_map(|id| self.build_node(*id))
            .collect();
        TreeView {
            roots,
            total_items: self.items.len() as u64,
        }
    }

    fn build_node(&self, id: ItemId) -> Option<TreeNode> {
        let item = self.items.get(&id)?;
        Some(TreeNode {
            id: item.id,
            name: item.name.clone(),
            kind: item.kind,
            staged: item.staged,
            children: item
                .child_ids()
                .iter()
                .filter_map(|cid| self.build_node(*cid))
                .collect(),
        })
    }

    /// Detach an item from its parent's children list or the root list.
    fn detach(&mut self, id: ItemId) {
        let parent_id = self.items.get(&id).and_then(|item| item.parent_id);
        let siblings = match parent_id {
            Some(pid) => match self.items.get_mut(&pid).and_then(|p| p.children.as_mut()) {
                Some(children) => children,
                None => return,
            },
            None => &mut self.roots,
        };
        siblings.retain(|sid| *sid != id);
    }
}
