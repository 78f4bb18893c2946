//! Ancestor-chain resolution over the parent reference.
//!
//! Items form a forest: each item carries at most one `parent_id`. This
//! module answers the walk-shaped questions:
//!
//! - Who is an item's immediate parent?
//! - What is the full ancestor chain, nearest to furthest?
//! - Would giving an item a new parent create a cycle?
//!
//! # Cycle handling
//!
//! Two guards, both stricter than a bare chain walk:
//!
//! - [`validate_parent`] rejects a reparent whose target is the item itself
//!   or one of its descendants ([`StoreError::WouldCycle`]).
//! - [`ancestors`] carries a visited set and fails with
//!   [`StoreError::CyclicAncestry`] on a revisit, so the walk terminates
//!   even over a corrupted chain instead of looping.
//!
//! A dangling `parent_id` (the parent was deleted) is legal data: the chain
//! walk surfaces it as [`StoreError::NotFound`] for the missing ancestor,
//! while the cycle check simply treats it as the top of the chain.

use anyhow::Context as _;
use rusqlite::Connection;
use std::collections::HashSet;
use tracing::debug;

use crate::db::query;
use crate::error::StoreError;
use crate::model::{Item, ItemId};

/// Get the immediate parent of an item, if it has one.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if `item_id` does not exist, or for the
/// parent id itself when the reference dangles.
pub fn immediate_parent(conn: &Connection, item_id: ItemId) -> Result<Option<Item>, StoreError> {
    let item = require_item(conn, item_id)?;

    match item.parent_id {
        None => Ok(None),
        Some(parent_id) => {
            let parent = query::get_item(conn, parent_id)
                .with_context(|| format!("get_item {parent_id}"))?
                .ok_or(StoreError::NotFound(parent_id))?;
            Ok(Some(parent))
        }
    }
}

/// Get the full ancestor chain of an item, from immediate parent up to the
/// root.
///
/// Returns an empty vec for a root item. The first element is the immediate
/// parent and the last is the root ancestor.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if `item_id` (or any ancestor on the
/// chain) does not exist, or [`StoreError::CyclicAncestry`] if the chain
/// revisits an item.
pub fn ancestors(conn: &Connection, item_id: ItemId) -> Result<Vec<Item>, StoreError> {
    let start = require_item(conn, item_id)?;

    let mut chain: Vec<Item> = Vec::new();
    let mut visited: HashSet<ItemId> = HashSet::new();
    visited.insert(start.item_id);

    let mut current_parent_id = start.parent_id;

    while let Some(parent_id) = current_parent_id {
        if !visited.insert(parent_id) {
            debug!(item_id, parent_id, "ancestor walk revisited an item");
            return Err(StoreError::CyclicAncestry { item_id: parent_id });
        }
        let parent = query::get_item(conn, parent_id)
            .with_context(|| format!("get_item {parent_id}"))?
            .ok_or(StoreError::NotFound(parent_id))?;

        current_parent_id = parent.parent_id;
        chain.push(parent);
    }

    Ok(chain)
}

/// Validate that `parent_id` may become the parent of `item_id`.
///
/// Checks, in order:
/// 1. The proposed parent exists ([`StoreError::InvalidParent`]).
/// 2. The parent is not the item itself and the item is not an ancestor of
///    the parent ([`StoreError::WouldCycle`]) — equivalently, the parent is
///    not in the item's subtree.
///
/// The cycle check walks upward from the proposed parent, so it costs
/// O(depth) lookups rather than materializing the item's subtree. A
/// dangling link along the way ends the walk: whatever sits above it can
/// never reach back down to `item_id`.
///
/// # Errors
///
/// Returns [`StoreError::InvalidParent`], [`StoreError::WouldCycle`], or
/// [`StoreError::CyclicAncestry`] if the existing chain above the parent is
/// already corrupt.
pub fn validate_parent(
    conn: &Connection,
    item_id: ItemId,
    parent_id: ItemId,
) -> Result<(), StoreError> {
    let parent = query::get_item(conn, parent_id)
        .with_context(|| format!("get_item {parent_id}"))?
        .ok_or(StoreError::InvalidParent(parent_id))?;

    if parent_id == item_id {
        return Err(StoreError::WouldCycle { item_id, parent_id });
    }

    let mut visited: HashSet<ItemId> = HashSet::new();
    visited.insert(parent_id);

    let mut current = parent.parent_id;
    while let Some(ancestor_id) = current {
        if ancestor_id == item_id {
            return Err(StoreError::WouldCycle { item_id, parent_id });
        }
        if !visited.insert(ancestor_id) {
            return Err(StoreError::CyclicAncestry {
                item_id: ancestor_id,
            });
        }
        current = query::get_item(conn, ancestor_id)
            .with_context(|| format!("get_item {ancestor_id}"))?
            .and_then(|ancestor| ancestor.parent_id);
    }

    Ok(())
}

/// Look up `item_id`, failing with [`StoreError::NotFound`] if absent.
fn require_item(conn: &Connection, item_id: ItemId) -> Result<Item, StoreError> {
    query::get_item(conn, item_id)
        .with_context(|| format!("get_item {item_id}"))?
        .ok_or(StoreError::NotFound(item_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use rusqlite::params;

    fn insert_item(conn: &Connection, name: &str, parent_id: Option<ItemId>) -> ItemId {
        query::insert_item(conn, name, false, parent_id, 1000).expect("insert item")
    }

    /// Bypass the domain layer to plant a cyclic parent chain.
    fn force_parent(conn: &Connection, item_id: ItemId, parent_id: ItemId) {
        conn.execute(
            "UPDATE items SET parent_id = ?1 WHERE item_id = ?2",
            params![parent_id, item_id],
        )
        .expect("force parent");
    }

    // -----------------------------------------------------------------------
    // immediate_parent
    // -----------------------------------------------------------------------

    #[test]
    fn immediate_parent_of_root_is_none() {
        let conn = open_in_memory().expect("open db");
        let root = insert_item(&conn, "Root", None);

        assert!(immediate_parent(&conn, root).expect("query").is_none());
    }

    #[test]
    fn immediate_parent_returns_the_parent_item() {
        let conn = open_in_memory().expect("open db");
        let root = insert_item(&conn, "Root", None);
        let child = insert_item(&conn, "Child", Some(root));

        let parent = immediate_parent(&conn, child)
            .expect("query")
            .expect("parent present");
        assert_eq!(parent.item_id, root);
        assert_eq!(parent.name, "Root");
    }

    #[test]
    fn immediate_parent_of_missing_item_fails() {
        let conn = open_in_memory().expect("open db");
        let err = immediate_parent(&conn, 404).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(404)));
    }

    #[test]
    fn immediate_parent_dangling_reference_fails_for_the_parent() {
        let conn = open_in_memory().expect("open db");
        let root = insert_item(&conn, "Root", None);
        let child = insert_item(&conn, "Child", Some(root));
        query::delete_item(&conn, root).expect("delete root");

        let err = immediate_parent(&conn, child).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(id) if id == root));
    }

    // -----------------------------------------------------------------------
    // ancestors
    // -----------------------------------------------------------------------

    #[test]
    fn ancestors_of_root_is_empty() {
        let conn = open_in_memory().expect("open db");
        let root = insert_item(&conn, "Root", None);

        assert!(ancestors(&conn, root).expect("query").is_empty());
    }

    #[test]
    fn ancestors_nearest_to_furthest() {
        let conn = open_in_memory().expect("open db");
        let grand = insert_item(&conn, "Grandparent", None);
        let parent = insert_item(&conn, "Parent", Some(grand));
        let child = insert_item(&conn, "Child", Some(parent));

        let chain = ancestors(&conn, child).expect("query");
        let ids: Vec<ItemId> = chain.iter().map(|i| i.item_id).collect();
        assert_eq!(ids, vec![parent, grand]);
    }

    #[test]
    fn ancestors_of_missing_item_fails() {
        let conn = open_in_memory().expect("open db");
        let err = ancestors(&conn, 404).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(404)));
    }

    #[test]
    fn ancestors_terminates_on_cyclic_chain() {
        let conn = open_in_memory().expect("open db");
        let a = insert_item(&conn, "A", None);
        let b = insert_item(&conn, "B", Some(a));
        force_parent(&conn, a, b); // a -> b -> a

        let err = ancestors(&conn, b).unwrap_err();
        assert!(matches!(err, StoreError::CyclicAncestry { .. }));
    }

    #[test]
    fn ancestors_self_parent_detected() {
        let conn = open_in_memory().expect("open db");
        let a = insert_item(&conn, "A", None);
        force_parent(&conn, a, a);

        let err = ancestors(&conn, a).unwrap_err();
        assert!(matches!(err, StoreError::CyclicAncestry { item_id } if item_id == a));
    }

    // -----------------------------------------------------------------------
    // validate_parent
    // -----------------------------------------------------------------------

    #[test]
    fn validate_parent_ok_for_unrelated_items() {
        let conn = open_in_memory().expect("open db");
        let a = insert_item(&conn, "A", None);
        let b = insert_item(&conn, "B", None);

        assert!(validate_parent(&conn, a, b).is_ok());
    }

    #[test]
    fn validate_parent_missing_parent_fails() {
        let conn = open_in_memory().expect("open db");
        let a = insert_item(&conn, "A", None);

        let err = validate_parent(&conn, a, 999).unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent(999)));
    }

    #[test]
    fn validate_parent_self_is_a_cycle() {
        let conn = open_in_memory().expect("open db");
        let a = insert_item(&conn, "A", None);

        let err = validate_parent(&conn, a, a).unwrap_err();
        assert!(matches!(err, StoreError::WouldCycle { .. }));
    }

    #[test]
    fn validate_parent_direct_descendant_is_a_cycle() {
        let conn = open_in_memory().expect("open db");
        let parent = insert_item(&conn, "Parent", None);
        let child = insert_item(&conn, "Child", Some(parent));

        let err = validate_parent(&conn, parent, child).unwrap_err();
        assert!(matches!(err, StoreError::WouldCycle { .. }));
    }

    #[test]
    fn validate_parent_deep_descendant_is_a_cycle() {
        let conn = open_in_memory().expect("open db");
        let g1 = insert_item(&conn, "G1", None);
        let g2 = insert_item(&conn, "G2", Some(g1));
        let g3 = insert_item(&conn, "G3", Some(g2));

        let err = validate_parent(&conn, g1, g3).unwrap_err();
        assert!(matches!(err, StoreError::WouldCycle { .. }));
    }

    #[test]
    fn validate_parent_reparenting_between_trees_ok() {
        let conn = open_in_memory().expect("open db");
        let tree_a = insert_item(&conn, "Tree A", None);
        let tree_b = insert_item(&conn, "Tree B", None);
        let leaf = insert_item(&conn, "Leaf", Some(tree_a));

        assert!(validate_parent(&conn, leaf, tree_b).is_ok());
    }

    #[test]
    fn validate_parent_stops_at_dangling_link() {
        let conn = open_in_memory().expect("open db");
        let gone = insert_item(&conn, "Gone", None);
        let orphaned = insert_item(&conn, "Orphaned", Some(gone));
        let item = insert_item(&conn, "Item", None);
        query::delete_item(&conn, gone).expect("delete");

        // The chain above `orphaned` dangles; that is fine for validation.
        assert!(validate_parent(&conn, item, orphaned).is_ok());
    }
}
