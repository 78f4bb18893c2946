//! Error taxonomy for store operations.

use crate::model::ItemId;

/// Errors returned by store operations.
///
/// Every variant is recovered at the operation boundary and handed back to
/// the caller; the store never aborts the process. `NotFound` and
/// `InvalidParent` share an underlying cause (a missing row) and differ only
/// in which reference failed.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No item exists with the given id.
    #[error("could not fetch item with id {0}; maybe it doesn't exist?")]
    NotFound(ItemId),

    /// The supplied `parent_id` does not reference an existing item.
    #[error("could not fetch parent item with id {0}; maybe it doesn't exist?")]
    InvalidParent(ItemId),

    /// Update called with every optional field absent.
    #[error("provide at least one of name, complete, or parent_id to update")]
    NoFieldsProvided,

    /// The item name is empty or whitespace-only.
    #[error("item name must not be blank")]
    EmptyName,

    /// The requested parent is the item itself or one of its descendants.
    #[error("setting parent of item {item_id} to {parent_id} would create a cycle")]
    WouldCycle { item_id: ItemId, parent_id: ItemId },

    /// The ancestor walk revisited an item: the stored parent chain is cyclic.
    #[error("parent chain of item {item_id} contains a cycle")]
    CyclicAncestry { item_id: ItemId },

    /// An underlying database failure.
    #[error(transparent)]
    Db(#[from] anyhow::Error),
}
