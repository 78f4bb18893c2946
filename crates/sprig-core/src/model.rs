//! The item record and the partial-update carrier.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on creation.
///
/// Backed by SQLite `AUTOINCREMENT` rowids, so values are unique for the
/// lifetime of the database and never reused after deletion.
pub type ItemId = i64;

/// A to-do entry: identity, name, completion flag, optional parent.
///
/// `parent_id = None` marks a root item. A `Some` value referenced an
/// existing item when it was set, but the referent may have been deleted
/// since — deletes do not cascade or re-parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub name: String,
    pub complete: bool,
    pub parent_id: Option<ItemId>,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

impl Item {
    /// Returns `true` if this item has no parent.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Fields to change in an update; `None` means "leave untouched".
///
/// "Provided" is `Option::Some`, never a sentinel, so `complete =
/// Some(false)` is a real update rather than an absent field. There is no
/// way to clear an existing parent through a patch — an absent `parent_id`
/// keeps the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub complete: Option<bool>,
    pub parent_id: Option<ItemId>,
}

impl ItemPatch {
    /// Returns `true` if no field is provided.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.complete.is_none() && self.parent_id.is_none()
    }
}
