//! The item store: the operation surface over the SQLite layer.
//!
//! Six operations — `list`, `get`, `create`, `update`, `delete`,
//! `ancestors` — each a self-contained sequence of reads/writes against a
//! caller-scoped connection. Mutating operations that pair an existence
//! check with a row mutation run both inside one transaction, so a parent
//! cannot vanish between its validation and the write that references it.

use anyhow::Context as _;
use rusqlite::{Connection, types::ToSql};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

use crate::ancestry;
use crate::db::query::{self, UpdateColumn};
use crate::error::StoreError;
use crate::model::{Item, ItemId, ItemPatch};

/// List every item, storage order.
///
/// # Errors
///
/// Returns [`StoreError::Db`] on database failure.
pub fn list(conn: &Connection) -> Result<Vec<Item>, StoreError> {
    Ok(query::list_items(conn).context("list items")?)
}

/// Get a single item by id.
///
/// The single source of truth for id validation: every other operation that
/// needs to check an id goes through this lookup.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no item has that id.
pub fn get(conn: &Connection, item_id: ItemId) -> Result<Item, StoreError> {
    query::get_item(conn, item_id)
        .with_context(|| format!("get_item {item_id}"))?
        .ok_or(StoreError::NotFound(item_id))
}

/// Create a new item and return its canonical stored form.
///
/// The returned item is re-read from the row just written, so callers see
/// exactly what later `get` calls will see.
///
/// # Errors
///
/// Returns [`StoreError::EmptyName`] for a blank or whitespace-only name,
/// or [`StoreError::InvalidParent`] when `parent_id` is supplied but does
/// not reference an existing item.
pub fn create(
    conn: &mut Connection,
    name: &str,
    complete: bool,
    parent_id: Option<ItemId>,
) -> Result<Item, StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::EmptyName);
    }

    let tx = conn.transaction().context("begin create transaction")?;

    if let Some(parent_id) = parent_id {
        if !query::item_exists(&tx, parent_id).context("check parent existence")? {
            return Err(StoreError::InvalidParent(parent_id));
        }
    }

    let item_id = query::insert_item(&tx, name, complete, parent_id, now_us())?;
    let item = query::get_item(&tx, item_id)
        .with_context(|| format!("re-read created item {item_id}"))?
        .ok_or(StoreError::NotFound(item_id))?;

    tx.commit().context("commit create transaction")?;
    debug!(item_id, parent_id, "created item");
    Ok(item)
}

/// Update any subset of an item's name, completion flag, and parent.
///
/// Only provided patch fields change; absent fields keep their prior
/// values. A provided `parent_id` must exist and must not make the item its
/// own ancestor.
///
/// # Errors
///
/// Returns [`StoreError::NoFieldsProvided`] for an empty patch,
/// [`StoreError::NotFound`] if the item is missing,
/// [`StoreError::EmptyName`] for a blank replacement name,
/// [`StoreError::InvalidParent`] or [`StoreError::WouldCycle`] for a bad
/// parent.
pub fn update(
    conn: &mut Connection,
    item_id: ItemId,
    patch: &ItemPatch,
) -> Result<Item, StoreError> {
    if patch.is_empty() {
        return Err(StoreError::NoFieldsProvided);
    }

    let tx = conn.transaction().context("begin update transaction")?;

    if !query::item_exists(&tx, item_id).context("check item existence")? {
        return Err(StoreError::NotFound(item_id));
    }

    let mut fields: Vec<(UpdateColumn, Box<dyn ToSql>)> = Vec::with_capacity(3);

    if let Some(ref name) = patch.name {
        if name.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }
        fields.push((UpdateColumn::Name, Box::new(name.clone())));
    }
    if let Some(complete) = patch.complete {
        fields.push((UpdateColumn::Complete, Box::new(complete)));
    }
    if let Some(parent_id) = patch.parent_id {
        ancestry::validate_parent(&tx, item_id, parent_id)?;
        fields.push((UpdateColumn::ParentId, Box::new(parent_id)));
    }

    query::update_item_fields(&tx, item_id, &fields, now_us())?;
    let item = query::get_item(&tx, item_id)
        .with_context(|| format!("re-read updated item {item_id}"))?
        .ok_or(StoreError::NotFound(item_id))?;

    tx.commit().context("commit update transaction")?;
    debug!(item_id, "updated item");
    Ok(item)
}

/// Delete an item.
///
/// Children referencing the deleted item keep their now-dangling
/// `parent_id`: no cascade, no re-parenting.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if no item has that id.
pub fn delete(conn: &mut Connection, item_id: ItemId) -> Result<(), StoreError> {
    let tx = conn.transaction().context("begin delete transaction")?;

    if !query::delete_item(&tx, item_id)? {
        return Err(StoreError::NotFound(item_id));
    }

    tx.commit().context("commit delete transaction")?;
    debug!(item_id, "deleted item");
    Ok(())
}

/// Query an item's ancestors.
///
/// With `immediate_only`, the result holds at most the immediate parent;
/// otherwise it is the full chain from nearest ancestor to the root. Either
/// way an item with no parent yields an empty vec.
///
/// # Errors
///
/// Returns [`StoreError::NotFound`] if `item_id` (or an ancestor on the
/// walked chain) is missing, or [`StoreError::CyclicAncestry`] if the
/// stored chain is cyclic.
pub fn ancestors(
    conn: &Connection,
    item_id: ItemId,
    immediate_only: bool,
) -> Result<Vec<Item>, StoreError> {
    if immediate_only {
        Ok(ancestry::immediate_parent(conn, item_id)?
            .into_iter()
            .collect())
    } else {
        ancestry::ancestors(conn, item_id)
    }
}

/// Current wall-clock time in unix-epoch microseconds.
fn now_us() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_micros()).unwrap_or(i64::MAX)
        })
}
