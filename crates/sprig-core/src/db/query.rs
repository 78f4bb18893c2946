//! SQLite query helpers for the item store.
//!
//! Row-level access only: fetch, list, insert, field updates, delete, and
//! existence checks. All functions take a shared `&Connection` reference and
//! return `anyhow::Result<T>` with typed structs (never raw rows). Domain
//! rules (parent validation, patch semantics, cycle checks) live a layer up
//! in [`crate::store`] and [`crate::ancestry`].

use anyhow::{Context, Result};
use rusqlite::{Connection, Row, params, params_from_iter, types::ToSql};
use std::fmt::Write as _;

use crate::model::{Item, ItemId};

const ITEM_COLUMNS: &str = "item_id, name, complete, parent_id, created_at_us, updated_at_us";

/// The fixed set of caller-updatable columns.
///
/// `UPDATE` statements are assembled from these names only, with every value
/// bound as a parameter; nothing caller-supplied is ever interpolated into
/// the SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateColumn {
    Name,
    Complete,
    ParentId,
}

impl UpdateColumn {
    const fn sql_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Complete => "complete",
            Self::ParentId => "parent_id",
        }
    }
}

fn row_to_item(row: &Row<'_>) -> rusqlite::Result<Item> {
    Ok(Item {
        item_id: row.get(0)?,
        name: row.get(1)?,
        complete: row.get(2)?,
        parent_id: row.get(3)?,
        created_at_us: row.get(4)?,
        updated_at_us: row.get(5)?,
    })
}

/// Fetch a single item by exact `item_id`.
///
/// Returns `None` if no row has that id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_item(conn: &Connection, item_id: ItemId) -> Result<Option<Item>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1");
    let mut stmt = conn.prepare(&sql).context("prepare get_item query")?;

    match stmt.query_row(params![item_id], row_to_item) {
        Ok(item) => Ok(Some(item)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e).context(format!("get_item for {item_id}")),
    }
}

/// List every item in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_items(conn: &Connection) -> Result<Vec<Item>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY item_id ASC");
    let mut stmt = conn.prepare(&sql).context("prepare list_items query")?;

    let rows = stmt
        .query_map([], row_to_item)
        .context("execute list_items query")?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row.context("read list_items row")?);
    }
    Ok(items)
}

/// List the direct children of `parent_id` in storage order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_children(conn: &Connection, parent_id: ItemId) -> Result<Vec<Item>> {
    let sql = format!("SELECT {ITEM_COLUMNS} FROM items WHERE parent_id = ?1 ORDER BY item_id ASC");
    let mut stmt = conn.prepare(&sql).context("prepare get_children query")?;

    let rows = stmt
        .query_map(params![parent_id], row_to_item)
        .with_context(|| format!("execute get_children for {parent_id}"))?;

    let mut items = Vec::new();
    for row in rows {
        items.push(row.context("read get_children row")?);
    }
    Ok(items)
}

/// Check whether an item with `item_id` exists.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn item_exists(conn: &Connection, item_id: ItemId) -> Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM items WHERE item_id = ?1)",
        params![item_id],
        |row| row.get(0),
    )
    .with_context(|| format!("item_exists for {item_id}"))
}

/// Insert a new item row, returning the freshly assigned id.
///
/// # Errors
///
/// Returns an error if the insert fails (including the schema-level blank
/// name CHECK).
pub fn insert_item(
    conn: &Connection,
    name: &str,
    complete: bool,
    parent_id: Option<ItemId>,
    now_us: i64,
) -> Result<ItemId> {
    conn.execute(
        "INSERT INTO items (name, complete, parent_id, created_at_us, updated_at_us)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![name, complete, parent_id, now_us],
    )
    .context("insert item row")?;

    Ok(conn.last_insert_rowid())
}

/// Apply field updates to an item row; returns the number of rows changed.
///
/// The SET clause is built from [`UpdateColumn`] names with one bound
/// parameter per value. `updated_at_us` is always refreshed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_item_fields(
    conn: &Connection,
    item_id: ItemId,
    fields: &[(UpdateColumn, Box<dyn ToSql>)],
    now_us: i64,
) -> Result<usize> {
    let mut set_clause = String::new();
    let mut param_values: Vec<&dyn ToSql> = Vec::with_capacity(fields.len() + 2);

    for (column, value) in fields {
        param_values.push(value.as_ref());
        let _ = write!(
            set_clause,
            "{} = ?{}, ",
            column.sql_name(),
            param_values.len()
        );
    }

    param_values.push(&now_us);
    let _ = write!(set_clause, "updated_at_us = ?{}", param_values.len());

    param_values.push(&item_id);
    let sql = format!(
        "UPDATE items SET {set_clause} WHERE item_id = ?{}",
        param_values.len()
    );

    conn.execute(&sql, params_from_iter(param_values))
        .with_context(|| format!("update item {item_id}"))
}

/// Delete an item row; returns `true` if a row was removed.
///
/// Children referencing the deleted item are left untouched, so their
/// `parent_id` dangles afterwards.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_item(conn: &Connection, item_id: ItemId) -> Result<bool> {
    let changed = conn
        .execute("DELETE FROM items WHERE item_id = ?1", params![item_id])
        .with_context(|| format!("delete item {item_id}"))?;
    Ok(changed > 0)
}
