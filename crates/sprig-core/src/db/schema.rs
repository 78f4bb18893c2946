//! Canonical SQLite schema for the item store.
//!
//! One table holds the forest: `items` keeps every to-do entry with its
//! optional `parent_id` reference, and `store_meta` tracks the applied
//! schema version alongside `PRAGMA user_version`.
//!
//! `parent_id` is deliberately **not** a foreign key: deleting an item must
//! leave its children with a dangling reference (no cascade, no
//! re-parenting), so parent existence is enforced in the domain layer at the
//! time a parent is set.

/// Migration v1: the `items` table plus store metadata.
///
/// `AUTOINCREMENT` keeps deleted ids from ever being reassigned.
pub const MIGRATION_V1_SQL: &str = r"
CREATE TABLE IF NOT EXISTS items (
    item_id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL CHECK (length(trim(name)) > 0),
    complete INTEGER NOT NULL DEFAULT 0 CHECK (complete IN (0, 1)),
    parent_id INTEGER,
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (1, 1);
";

/// Migration v2: read-path index for child lookups.
pub const MIGRATION_V2_SQL: &str = r"
CREATE INDEX IF NOT EXISTS idx_items_parent
    ON items(parent_id);
";

/// Indexes every migrated database must contain.
pub const REQUIRED_INDEXES: &[&str] = &["idx_items_parent"];
