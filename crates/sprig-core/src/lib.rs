//! sprig-core: item model, SQLite persistence, and ancestry resolution.
//!
//! The crate is a thin domain layer over a SQLite row store. Items form a
//! forest: each item has at most one parent, and the store resolves ancestor
//! chains (immediate parent or full lineage to the root) on demand.
//!
//! # Conventions
//!
//! - **Errors**: operations return [`error::StoreError`]; infrastructure
//!   failures travel as `anyhow` context inside the `Db` variant.
//! - **Logging**: `tracing` macros (`debug!`, `warn!`).
//! - **Connections**: every function borrows a caller-scoped
//!   `rusqlite::Connection`; nothing holds process-wide state.

pub mod ancestry;
pub mod db;
pub mod error;
pub mod model;
pub mod store;

pub use error::StoreError;
pub use model::{Item, ItemId, ItemPatch};
