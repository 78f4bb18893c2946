//! `sprig parents` — query an item's ancestors.
//!
//! Immediate parent by default; `--all` walks the chain to the root,
//! nearest ancestor first.

use clap::Args;
use rusqlite::Connection;
use sprig_core::{ItemId, store};

use crate::output::{OutputMode, render_items};

#[derive(Args, Debug)]
pub struct ParentsArgs {
    /// ID of the item whose ancestors to query.
    pub id: ItemId,

    /// Walk the whole chain to the root instead of just the immediate parent.
    #[arg(long)]
    pub all: bool,
}

pub fn run_parents(
    args: &ParentsArgs,
    conn: &Connection,
    output: OutputMode,
) -> anyhow::Result<()> {
    let chain = store::ancestors(conn, args.id, !args.all)?;
    render_items(output, &chain)?;
    Ok(())
}
