//! `sprig add` — create a new item.

use clap::Args;
use rusqlite::Connection;
use sprig_core::{ItemId, store};

use crate::output::{OutputMode, render_item};

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Name of the new item.
    pub name: String,

    /// Mark the item complete from the start.
    #[arg(long)]
    pub complete: bool,

    /// ID of an existing item to be the new item's parent.
    #[arg(short, long)]
    pub parent: Option<ItemId>,
}

pub fn run_add(args: &AddArgs, conn: &mut Connection, output: OutputMode) -> anyhow::Result<()> {
    let item = store::create(conn, &args.name, args.complete, args.parent)?;
    render_item(output, &item)?;
    Ok(())
}
