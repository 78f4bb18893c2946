//! `sprig show` — show one item by id.

use clap::Args;
use rusqlite::Connection;
use sprig_core::{ItemId, store};

use crate::output::{OutputMode, render_item};

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// ID of the item to show.
    pub id: ItemId,
}

pub fn run_show(args: &ShowArgs, conn: &Connection, output: OutputMode) -> anyhow::Result<()> {
    let item = store::get(conn, args.id)?;
    render_item(output, &item)?;
    Ok(())
}
