//! `sprig rm` — delete an item.
//!
//! Children of the removed item are left in place with a dangling parent
//! reference; there is no cascade.

use clap::Args;
use rusqlite::Connection;
use serde_json::json;
use sprig_core::{ItemId, store};
use std::io::{self, Write as _};

use crate::output::OutputMode;

#[derive(Args, Debug)]
pub struct RmArgs {
    /// ID of the item to delete.
    pub id: ItemId,
}

pub fn run_rm(args: &RmArgs, conn: &mut Connection, output: OutputMode) -> anyhow::Result<()> {
    store::delete(conn, args.id)?;

    let stdout = io::stdout();
    let mut w = stdout.lock();
    if output.is_json() {
        serde_json::to_writer(&mut w, &json!({ "deleted": args.id }))?;
        writeln!(w)?;
    } else {
        writeln!(w, "deleted item {}", args.id)?;
    }
    Ok(())
}
