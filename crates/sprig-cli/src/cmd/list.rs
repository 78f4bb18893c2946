//! `sprig list` — list every item.

use clap::Args;
use rusqlite::Connection;
use sprig_core::store;

use crate::output::{OutputMode, render_items};

#[derive(Args, Debug)]
pub struct ListArgs {}

pub fn run_list(_args: &ListArgs, conn: &Connection, output: OutputMode) -> anyhow::Result<()> {
    let items = store::list(conn)?;
    render_items(output, &items)?;
    Ok(())
}
