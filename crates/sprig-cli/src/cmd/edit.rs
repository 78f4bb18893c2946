//! `sprig edit` — update any subset of an item's fields.

use clap::Args;
use rusqlite::Connection;
use sprig_core::{ItemId, ItemPatch, store};

use crate::output::{OutputMode, render_item};

#[derive(Args, Debug)]
pub struct EditArgs {
    /// ID of the item to update.
    pub id: ItemId,

    /// New name.
    #[arg(short, long)]
    pub name: Option<String>,

    /// New completion state; pass an explicit true or false.
    #[arg(short, long)]
    pub complete: Option<bool>,

    /// ID of an existing item to become the parent.
    #[arg(short, long)]
    pub parent: Option<ItemId>,
}

impl EditArgs {
    fn patch(&self) -> ItemPatch {
        ItemPatch {
            name: self.name.clone(),
            complete: self.complete,
            parent_id: self.parent,
        }
    }
}

pub fn run_edit(args: &EditArgs, conn: &mut Connection, output: OutputMode) -> anyhow::Result<()> {
    let item = store::update(conn, args.id, &args.patch())?;
    render_item(output, &item)?;
    Ok(())
}
