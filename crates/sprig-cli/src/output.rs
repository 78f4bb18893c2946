//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its output
//! accordingly: aligned key/value lines for humans, stable JSON for
//! scripts and agents.

use sprig_core::Item;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable output.
    Human,
    /// Machine-readable JSON (one object per result, or a JSON array).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[must_use]
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render a left-aligned key/value line in human output.
pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

/// One-line human summary of an item: `[x] 3  Buy milk  (parent: 1)`.
fn summary_line(item: &Item) -> String {
    let check = if item.complete { "x" } else { " " };
    match item.parent_id {
        Some(parent_id) => format!("[{check}] {}  {}  (parent: {parent_id})", item.item_id, item.name),
        None => format!("[{check}] {}  {}", item.item_id, item.name),
    }
}

/// Render a single item in the requested mode.
pub fn render_item(mode: OutputMode, item: &Item) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if mode.is_json() {
        serde_json::to_writer(&mut w, item)?;
        writeln!(w)?;
        return Ok(());
    }

    pretty_kv(&mut w, "id", item.item_id.to_string())?;
    pretty_kv(&mut w, "name", &item.name)?;
    pretty_kv(&mut w, "complete", if item.complete { "yes" } else { "no" })?;
    match item.parent_id {
        Some(parent_id) => pretty_kv(&mut w, "parent", parent_id.to_string())?,
        None => pretty_kv(&mut w, "parent", "-")?,
    }
    Ok(())
}

/// Render a list of items: a JSON array, or one summary line each.
pub fn render_items(mode: OutputMode, items: &[Item]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut w = stdout.lock();

    if mode.is_json() {
        serde_json::to_writer(&mut w, items)?;
        writeln!(w)?;
        return Ok(());
    }

    for item in items {
        writeln!(w, "{}", summary_line(item))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i64, name: &str, complete: bool, parent_id: Option<i64>) -> Item {
        Item {
            item_id: id,
            name: name.to_string(),
            complete,
            parent_id,
            created_at_us: 0,
            updated_at_us: 0,
        }
    }

    #[test]
    fn summary_marks_completion_and_parent() {
        let line = summary_line(&item(3, "Buy milk", true, Some(1)));
        assert!(line.starts_with("[x] 3"), "line: {line}");
        assert!(line.contains("parent: 1"), "line: {line}");

        let root = summary_line(&item(1, "Groceries", false, None));
        assert!(root.starts_with("[ ] 1"), "line: {root}");
        assert!(!root.contains("parent"), "line: {root}");
    }
}
