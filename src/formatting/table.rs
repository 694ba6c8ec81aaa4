// src/formatting/table.rs
//! Renders Feishu table blocks as Markdown tables.
//!
//! A table block does not hold its text. `table.cells` lists cell block ids
//! row-major; each cell holds one or more blocks and the first of them
//! carries the visible text. Everything is resolved through the id map.

use super::rich_text::{rich_text_to_markdown, rich_text_to_plain};
use crate::constants::{
    TABLE_EMPTY_PLACEHOLDER, TABLE_OVERSIZED_PLACEHOLDER, TABLE_UNAVAILABLE_PLACEHOLDER,
};
use crate::model::{BlockMap, RichText, TableGeometry, TextField};
use crate::types::BlockId;

/// Which text form fills the cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// Inline Markdown styling kept.
    #[default]
    Styled,
    /// Plain run contents only.
    Plain,
}

impl TableStyle {
    fn render(self, rich: &RichText) -> String {
        match self {
            TableStyle::Styled => rich_text_to_markdown(rich),
            TableStyle::Plain => rich_text_to_plain(rich),
        }
    }
}

/// Renders the table block `table_id` as a Markdown table.
///
/// Returns a bracketed placeholder when the block has no table payload, the
/// table has no rows or columns, or its declared grid is oversized.
pub fn render_table(table_id: &str, blocks: &BlockMap<'_>, style: TableStyle) -> String {
    let Some(geometry) = blocks
        .get(table_id)
        .and_then(|table| table.content.table_geometry())
    else {
        log::debug!("Table {} carries no table payload", table_id);
        return TABLE_UNAVAILABLE_PLACEHOLDER.to_string();
    };

    if geometry.is_empty() {
        return TABLE_EMPTY_PLACEHOLDER.to_string();
    }

    let Some(grid_cells) = geometry.grid_cells().filter(|_| !geometry.is_oversized()) else {
        log::warn!(
            "Table {} declares a {}x{} grid, too large to render",
            table_id,
            geometry.row_size,
            geometry.column_size
        );
        return TABLE_OVERSIZED_PLACEHOLDER.to_string();
    };

    if geometry.cells.len() < grid_cells {
        log::debug!(
            "Table {} lists {} cells for a {}x{} grid, padding with empty cells",
            table_id,
            geometry.cells.len(),
            geometry.row_size,
            geometry.column_size
        );
    }

    render_grid(geometry, blocks, style)
}

fn render_grid(geometry: &TableGeometry, blocks: &BlockMap<'_>, style: TableStyle) -> String {
    let mut lines = Vec::with_capacity(geometry.row_size + 1);

    for row in 0..geometry.row_size {
        let cells: Vec<String> = (0..geometry.column_size)
            .map(|column| {
                geometry
                    .cell_at(row, column)
                    .map(|cell_id| escape_cell(&cell_text(cell_id, blocks, style)))
                    .unwrap_or_default()
            })
            .collect();
        lines.push(format!("| {} |", cells.join(" | ")));

        if row == 0 {
            let separator = vec!["---"; geometry.column_size];
            lines.push(format!("| {} |", separator.join(" | ")));
        }
    }

    lines.join("\n")
}

/// Text of a cell: the first non-empty of `text`, the heading, `bullet` in
/// the cell's first child block, trimmed.
fn cell_text(cell_id: &BlockId, blocks: &BlockMap<'_>, style: TableStyle) -> String {
    let Some(first_child) = blocks
        .get(cell_id.as_str())
        .and_then(|cell| cell.children.first())
        .and_then(|child| blocks.resolve(child))
    else {
        return String::new();
    };

    let content = &first_child.content;
    let candidates = [
        content.text.as_ref().and_then(TextField::as_rich),
        content.heading.as_ref(),
        content.bullet.as_ref(),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|rich| style.render(rich))
        .find(|text| !text.is_empty())
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|")
}
