// src/formatting/block_renderer.rs
//! Document-level views: Markdown, plain text and heading outline.
//!
//! Each view walks the document once. Markdown goes through render items,
//! list merging and the emitter; the plain text and outline views read the
//! walker records directly.

use super::list_merge::merge_lists;
use super::markdown::emit_markdown;
use super::render_items::collect_render_items;
use super::walker::{walk, WalkOptions};
use crate::config::RenderConfig;
use crate::constants::OUTLINE_INDENT_SPACES;
use crate::model::{BlockKind, Document};
use serde_json::Value;

/// Renders a document to Markdown.
pub fn render_markdown(document: &Document, config: &RenderConfig) -> String {
    let items = collect_render_items(document, config);
    log::debug!(
        "Rendering {} items from {} top-level blocks",
        items.len(),
        document.blocks().len()
    );

    let items = if config.merge_lists {
        merge_lists(items, config.merge_policy)
    } else {
        items
    };
    emit_markdown(&items)
}

/// Normalizes a raw "get document blocks" payload and renders it with the
/// default configuration.
pub fn blocks_to_markdown(raw: Value) -> String {
    render_markdown(&Document::from_raw(raw), &RenderConfig::default())
}

/// Plain text of every block that has some, separated by blank lines.
pub fn compose_plain_text(document: &Document, max_depth: usize) -> String {
    let options = WalkOptions {
        max_depth,
        skip_table_cells: false,
    };

    walk(document, options)
        .map(|info| info.text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One line per heading, indented by level: `"  2. Section"`.
pub fn compose_outline(document: &Document) -> String {
    walk(document, WalkOptions::default())
        .filter(|info| matches!(info.kind, BlockKind::Heading(_)))
        .filter_map(|info| {
            let level = usize::from(info.level?);
            let indent = " ".repeat(OUTLINE_INDENT_SPACES * (level - 1));
            Some(format!("{}{}. {}", indent, level, info.text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
