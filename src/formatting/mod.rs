// src/formatting/mod.rs
//! Renders Feishu block trees into Markdown, plain text and outlines.

// Sub-modules
pub mod block_renderer;
mod list_merge;
mod markdown;
mod render_items;
mod rich_text;
mod table;
mod walker;

pub use block_renderer::{blocks_to_markdown, compose_outline, compose_plain_text, render_markdown};
pub use list_merge::{merge_lists, MergePolicy};
pub use markdown::emit_markdown;
pub use render_items::{collect_render_items, render_item, ListTag, RenderItem};
pub use rich_text::{
    rich_text_to_markdown, rich_text_to_plain, run_style, MarkdownStyleRenderer, TextStyle,
};
pub use table::{render_table, TableStyle};
pub use walker::{extract_block_text, walk, BlockInfo, BlockWalker, WalkOptions};
