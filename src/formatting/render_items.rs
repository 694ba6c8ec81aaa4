// src/formatting/render_items.rs
//! Intermediate render items between the walker and the Markdown emitter.

use super::table::{render_table, TableStyle};
use super::walker::{walk, BlockInfo, WalkOptions};
use crate::config::RenderConfig;
use crate::constants::WHITEBOARD_PLACEHOLDER;
use crate::model::{BlockKind, BlockMap, Document};

/// One unit of Markdown output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderItem {
    Skip,
    Paragraph(String),
    Heading { level: u8, text: String },
    Bullet(String),
    /// `ordinal` is assigned by list merging.
    Ordered { ordinal: Option<usize>, text: String },
    Todo { checked: bool, text: String },
    Code(String),
    Quote(String),
    Divider,
    Image(String),
    Callout(String),
    Table(String),
    Whiteboard(String),
    Blank,
}

/// The list tags grouped into runs by list merging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTag {
    Bullet,
    Ordered,
    Todo,
}

impl RenderItem {
    pub fn list_tag(&self) -> Option<ListTag> {
        match self {
            RenderItem::Bullet(_) => Some(ListTag::Bullet),
            RenderItem::Ordered { .. } => Some(ListTag::Ordered),
            RenderItem::Todo { .. } => Some(ListTag::Todo),
            _ => None,
        }
    }
}

/// Walks the document and maps each record to its render item.
pub fn collect_render_items(document: &Document, config: &RenderConfig) -> Vec<RenderItem> {
    let blocks = document.block_map();
    let options = WalkOptions {
        max_depth: config.max_depth,
        skip_table_cells: config.extract_tables,
    };

    walk(document, options)
        .filter_map(|info| render_item(&info, &blocks, config))
        .collect()
}

/// Maps one record to a render item; kinds without output map to `None`.
pub fn render_item(
    info: &BlockInfo,
    blocks: &BlockMap<'_>,
    config: &RenderConfig,
) -> Option<RenderItem> {
    let text = info.display_text().to_string();

    let item = match info.kind {
        BlockKind::Page => RenderItem::Skip,
        BlockKind::Text if text.is_empty() => return None,
        BlockKind::Text => RenderItem::Paragraph(text),
        BlockKind::Heading(_) => RenderItem::Heading {
            level: info.level.unwrap_or(1),
            text,
        },
        BlockKind::Bullet => RenderItem::Bullet(text),
        BlockKind::Ordered => RenderItem::Ordered {
            ordinal: None,
            text,
        },
        BlockKind::Code => RenderItem::Code(text),
        BlockKind::Quote => RenderItem::Quote(text),
        BlockKind::Todo => RenderItem::Todo {
            checked: info.checked,
            text,
        },
        BlockKind::Divider => RenderItem::Divider,
        BlockKind::Image => RenderItem::Image(text),
        BlockKind::Callout => RenderItem::Callout(text),
        BlockKind::Table if config.extract_tables => RenderItem::Table(render_table(
            info.block_id.as_str(),
            blocks,
            TableStyle::Styled,
        )),
        BlockKind::Table => {
            RenderItem::Table(format!("[Table with {} cells]", info.children_count))
        }
        BlockKind::Whiteboard => RenderItem::Whiteboard(whiteboard_label(info, blocks, config)),
        other => {
            log::debug!("No Markdown rendering for {} block {}", other, info.block_id);
            return None;
        }
    };

    Some(item)
}

fn whiteboard_label(info: &BlockInfo, blocks: &BlockMap<'_>, config: &RenderConfig) -> String {
    if !config.extract_whiteboards {
        return WHITEBOARD_PLACEHOLDER.to_string();
    }

    match blocks
        .get(info.block_id.as_str())
        .and_then(|block| block.content.board_token())
    {
        Some(token) => format!("[Whiteboard: {}]", token),
        None => "[Whiteboard]".to_string(),
    }
}
