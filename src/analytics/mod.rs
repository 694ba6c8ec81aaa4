// src/analytics/mod.rs
//! Content measurement, statistics and search over Feishu documents.

use crate::constants::READING_CHARS_PER_MINUTE;
use crate::formatting::{walk, BlockInfo, WalkOptions};
use crate::model::{Block, Document};
use indexmap::IndexMap;
use serde::Serialize;

/// Document statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentSummary {
    pub total_blocks: usize,
    /// Block type name to count, in first-seen order.
    pub block_type_distribution: IndexMap<String, usize>,
    /// Plain text length in characters.
    pub total_text_length: usize,
    pub estimated_reading_time_minutes: f64,
    /// See [`deepest_nesting`].
    pub deepest_nesting: usize,
}

/// Summarizes every walked block.
pub fn summarize(document: &Document) -> DocumentSummary {
    let mut summary = DocumentSummary::default();

    for info in walk(document, WalkOptions::default()) {
        summary.total_blocks += 1;
        *summary
            .block_type_distribution
            .entry(info.block_type_name)
            .or_insert(0) += 1;
        summary.total_text_length += info.text.chars().count();
    }

    summary.estimated_reading_time_minutes =
        summary.total_text_length as f64 / READING_CHARS_PER_MINUTE;
    summary.deepest_nesting = deepest_nesting(document);
    summary
}

/// Records of every block with the given type code.
pub fn find_blocks_by_type(document: &Document, type_code: i64) -> Vec<BlockInfo> {
    walk(document, WalkOptions::default())
        .filter(|info| info.block_type == type_code)
        .collect()
}

/// Records whose plain text contains `query`.
pub fn search_blocks(document: &Document, query: &str, case_sensitive: bool) -> Vec<BlockInfo> {
    let needle = if case_sensitive {
        query.to_string()
    } else {
        query.to_lowercase()
    };

    walk(document, WalkOptions::default())
        .filter(|info| {
            if case_sensitive {
                info.text.contains(&needle)
            } else {
                info.text.to_lowercase().contains(&needle)
            }
        })
        .collect()
}

/// Deepest level of embedded nesting; a flat document has depth 1.
pub fn deepest_nesting(document: &Document) -> usize {
    blocks_max_depth(document.blocks(), 1)
}

fn blocks_max_depth(blocks: &[Block], current_depth: usize) -> usize {
    let mut deepest = 0;
    let mut pending: Vec<(&Block, usize)> = blocks.iter().map(|b| (b, current_depth)).collect();

    while let Some((block, depth)) = pending.pop() {
        deepest = deepest.max(depth);
        pending.extend(block.embedded_children().map(|child| (child, depth + 1)));
    }

    deepest
}
