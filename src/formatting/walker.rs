// src/formatting/walker.rs
//! Lazy pre-order traversal of a block tree.
//!
//! The walker yields one [`BlockInfo`] per visited block: a flattened record
//! with the block's plain and styled text already extracted. It holds an
//! explicit stack of borrowed child iterators instead of recursing, so deep
//! documents cost heap, not call stack.
//!
//! Only embedded children are descended into. Id-reference children are
//! counted but not followed; the flat block array already lists them at the
//! top level.

use super::rich_text::{rich_text_to_markdown, rich_text_to_plain};
use crate::constants::BLOCK_MAX_WALK_DEPTH;
use crate::model::{heading_level, Block, BlockKind, Child, Document, RichText, TextField};
use crate::types::BlockId;
use serde::Serialize;
use std::collections::HashSet;
use std::slice;

/// Flattened view of one block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockInfo {
    pub block_id: BlockId,
    pub block_type: i64,
    pub block_type_name: String,
    /// Plain text, strikethrough removed.
    pub text: String,
    /// Styled text, or the plain text when there is no styled form.
    pub inline_text: String,
    pub level: Option<u8>,
    pub children_count: usize,
    pub checked: bool,
    #[serde(skip)]
    pub kind: BlockKind,
}

impl BlockInfo {
    pub fn from_block(block: &Block) -> Self {
        let (text, styled) = extract_block_text(block);
        let inline_text = if styled.is_empty() {
            text.clone()
        } else {
            styled
        };

        Self {
            block_id: block.id.clone(),
            block_type: block.type_code,
            block_type_name: block.kind.name().into_owned(),
            text,
            inline_text,
            level: heading_level(block.type_code),
            children_count: block.children_count(),
            checked: block.kind == BlockKind::Todo && block.content.is_done(),
            kind: block.kind,
        }
    }

    /// The text to display: styled when available, else plain.
    pub fn display_text(&self) -> &str {
        if self.inline_text.is_empty() {
            &self.text
        } else {
            &self.inline_text
        }
    }
}

/// Extracts `(plain, styled)` text from a block's payload.
///
/// Fields are read in a fixed order and a later field only fills what is
/// still empty: `text`, then the first heading, then `code.code` (only when
/// no plain text was found), then `bullet`.
pub fn extract_block_text(block: &Block) -> (String, String) {
    let content = &block.content;
    let mut plain = String::new();
    let mut styled = String::new();

    match &content.text {
        Some(TextField::Literal(literal)) => {
            plain = literal.clone();
            styled = literal.clone();
        }
        Some(TextField::Rich(rich)) => {
            plain = rich_text_to_plain(rich);
            styled = rich_text_to_markdown(rich);
            if styled.is_empty() {
                styled = plain.clone();
            }
        }
        None => {}
    }

    if let Some(heading) = &content.heading {
        fill_missing(&mut plain, &mut styled, heading);
    }

    if let Some(code) = content.code.as_deref().filter(|code| !code.is_empty()) {
        if plain.is_empty() {
            plain = code.to_string();
            styled = code.to_string();
        }
    }

    if let Some(bullet) = &content.bullet {
        fill_missing(&mut plain, &mut styled, bullet);
    }

    (plain, styled)
}

fn fill_missing(plain: &mut String, styled: &mut String, rich: &RichText) {
    if plain.is_empty() {
        *plain = rich_text_to_plain(rich);
    }
    if styled.is_empty() {
        *styled = rich_text_to_markdown(rich);
    }
}

/// Traversal options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest level visited; top-level blocks are depth 0.
    pub max_depth: usize,
    /// Leave out table cells and everything beneath them, and do not
    /// descend into tables.
    pub skip_table_cells: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: BLOCK_MAX_WALK_DEPTH,
            skip_table_cells: false,
        }
    }
}

/// One level of the traversal stack.
enum Level<'a> {
    Roots(slice::Iter<'a, Block>),
    Children(slice::Iter<'a, Child>),
}

impl<'a> Iterator for Level<'a> {
    type Item = &'a Block;

    fn next(&mut self) -> Option<&'a Block> {
        match self {
            Level::Roots(blocks) => blocks.next(),
            Level::Children(children) => children.find_map(Child::as_embedded),
        }
    }
}

/// Pre-order iterator over a document's blocks.
pub struct BlockWalker<'a> {
    stack: Vec<(Level<'a>, usize)>,
    options: WalkOptions,
    skipped: HashSet<&'a str>,
}

impl<'a> BlockWalker<'a> {
    pub fn new(document: &'a Document, options: WalkOptions) -> Self {
        let skipped = if options.skip_table_cells {
            table_cell_descendants(document)
        } else {
            HashSet::new()
        };

        Self {
            stack: vec![(Level::Roots(document.blocks().iter()), 0)],
            options,
            skipped,
        }
    }

    fn is_skipped(&self, block: &Block) -> bool {
        self.options.skip_table_cells
            && (block.kind == BlockKind::TableCell || self.skipped.contains(block.id.as_str()))
    }
}

impl<'a> Iterator for BlockWalker<'a> {
    type Item = BlockInfo;

    fn next(&mut self) -> Option<BlockInfo> {
        loop {
            let (level, depth) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(block) = level.next() else {
                self.stack.pop();
                continue;
            };

            if self.is_skipped(block) {
                continue;
            }

            let descend = !(self.options.skip_table_cells && block.kind == BlockKind::Table);
            if descend && depth < self.options.max_depth {
                self.stack
                    .push((Level::Children(block.children.iter()), depth + 1));
            } else if descend && block.embedded_children().next().is_some() {
                log::debug!(
                    "Depth limit {} reached at block {}, children dropped",
                    self.options.max_depth,
                    block.id
                );
            }

            return Some(BlockInfo::from_block(block));
        }
    }
}

/// Walks a document with the given options.
pub fn walk(document: &Document, options: WalkOptions) -> BlockWalker<'_> {
    BlockWalker::new(document, options)
}

/// Ids of every table cell and of every block reachable beneath one.
///
/// Children are followed in both encodings through the id map; a visited
/// set keeps reference cycles from looping.
fn table_cell_descendants(document: &Document) -> HashSet<&str> {
    let map = document.block_map();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut pending: Vec<&Block> = Vec::new();

    let mut roots: Vec<&Block> = document.blocks().iter().collect();
    while let Some(block) = roots.pop() {
        if block.kind == BlockKind::TableCell {
            pending.push(block);
        }
        roots.extend(block.embedded_children());
    }

    while let Some(block) = pending.pop() {
        if !visited.insert(block.id.as_str()) {
            continue;
        }
        pending.extend(block.children.iter().filter_map(|child| map.resolve(child)));
    }

    log::debug!("Skipping {} table cell blocks and descendants", visited.len());
    visited
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn text_block(id: &str, content: &str) -> serde_json::Value {
        json!({
            "block_id": id,
            "block_type": 2,
            "text": {"elements": [{"text_run": {"content": content}}]}
        })
    }

    fn ids(document: &Document, options: WalkOptions) -> Vec<String> {
        walk(document, options)
            .map(|info| info.block_id.into_string())
            .collect()
    }

    #[test]
    fn test_pre_order_over_embedded_children() {
        let document = Document::from_values(&[
            json!({
                "block_id": "a",
                "block_type": 1,
                "children": [
                    {"block_id": "a1", "block_type": 2, "children": [{"block_id": "a1x", "block_type": 2}]},
                    "ref-only",
                    {"block_id": "a2", "block_type": 2}
                ]
            }),
            text_block("b", "b"),
        ]);

        assert_eq!(
            ids(&document, WalkOptions::default()),
            vec!["a", "a1", "a1x", "a2", "b"]
        );
    }

    #[test]
    fn test_depth_guard_truncates_silently() {
        let document = Document::from_values(&[json!({
            "block_id": "d0",
            "children": [{
                "block_id": "d1",
                "children": [{"block_id": "d2"}]
            }]
        })]);

        let options = WalkOptions {
            max_depth: 1,
            ..Default::default()
        };
        assert_eq!(ids(&document, options), vec!["d0", "d1"]);

        let roots_only = WalkOptions {
            max_depth: 0,
            ..Default::default()
        };
        assert_eq!(ids(&document, roots_only), vec!["d0"]);
    }

    #[test]
    fn test_table_cells_and_descendants_are_skipped() {
        let document = Document::from_values(&[
            json!({
                "block_id": "t",
                "block_type": 31,
                "children": ["c1", {"block_id": "c2", "block_type": 32, "children": ["p2"]}],
                "table": {"property": {"row_size": 1, "column_size": 2}, "cells": ["c1", "c2"]}
            }),
            json!({"block_id": "c1", "block_type": 32, "children": ["p1"]}),
            text_block("p1", "in cell"),
            text_block("p2", "also in cell"),
            text_block("after", "outside"),
        ]);

        let skipping = WalkOptions {
            skip_table_cells: true,
            ..Default::default()
        };
        assert_eq!(ids(&document, skipping), vec!["t", "after"]);
        assert_eq!(
            ids(&document, WalkOptions::default()),
            vec!["t", "c2", "c1", "p1", "p2", "after"]
        );
    }

    #[test]
    fn test_cyclic_cell_references_terminate() {
        let document = Document::from_values(&[
            json!({"block_id": "c", "block_type": 32, "children": ["x"]}),
            json!({"block_id": "x", "block_type": 2, "children": ["c"]}),
            text_block("free", "free"),
        ]);

        let skipping = WalkOptions {
            skip_table_cells: true,
            ..Default::default()
        };
        assert_eq!(ids(&document, skipping), vec!["free"]);
    }

    #[test]
    fn test_record_fields() {
        let document = Document::from_values(&[
            json!({
                "block_id": "h",
                "block_type": 4,
                "heading2": {"elements": [{"text_run": {"content": "Intro", "text_element_style": {"bold": true}}}]},
                "children": ["x", "y"]
            }),
            json!({"block_id": "t", "block_type": 16, "todo": {"done": true},
                   "bullet": {"elements": [{"text_run": {"content": "ship"}}]}}),
        ]);

        let records: Vec<BlockInfo> = walk(&document, WalkOptions::default()).collect();
        assert_eq!(records[0].level, Some(2));
        assert_eq!(records[0].block_type_name, "heading2");
        assert_eq!(records[0].text, "Intro");
        assert_eq!(records[0].inline_text, "**Intro**");
        assert_eq!(records[0].children_count, 2);
        assert!(!records[0].checked);

        assert_eq!(records[1].level, None);
        assert!(records[1].checked);
        assert_eq!(records[1].display_text(), "ship");
    }

    #[test]
    fn test_text_precedence() {
        let block = Block::from_value(&json!({
            "block_type": 14,
            "code": {"code": "fn main() {}"},
            "bullet": {"elements": [{"text_run": {"content": "ignored"}}]}
        }))
        .unwrap();
        assert_eq!(
            extract_block_text(&block),
            ("fn main() {}".to_string(), "fn main() {}".to_string())
        );

        let literal = Block::from_value(&json!({
            "text": "literal",
            "heading1": {"elements": [{"text_run": {"content": "heading"}}]}
        }))
        .unwrap();
        assert_eq!(
            extract_block_text(&literal),
            ("literal".to_string(), "literal".to_string())
        );
    }

    #[test]
    fn test_struck_text_keeps_styled_form() {
        let block = Block::from_value(&json!({
            "block_type": 2,
            "text": {"elements": [{"text_run": {"content": "gone", "text_element_style": {"strikethrough": true}}}]}
        }))
        .unwrap();

        let info = BlockInfo::from_block(&block);
        assert_eq!(info.text, "");
        assert_eq!(info.inline_text, "~~gone~~");
    }
}
