//! Typed model of a Feishu document's block tree.

mod block;
mod block_kind;
mod rich_text;

pub use block::{Block, BlockContent, Child, TableGeometry, TextField};
pub use block_kind::{heading_level, BlockKind};
pub use rich_text::{
    ColorValue, InlineComponent, RichText, RunLink, TextElement, TextElementStyle, TextRun,
};

use crate::envelope::{normalize_blocks_with, NoopObserver, NormalizeObserver};
use serde_json::Value;
use std::collections::HashMap;

/// A parsed block sequence, top-level blocks in response order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Parses an already normalized block sequence. Non-object entries are dropped.
    pub fn from_values(values: &[Value]) -> Self {
        Self::new(values.iter().filter_map(Block::from_value).collect())
    }

    /// Normalizes a raw "get document blocks" payload, then parses it.
    pub fn from_raw(raw: Value) -> Self {
        Self::from_raw_observed(raw, &mut NoopObserver)
    }

    /// As [`Document::from_raw`], reporting normalization decisions to `observer`.
    pub fn from_raw_observed(raw: Value, observer: &mut dyn NormalizeObserver) -> Self {
        Self::from_values(&normalize_blocks_with(raw, observer))
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Builds the id lookup over every block, embedded ones included.
    pub fn block_map(&self) -> BlockMap<'_> {
        BlockMap::build(&self.blocks)
    }
}

/// Lookup from block id to block, borrowed from a [`Document`].
///
/// Id-reference children resolve through this map only; it never owns
/// blocks. When ids repeat, the last block in pre-order wins.
#[derive(Debug, Clone, Default)]
pub struct BlockMap<'a> {
    by_id: HashMap<&'a str, &'a Block>,
}

impl<'a> BlockMap<'a> {
    pub fn build(blocks: &'a [Block]) -> Self {
        let mut by_id = HashMap::with_capacity(blocks.len());
        let mut pending: Vec<&'a Block> = blocks.iter().rev().collect();

        while let Some(block) = pending.pop() {
            by_id.insert(block.id.as_str(), block);
            pending.extend(block.children.iter().rev().filter_map(Child::as_embedded));
        }

        Self { by_id }
    }

    pub fn get(&self, id: &str) -> Option<&'a Block> {
        self.by_id.get(id).copied()
    }

    /// Resolves a child entry to its block.
    pub fn resolve(&self, child: &'a Child) -> Option<&'a Block> {
        match child {
            Child::Embedded(block) => Some(block),
            Child::Ref(id) => self.get(id.as_str()),
        }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
