// src/lib.rs
//! feishu2md library: normalizes Feishu document block responses and renders
//! them as Markdown, plain text, outlines and summaries.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `Result`
//! - **Configuration**: `RenderConfig`, `PipelineConfig`, `CommandLineInput`
//! - **Envelope**: `normalize_blocks`, `detect_response_format`, observers
//! - **Domain model**: `Document`, `Block`, `BlockKind`, `RichText`
//! - **Formatting**: `render_markdown`, `blocks_to_markdown`, walker, tables
//! - **Analytics**: `summarize`, `search_blocks`, `find_blocks_by_type`
//! - **Response glue**: `DocumentInfo`, `CreationResult`, `SearchResults`, `TableData`
//!
//! ```
//! use serde_json::json;
//!
//! let raw = json!([
//!     {"block_id": "h", "block_type": 3, "heading1": {"elements": [{"text_run": {"content": "Title"}}]}},
//!     {"block_id": "p", "block_type": 2, "text": {"elements": [{"text_run": {"content": "Hello"}}]}}
//! ]);
//! assert_eq!(feishu2md::blocks_to_markdown(raw), "# Title\n\nHello\n");
//! ```

mod analytics;
mod api;
mod config;
mod constants;
mod envelope;
mod error;
mod formatting;
mod model;
mod output;
mod pipeline;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result};

// --- Configuration ---
pub use crate::config::{CommandLineInput, InputSource, OutputFormat, PipelineConfig, RenderConfig};

// --- Envelope ---
pub use crate::envelope::{
    detect_response_format, extract_json_array, normalize_blocks, normalize_blocks_with,
    parse_json, LogObserver, NoopObserver, NormalizeEvent, NormalizeObserver, RecordingObserver,
    ResponseFormat,
};

// --- Domain Model ---
pub use crate::model::{
    heading_level, Block, BlockContent, BlockKind, BlockMap, Child, ColorValue, Document,
    InlineComponent, RichText, RunLink, TableGeometry, TextElement, TextElementStyle, TextField,
    TextRun,
};

// --- Domain Types ---
pub use crate::types::{BlockId, DocumentId, Id};

// --- Formatting ---
pub use crate::formatting::{
    blocks_to_markdown, collect_render_items, compose_outline, compose_plain_text, emit_markdown,
    extract_block_text, merge_lists, render_item, render_markdown, render_table,
    rich_text_to_markdown, rich_text_to_plain, run_style, walk, BlockInfo, BlockWalker, ListTag,
    MarkdownStyleRenderer, MergePolicy, RenderItem, TableStyle, TextStyle, WalkOptions,
};

// --- Analytics ---
pub use crate::analytics::{
    deepest_nesting, find_blocks_by_type, search_blocks, summarize, DocumentSummary,
};

// --- Response Glue ---
pub use crate::api::{
    check_response, document_id_for_blocks, expected_keys, extract_error, CreatedItem,
    CreationOutcome, CreationResult, DocumentInfo, DocumentOrigin, HitKind, ResponseCheck,
    SearchHit, SearchResults, TableData, TableDataCell,
};

// --- Output ---
pub use crate::output::{
    deliver, CompletedOperation, DeliveryTarget, ExecutionStats, FailedOperation, OutputPlan,
    OutputReport,
};

// --- Pipeline Traits ---
pub use crate::pipeline::{compose_view, ContentSource, DocumentComposer, OutputDelivery};
