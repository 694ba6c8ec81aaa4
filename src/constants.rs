// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role. Reading these constants should tell you how deep the
//! walker recurses, how tables are placeheld and how reading time is
//! estimated.

// ---------------------------------------------------------------------------
// Block type codes
// ---------------------------------------------------------------------------

/// First heading type code (`heading1`).
pub const HEADING_TYPE_FIRST: i64 = 3;

/// Last heading type code (`heading9`).
pub const HEADING_TYPE_LAST: i64 = 11;

/// Type code of a table block.
pub const TABLE_TYPE_CODE: i64 = 31;

/// Type code of a table cell block.
pub const TABLE_CELL_TYPE_CODE: i64 = 32;

// ---------------------------------------------------------------------------
// Traversal boundaries
// ---------------------------------------------------------------------------

/// Maximum nesting depth when walking a block tree.
///
/// Embedded children can nest arbitrarily deep and nothing in the payload
/// forbids cycles. Lists deeper than this are silently truncated.
pub const BLOCK_MAX_WALK_DEPTH: usize = 100;

/// Largest `row_size × column_size` grid a table renders as cells.
///
/// Both sizes come straight from the payload; a grid past this is replaced
/// by [`TABLE_OVERSIZED_PLACEHOLDER`].
pub const TABLE_MAX_GRID_CELLS: usize = 1 << 20;

/// Number of spaces per heading level in the document outline.
pub const OUTLINE_INDENT_SPACES: usize = 2;

// ---------------------------------------------------------------------------
// Rendering placeholders
// ---------------------------------------------------------------------------

/// Rendered in place of a table block that carries no `table` payload.
pub const TABLE_UNAVAILABLE_PLACEHOLDER: &str = "[Table: unable to extract content]";

/// Rendered in place of a table with zero rows or zero columns.
pub const TABLE_EMPTY_PLACEHOLDER: &str = "[Table: empty table]";

/// Rendered in place of a table whose declared grid is too large to lay out.
pub const TABLE_OVERSIZED_PLACEHOLDER: &str = "[Table: oversized table]";

/// Rendered in place of a whiteboard when whiteboard extraction is off.
pub const WHITEBOARD_PLACEHOLDER: &str = "[Whiteboard/画板]";

/// Fallback display name for a user mention without content.
pub const USER_MENTION_FALLBACK: &str = "@user";

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Characters read per minute, used for the reading time estimate.
pub const READING_CHARS_PER_MINUTE: f64 = 500.0;

// ---------------------------------------------------------------------------
// String capacity hints (performance, not correctness)
// ---------------------------------------------------------------------------

/// Estimated characters per rendered line, used to pre-allocate output.
pub const CHARS_PER_LINE_ESTIMATE: usize = 64;

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing payload text in log messages.
pub const PAYLOAD_PREVIEW_LENGTH: usize = 200;
