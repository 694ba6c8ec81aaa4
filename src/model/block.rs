use super::block_kind::BlockKind;
use super::rich_text::RichText;
use crate::constants::TABLE_MAX_GRID_CELLS;
use crate::types::BlockId;
use serde_json::Value;

/// A Feishu block with its children.
///
/// Blocks are parsed once from the wire record. The polymorphic payload
/// fields (`text`, `headingN`, `code`, `bullet`, `todo`, `table`, `board`)
/// are read into [`BlockContent`], so consumers ask for capabilities rather
/// than probing JSON keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: BlockId,
    pub type_code: i64,
    pub kind: BlockKind,
    pub content: BlockContent,
    pub children: Vec<Child>,
}

/// A child entry: either a nested block object or a reference by id into
/// the flat block array.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    Embedded(Block),
    Ref(BlockId),
}

impl Child {
    pub fn as_embedded(&self) -> Option<&Block> {
        match self {
            Child::Embedded(block) => Some(block),
            Child::Ref(_) => None,
        }
    }

    pub fn id(&self) -> &BlockId {
        match self {
            Child::Embedded(block) => &block.id,
            Child::Ref(id) => id,
        }
    }
}

/// The `text` field comes either as a literal string or as rich text.
#[derive(Debug, Clone, PartialEq)]
pub enum TextField {
    Literal(String),
    Rich(RichText),
}

impl TextField {
    pub fn as_rich(&self) -> Option<&RichText> {
        match self {
            TextField::Rich(rich) => Some(rich),
            TextField::Literal(_) => None,
        }
    }
}

/// Row-major table layout from `table.property` and `table.cells`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableGeometry {
    pub row_size: usize,
    pub column_size: usize,
    /// Cell block ids; index is `row * column_size + column`.
    pub cells: Vec<BlockId>,
}

impl TableGeometry {
    pub fn is_empty(&self) -> bool {
        self.row_size == 0 || self.column_size == 0
    }

    /// Number of grid slots, `None` when `row_size × column_size` overflows.
    pub fn grid_cells(&self) -> Option<usize> {
        self.row_size.checked_mul(self.column_size)
    }

    /// True when the declared grid is too large to lay out cell by cell.
    pub fn is_oversized(&self) -> bool {
        self.grid_cells()
            .map_or(true, |cells| cells > TABLE_MAX_GRID_CELLS)
    }

    /// The cell id at a position, `None` when the cells array runs short.
    pub fn cell_at(&self, row: usize, column: usize) -> Option<&BlockId> {
        if column >= self.column_size {
            return None;
        }
        let index = row.checked_mul(self.column_size)?.checked_add(column)?;
        self.cells.get(index)
    }
}

/// Typed payload of a block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockContent {
    pub text: Option<TextField>,
    /// The first `heading1`..`heading9` object present.
    pub heading: Option<RichText>,
    pub code: Option<String>,
    pub bullet: Option<RichText>,
    pub done: bool,
    pub table: Option<TableGeometry>,
    pub board_token: Option<String>,
}

impl BlockContent {
    fn from_object(object: &serde_json::Map<String, Value>) -> Self {
        let text = match object.get("text") {
            Some(Value::String(literal)) if !literal.is_empty() => {
                Some(TextField::Literal(literal.clone()))
            }
            Some(value @ Value::Object(map)) if !map.is_empty() => {
                RichText::from_value(value).map(TextField::Rich)
            }
            _ => None,
        };

        let heading = (1..=9)
            .filter_map(|level| object.get(&format!("heading{}", level)))
            .find(|value| value.is_object())
            .and_then(RichText::from_value);

        let code = object
            .get("code")
            .filter(|value| value.is_object())
            .map(|code| string_at(code, "code").unwrap_or_default().to_string());

        let bullet = object.get("bullet").and_then(RichText::from_value);

        let done = object
            .get("todo")
            .map(|todo| {
                todo.get("done")
                    .or_else(|| todo.get("style").and_then(|style| style.get("done")))
                    .and_then(Value::as_bool)
                    .unwrap_or(false)
            })
            .unwrap_or(false);

        let table = object
            .get("table")
            .and_then(Value::as_object)
            .filter(|table| !table.is_empty())
            .map(parse_table_geometry);

        let board_token = object
            .get("board")
            .and_then(|board| string_at(board, "token"))
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Self {
            text,
            heading,
            code,
            bullet,
            done,
            table,
            board_token,
        }
    }

    /// True when a non-empty `text` payload is present.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    pub fn table_geometry(&self) -> Option<&TableGeometry> {
        self.table.as_ref()
    }

    pub fn board_token(&self) -> Option<&str> {
        self.board_token.as_deref()
    }

    pub fn is_done(&self) -> bool {
        self.done
    }
}

fn parse_table_geometry(table: &serde_json::Map<String, Value>) -> TableGeometry {
    let property = table.get("property");
    let size = |key: &str| {
        property
            .and_then(|property| property.get(key))
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize
    };

    // Non-string entries keep their slot so later cells stay in position.
    let cells = table
        .get("cells")
        .and_then(Value::as_array)
        .map(|cells| {
            cells
                .iter()
                .map(|cell| BlockId::new(cell.as_str().unwrap_or_default()))
                .collect()
        })
        .unwrap_or_default();

    TableGeometry {
        row_size: size("row_size"),
        column_size: size("column_size"),
        cells,
    }
}

fn string_at<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value.get(key).and_then(Value::as_str)
}

impl Block {
    /// Reads one wire record. Returns `None` for anything but an object.
    ///
    /// Missing ids become empty, a missing or non-integer `block_type`
    /// becomes `0`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;

        let id = match object.get("block_id") {
            Some(Value::String(id)) => BlockId::new(id.as_str()),
            Some(Value::Number(id)) => BlockId::new(id.to_string()),
            _ => BlockId::default(),
        };
        let type_code = object
            .get("block_type")
            .and_then(Value::as_i64)
            .unwrap_or(0);

        let children = object
            .get("children")
            .and_then(Value::as_array)
            .map(|children| {
                children
                    .iter()
                    .filter_map(|child| match child {
                        Value::Object(_) => Block::from_value(child).map(Child::Embedded),
                        Value::String(id) => Some(Child::Ref(BlockId::new(id.as_str()))),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            id,
            type_code,
            kind: BlockKind::from_code(type_code),
            content: BlockContent::from_object(object),
            children,
        })
    }

    /// Number of child entries of either encoding.
    pub fn children_count(&self) -> usize {
        self.children.len()
    }

    pub fn embedded_children(&self) -> impl Iterator<Item = &Block> {
        self.children.iter().filter_map(Child::as_embedded)
    }
}
