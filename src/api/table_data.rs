//! Coordinate-addressed table responses.
//!
//! Table tools answer with explicit `{row, column}` coordinates per cell
//! instead of the row-major id list a table block carries.

use super::string_field;
use crate::constants::TABLE_MAX_GRID_CELLS;
use serde_json::Value;

/// One addressed cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TableDataCell {
    pub row: usize,
    pub column: usize,
    /// `blockType` of the cell content, `"text"` when absent.
    pub block_type: String,
    pub content: Value,
}

impl TableDataCell {
    /// Text of the cell according to its block type.
    pub fn text(&self) -> String {
        if !self.content.is_object() {
            return match &self.content {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
        }

        let options = self.content.get("options");
        let option = |key: &str| options.and_then(|options| options.get(key));

        match self.block_type.as_str() {
            "text" => option("text")
                .and_then(|text| text.get("textStyles"))
                .and_then(Value::as_array)
                .map(|styles| {
                    styles
                        .iter()
                        .map(|style| string_field(style, "text"))
                        .collect()
                })
                .unwrap_or_default(),
            "code" => option("code")
                .map(|code| string_field(code, "code"))
                .unwrap_or_default(),
            "heading" => option("heading")
                .map(|heading| string_field(heading, "content"))
                .unwrap_or_default(),
            _ => self.content.to_string(),
        }
    }
}

/// Parsed table response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableData {
    pub table_id: String,
    pub row_size: usize,
    pub column_size: usize,
    pub cells: Vec<TableDataCell>,
    pub metadata: Value,
}

impl TableData {
    /// Reads a table response. Sizes come from `rowSize`/`columnSize` or
    /// their snake_case spellings.
    pub fn parse(response: &Value) -> Self {
        let size = |camel: &str, snake: &str| {
            response
                .get(camel)
                .or_else(|| response.get(snake))
                .and_then(Value::as_u64)
                .unwrap_or(0) as usize
        };

        let cells = response
            .get("cells")
            .and_then(Value::as_array)
            .map(|cells| cells.iter().map(parse_cell).collect())
            .unwrap_or_default();

        Self {
            table_id: string_field(response, "table_id"),
            row_size: size("rowSize", "row_size"),
            column_size: size("columnSize", "column_size"),
            cells,
            metadata: response
                .get("metadata")
                .cloned()
                .unwrap_or_else(|| Value::Object(Default::default())),
        }
    }

    /// The first cell at a coordinate.
    pub fn cell(&self, row: usize, column: usize) -> Option<&TableDataCell> {
        self.cells
            .iter()
            .find(|cell| cell.row == row && cell.column == column)
    }

    /// Cell texts as a `row_size` × `column_size` grid. Cells outside the
    /// grid are ignored; a later cell at the same coordinate wins.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let (row_size, column_size) = self.grid_extent();
        let mut grid = vec![vec![String::new(); column_size]; row_size];
        for cell in &self.cells {
            if cell.row < row_size && cell.column < column_size {
                grid[cell.row][cell.column] = cell.text();
            }
        }
        grid
    }

    /// The declared grid, or when that is oversized, the extent of the
    /// cells actually listed inside it.
    fn grid_extent(&self) -> (usize, usize) {
        let fits = |rows: usize, columns: usize| {
            rows.checked_mul(columns)
                .map_or(false, |cells| cells <= TABLE_MAX_GRID_CELLS)
        };
        if fits(self.row_size, self.column_size) {
            return (self.row_size, self.column_size);
        }

        let listed = self
            .cells
            .iter()
            .filter(|cell| cell.row < self.row_size && cell.column < self.column_size);
        let rows = listed.clone().map(|cell| cell.row + 1).max().unwrap_or(0);
        let columns = listed.map(|cell| cell.column + 1).max().unwrap_or(0);

        log::warn!(
            "Table {} declares a {}x{} grid, laying out the listed {}x{} instead",
            self.table_id,
            self.row_size,
            self.column_size,
            rows,
            columns
        );
        if fits(rows, columns) {
            (rows, columns)
        } else {
            (0, 0)
        }
    }

    /// Renders the grid as a Markdown table, first row as header.
    pub fn to_markdown(&self) -> String {
        let rows = self.rows();
        let Some((header, body)) = rows.split_first() else {
            return "| Empty Table |\n|-----------|".to_string();
        };

        let mut lines = Vec::with_capacity(rows.len() + 1);
        lines.push(format!("| {} |", header.join(" | ")));
        lines.push(format!("| {} |", vec!["---"; header.len()].join(" | ")));
        lines.extend(body.iter().map(|row| format!("| {} |", row.join(" | "))));
        lines.join("\n")
    }

    /// Texts of one column, ordered by row.
    pub fn column(&self, index: usize) -> Vec<String> {
        let mut column: Vec<(usize, String)> = self
            .cells
            .iter()
            .filter(|cell| cell.column == index)
            .map(|cell| (cell.row, cell.text()))
            .collect();
        column.sort_by_key(|(row, _)| *row);
        column.into_iter().map(|(_, text)| text).collect()
    }

    /// Grid rows matching `predicate`.
    pub fn filter_rows<F>(&self, predicate: F) -> Vec<Vec<String>>
    where
        F: Fn(&[String]) -> bool,
    {
        self.rows()
            .into_iter()
            .filter(|row| predicate(row))
            .collect()
    }
}

fn parse_cell(cell: &Value) -> TableDataCell {
    let coordinate = |axis: &str| {
        cell.get("coordinate")
            .and_then(|coordinate| coordinate.get(axis))
            .and_then(Value::as_u64)
            .unwrap_or(0) as usize
    };
    let content = cell
        .get("content")
        .cloned()
        .unwrap_or_else(|| Value::Object(Default::default()));
    let block_type = content
        .get("blockType")
        .and_then(Value::as_str)
        .unwrap_or("text")
        .to_string();

    TableDataCell {
        row: coordinate("row"),
        column: coordinate("column"),
        block_type,
        content,
    }
}
