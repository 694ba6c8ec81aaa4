use super::{error_message, string_field};
use serde::Serialize;
use serde_json::Value;

/// What a creation tool made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatedItem {
    Document,
    Folder,
    Block,
    Table,
}

impl CreatedItem {
    pub fn as_str(&self) -> &'static str {
        match self {
            CreatedItem::Document => "document",
            CreatedItem::Folder => "folder",
            CreatedItem::Block => "block",
            CreatedItem::Table => "table",
        }
    }

    fn display_name(&self) -> &'static str {
        match self {
            CreatedItem::Document => "Document",
            CreatedItem::Folder => "Folder",
            CreatedItem::Block => "Content block",
            CreatedItem::Table => "Table",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CreationOutcome {
    Created {
        item_id: String,
        url: Option<String>,
        title: Option<String>,
    },
    Failed {
        error: String,
    },
}

/// Parsed response of a creation tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationResult {
    pub item: CreatedItem,
    pub outcome: CreationOutcome,
}

impl CreationResult {
    /// Reads the response of the tool that creates `item`.
    ///
    /// Any top-level `error` key marks the creation as failed.
    pub fn parse(item: CreatedItem, response: &Value) -> Self {
        if let Some(error) = response.get("error") {
            let error = error_message(error).unwrap_or_else(|| "unknown error".to_string());
            return Self {
                item,
                outcome: CreationOutcome::Failed { error },
            };
        }

        let non_empty = |key: &str| Some(string_field(response, key)).filter(|s| !s.is_empty());

        let outcome = match item {
            CreatedItem::Document => CreationOutcome::Created {
                item_id: string_field(response, "document_id"),
                url: non_empty("url"),
                title: non_empty("title"),
            },
            CreatedItem::Folder => CreationOutcome::Created {
                item_id: string_field(response, "token"),
                url: non_empty("url"),
                title: None,
            },
            CreatedItem::Block => CreationOutcome::Created {
                // The first created block stands for the batch.
                item_id: response
                    .get("blocks")
                    .and_then(Value::as_array)
                    .and_then(|blocks| blocks.first())
                    .map(|block| string_field(block, "block_id"))
                    .unwrap_or_default(),
                url: None,
                title: None,
            },
            CreatedItem::Table => CreationOutcome::Created {
                item_id: string_field(response, "table_id"),
                url: None,
                title: None,
            },
        };

        Self { item, outcome }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CreationOutcome::Created { .. })
    }

    /// The created item's id, `None` when creation failed.
    pub fn item_id(&self) -> Option<&str> {
        match &self.outcome {
            CreationOutcome::Created { item_id, .. } => Some(item_id),
            CreationOutcome::Failed { .. } => None,
        }
    }

    /// A user-facing success or failure message.
    pub fn message(&self) -> String {
        match &self.outcome {
            CreationOutcome::Failed { error } => {
                format!("❌ Failed to create {}: {}", self.item.as_str(), error)
            }
            CreationOutcome::Created {
                item_id,
                url,
                title,
            } => {
                let mut lines = vec![format!(
                    "✅ {} created successfully!",
                    self.item.display_name()
                )];
                if let Some(title) = title {
                    lines.push(format!("Title: {}", title));
                }
                lines.push(format!("ID: {}", item_id));
                if let Some(url) = url {
                    lines.push(format!("URL: {}", url));
                }
                lines.join("\n")
            }
        }
    }
}
