//! Error-or-value response checks shared by every Feishu tool.

use super::error_message;
use serde_json::Value;

/// Outcome of checking a tool response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseCheck {
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl ResponseCheck {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// A one-line summary for display.
    pub fn help(&self) -> String {
        match &self.error {
            Some(error) => format!("Error: {}", error),
            None => "Response is valid".to_string(),
        }
    }
}

/// Keys a successful response of `tool` is expected to carry.
pub fn expected_keys(tool: &str) -> &'static [&'static str] {
    match tool {
        // Document and wiki info differ; only the title is shared.
        "get_feishu_document_info" => &["title"],
        "get_feishu_document_blocks" => &["blocks"],
        "search_feishu_documents" => &["items"],
        "get_feishu_root_folder_info" => &["root_folder", "wiki_spaces", "my_library"],
        "get_feishu_folder_files" => &["items"],
        "create_feishu_document" => &["document_id", "url", "title"],
        "create_feishu_folder" => &["token", "url"],
        "batch_create_feishu_blocks" => &["blocks"],
        "create_feishu_table" => &["table_id"],
        "get_feishu_whiteboard_content" => &["elements"],
        _ => &[],
    }
}

/// Finds the error a response carries, if any.
///
/// Looks at `null` responses, a top-level `error`, an `error` inside any
/// object value, and an `error` inside any object in an array value, in
/// that order.
pub fn extract_error(response: &Value) -> Option<String> {
    let object = match response {
        Value::Null => return Some("Response is None".to_string()),
        Value::Object(object) => object,
        _ => return None,
    };

    if let Some(error) = object.get("error") {
        return error_message(error);
    }

    for value in object.values() {
        match value {
            Value::Object(nested) => {
                if let Some(error) = nested.get("error") {
                    return error_message(error);
                }
            }
            Value::Array(items) => {
                if let Some(error) = items.iter().find_map(|item| item.get("error")) {
                    return error_message(error);
                }
            }
            _ => {}
        }
    }

    None
}

/// Checks a response for errors and, when `tool` is known, for missing keys.
pub fn check_response(response: &Value, tool: Option<&str>) -> ResponseCheck {
    if let Some(error) = extract_error(response) {
        log::warn!("Tool response carries an error: {}", error);
        return ResponseCheck {
            error: Some(error),
            warnings: Vec::new(),
        };
    }

    let mut check = ResponseCheck::default();
    let Some(tool) = tool else {
        return check;
    };

    let missing: Vec<&str> = expected_keys(tool)
        .iter()
        .copied()
        .filter(|key| response.get(*key).is_none())
        .collect();

    if !missing.is_empty() {
        log::debug!("{} response is missing {:?}", tool, missing);
        check
            .warnings
            .push(format!("Missing expected keys: {}", missing.join(", ")));
    }

    check
}
