use super::{optional_string, string_field};
use crate::types::DocumentId;
use serde::Serialize;
use serde_json::Value;

/// Where a document lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentOrigin {
    Document,
    Wiki,
}

/// Parsed "get document info" response.
///
/// Wiki nodes answer with a flat object marked `"_type": "wiki"` whose
/// blocks live under `obj_token`; plain documents nest their fields under
/// `document`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentInfo {
    pub document_id: DocumentId,
    pub title: String,
    pub origin: DocumentOrigin,
    pub obj_token: Option<String>,
    pub node_token: Option<String>,
    pub space_id: Option<String>,
}

impl DocumentInfo {
    pub fn parse(response: &Value) -> Self {
        let is_wiki = response.get("_type").and_then(Value::as_str) == Some("wiki");

        if is_wiki {
            let document_id = optional_string(response, "documentId")
                .or_else(|| optional_string(response, "obj_token"))
                .unwrap_or_default();

            return Self {
                document_id: DocumentId::new(document_id),
                title: string_field(response, "title"),
                origin: DocumentOrigin::Wiki,
                obj_token: optional_string(response, "obj_token"),
                node_token: optional_string(response, "node_token"),
                space_id: optional_string(response, "space_id"),
            };
        }

        let document = response
            .get("document")
            .filter(|document| document.is_object())
            .unwrap_or(response);

        Self {
            document_id: DocumentId::new(string_field(document, "document_id")),
            title: string_field(document, "title"),
            origin: DocumentOrigin::Document,
            obj_token: None,
            node_token: None,
            space_id: None,
        }
    }

    /// The id to request blocks with: the `obj_token` of a wiki node,
    /// otherwise the document id.
    pub fn document_id_for_blocks(&self) -> DocumentId {
        match (&self.origin, self.obj_token.as_deref()) {
            (DocumentOrigin::Wiki, Some(token)) if !token.is_empty() => DocumentId::new(token),
            _ => self.document_id.clone(),
        }
    }
}

/// Shortcut for [`DocumentInfo::document_id_for_blocks`] on a raw response.
pub fn document_id_for_blocks(response: &Value) -> DocumentId {
    DocumentInfo::parse(response).document_id_for_blocks()
}
