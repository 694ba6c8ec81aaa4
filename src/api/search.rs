use super::{optional_string, string_field};
use serde::Serialize;
use serde_json::Value;

/// Source of a search hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HitKind {
    Document,
    Wiki,
}

impl HitKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HitKind::Document => "document",
            HitKind::Wiki => "wiki",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            HitKind::Document => "📄",
            HitKind::Wiki => "📚",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub kind: HitKind,
    pub owner: String,
    pub node_token: Option<String>,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub items: Vec<SearchHit>,
    pub has_more: bool,
    pub page_token: Option<String>,
}

impl SearchResults {
    /// Reads a search response: document hits under `data.items`, wiki hits
    /// under `items`.
    pub fn parse(response: &Value) -> Self {
        let documents = hit_items(response.get("data").and_then(|data| data.get("items")))
            .iter()
            .map(|item| SearchHit {
                title: string_field(item, "title"),
                url: string_field(item, "url"),
                kind: HitKind::Document,
                owner: string_field(item, "owner"),
                node_token: None,
            });

        let wikis = hit_items(response.get("items")).iter().map(|item| SearchHit {
            title: string_field(item, "title"),
            url: string_field(item, "url"),
            kind: HitKind::Wiki,
            owner: string_field(item, "owner"),
            node_token: optional_string(item, "node_token"),
        });

        Self {
            items: documents.chain(wikis).collect(),
            has_more: response
                .get("has_more")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            page_token: optional_string(response, "page_token"),
        }
    }

    pub fn total_count(&self) -> usize {
        self.items.len()
    }

    /// The token for the next page, when there is one.
    pub fn next_page_token(&self) -> Option<&str> {
        self.page_token
            .as_deref()
            .filter(|token| self.has_more && !token.is_empty())
    }

    /// Renders the hits as a readable listing.
    pub fn format(&self, show_numbers: bool) -> String {
        if self.items.is_empty() {
            return "No results found.".to_string();
        }

        let mut lines = vec![format!("Found {} result(s):\n", self.total_count())];

        for (index, hit) in self.items.iter().enumerate() {
            let prefix = if show_numbers {
                format!("{}. ", index + 1)
            } else {
                String::new()
            };
            lines.push(format!("{}{} **{}**", prefix, hit.kind.icon(), hit.title));
            lines.push(format!("   Type: {}", hit.kind.as_str()));
            lines.push(format!("   URL: {}", hit.url));
            if !hit.owner.is_empty() {
                lines.push(format!("   Owner: {}", hit.owner));
            }
            lines.push(String::new());
        }

        if self.has_more {
            lines.push("(More results available - use page_token to get next page)".to_string());
        }

        lines.join("\n")
    }
}

fn hit_items(items: Option<&Value>) -> &[Value] {
    items
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
