// src/formatting/rich_text/mod.rs
//! Handles formatting of Feishu rich text into Markdown and plain text.
//!
//! Each element renders on its own and the results are concatenated with no
//! separator. The Markdown variant keeps styling, links and mentions; the
//! plain variant keeps only run contents and drops struck-through runs.

mod annotations;

pub use annotations::{run_style, MarkdownStyleRenderer, TextStyle};

use crate::constants::USER_MENTION_FALLBACK;
use crate::model::{RichText, TextElement};

/// Formats rich text into Markdown.
pub fn rich_text_to_markdown(text: &RichText) -> String {
    let mut output = String::new();
    for element in &text.elements {
        if let Some(rendered) = render_element(element) {
            output.push_str(&rendered);
        }
    }
    output
}

/// Concatenates run contents, skipping struck-through runs.
pub fn rich_text_to_plain(text: &RichText) -> String {
    text.elements
        .iter()
        .filter_map(|element| element.text_run.as_ref())
        .filter(|run| !run.text_element_style.strikethrough)
        .map(|run| run.content.as_str())
        .collect()
}

/// Renders one element, `None` when it contributes nothing.
fn render_element(element: &TextElement) -> Option<String> {
    let content = element.content();
    if content.is_empty() {
        return render_inline_component(element);
    }

    let style = element
        .text_run
        .as_ref()
        .map(run_style)
        .unwrap_or_default();
    Some(MarkdownStyleRenderer::apply_styles(content, &style))
}

/// Mentions carried by elements without run content.
fn render_inline_component(element: &TextElement) -> Option<String> {
    let component = element.inline_component.as_ref()?;

    if component.is_document_mention() {
        if component.raw_url.is_empty() {
            return None;
        }
        return Some(format!("[{}]({})", component.title, component.raw_url));
    }

    if component.is_user_mention() {
        return Some(format!("`{}`", USER_MENTION_FALLBACK));
    }

    log::debug!("Skipping inline component of type {:?}", component.kind);
    None
}
