// src/formatting/markdown.rs
//! Emits Markdown from render items.

use super::render_items::RenderItem;
use crate::constants::CHARS_PER_LINE_ESTIMATE;

/// Renders items to Markdown, one or more lines per item, joined by `\n`.
pub fn emit_markdown(items: &[RenderItem]) -> String {
    let mut lines: Vec<String> = Vec::with_capacity(items.len() * 2);

    for item in items {
        match item {
            RenderItem::Skip => {}
            RenderItem::Paragraph(text) => {
                if !text.is_empty() {
                    lines.push(text.clone());
                    lines.push(String::new());
                }
            }
            RenderItem::Heading { level, text } => {
                let level = usize::from((*level).max(1));
                lines.push(format!("{} {}", "#".repeat(level), text));
                lines.push(String::new());
            }
            RenderItem::Bullet(text) => lines.push(format!("- {}", text)),
            RenderItem::Ordered { ordinal, text } => {
                lines.push(format!("{}. {}", ordinal.unwrap_or(1), text))
            }
            RenderItem::Todo { checked, text } => {
                let mark = if *checked { "x" } else { " " };
                lines.push(format!("- [{}] {}", mark, text));
            }
            RenderItem::Code(text) => {
                lines.push("```".to_string());
                lines.push(text.clone());
                lines.push("```".to_string());
                lines.push(String::new());
            }
            RenderItem::Quote(text) | RenderItem::Callout(text) => {
                lines.push(format!("> {}", text));
                lines.push(String::new());
            }
            RenderItem::Divider => {
                lines.push("---".to_string());
                lines.push(String::new());
            }
            RenderItem::Image(text) => {
                if text.is_empty() {
                    lines.push("[Image]".to_string());
                } else {
                    lines.push(format!("[Image: {}]", text));
                }
                lines.push(String::new());
            }
            RenderItem::Table(text) | RenderItem::Whiteboard(text) => {
                lines.push(text.clone());
                lines.push(String::new());
            }
            RenderItem::Blank => lines.push(String::new()),
        }
    }

    let mut output = String::with_capacity(lines.len() * CHARS_PER_LINE_ESTIMATE);
    for (index, line) in lines.iter().enumerate() {
        if index > 0 {
            output.push('\n');
        }
        output.push_str(line);
    }
    output
}
