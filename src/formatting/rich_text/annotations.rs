// src/formatting/rich_text/annotations.rs
//! Style processing for rich text runs.
//!
//! Feishu styles map onto a mix of Markdown and inline HTML. Markdown has no
//! underline or color, so those come out as `<u>` and `<span>` tags.

use crate::model::{TextElementStyle, TextRun};

/// The resolved style of one text run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Option<String>,
    pub background: Option<String>,
    pub link: Option<String>,
}

impl TextStyle {
    pub fn has_styling(&self) -> bool {
        self.bold
            || self.italic
            || self.strikethrough
            || self.underline
            || self.code
            || self.color.is_some()
            || self.background.is_some()
            || self.link.is_some()
    }
}

/// Converts the wire style of a run into a [`TextStyle`].
pub fn run_style(run: &TextRun) -> TextStyle {
    let TextElementStyle {
        bold,
        italic,
        strikethrough,
        underline,
        code,
        color,
        background,
        ..
    } = &run.text_element_style;

    TextStyle {
        bold: *bold,
        italic: *italic,
        strikethrough: *strikethrough,
        underline: *underline,
        code: *code,
        color: color.as_ref().filter(|c| c.is_set()).map(ToString::to_string),
        background: background
            .as_ref()
            .filter(|c| c.is_set())
            .map(ToString::to_string),
        link: run.link_url().map(str::to_string),
    }
}

/// Renderer for text styles to Markdown.
pub struct MarkdownStyleRenderer;

impl MarkdownStyleRenderer {
    /// Applies styles to text content, innermost first.
    ///
    /// The link wraps the bare content, then strikethrough, underline,
    /// italic, bold and code wrap in that order. Colors go outermost as a
    /// `<span>` carrying only the declarations that are set.
    pub fn apply_styles(content: &str, style: &TextStyle) -> String {
        if !style.has_styling() {
            return content.to_string();
        }

        let mut result = match &style.link {
            Some(url) => format!("[{}]({})", content, url),
            None => content.to_string(),
        };

        if style.strikethrough {
            result = format!("~~{}~~", result);
        }

        if style.underline {
            result = format!("<u>{}</u>", result);
        }

        if style.italic {
            result = format!("*{}*", result);
        }

        if style.bold {
            result = format!("**{}**", result);
        }

        if style.code {
            result = format!("`{}`", result);
        }

        if style.color.is_some() || style.background.is_some() {
            let declarations: Vec<String> = [
                style.color.as_ref().map(|c| format!("color:{}", c)),
                style
                    .background
                    .as_ref()
                    .map(|b| format!("background-color:{}", b)),
            ]
            .into_iter()
            .flatten()
            .collect();
            result = format!("<span style=\"{}\">{}</span>", declarations.join(";"), result);
        }

        result
    }
}
