// src/pipeline.rs
//! Pipeline capability traits for the three stages of a conversion:
//! load a saved payload, compose the requested view, deliver it.
//!
//! Each trait describes a single capability, so each stage can be tested
//! in isolation.

use crate::analytics::summarize;
use crate::api::DocumentInfo;
use crate::config::{OutputFormat, PipelineConfig};
use crate::envelope::{
    detect_response_format, normalize_blocks_with, LogObserver, NoopObserver, NormalizeObserver,
};
use crate::error::AppError;
use crate::formatting::{compose_outline, compose_plain_text, render_markdown};
use crate::model::Document;
use crate::output::OutputReport;
use serde_json::Value;

/// Produces a raw tool response.
pub trait ContentSource {
    fn load(&self) -> Result<Value, AppError>;
}

/// Turns a raw payload into the rendered output.
pub trait DocumentComposer {
    fn compose(&self, payload: Value) -> Result<String, AppError>;
}

/// Delivers rendered output to its destinations.
pub trait OutputDelivery {
    fn deliver(&self, rendered: String) -> Result<OutputReport, AppError>;
}

/// Renders `payload` in the configured output format.
///
/// Only the JSON encoding of summaries and info can fail.
pub fn compose_view(payload: Value, config: &PipelineConfig) -> Result<String, AppError> {
    let mut log_observer = LogObserver;
    let mut noop_observer = NoopObserver;
    let observer: &mut dyn NormalizeObserver = if config.trace {
        &mut log_observer
    } else {
        &mut noop_observer
    };

    let rendered = match config.format {
        OutputFormat::Format => detect_response_format(&payload).to_string(),
        OutputFormat::Info => {
            let info = DocumentInfo::parse(&payload);
            serde_json::to_string_pretty(&serde_json::json!({
                "document_id_for_blocks": info.document_id_for_blocks(),
                "info": info,
            }))?
        }
        OutputFormat::Normalized => {
            let blocks = normalize_blocks_with(payload, observer);
            serde_json::to_string_pretty(&Value::Array(blocks))?
        }
        OutputFormat::Markdown
        | OutputFormat::Text
        | OutputFormat::Outline
        | OutputFormat::Summary => {
            let document = Document::from_raw_observed(payload, observer);
            log::debug!(
                "Composing {:?} view of {} root blocks",
                config.format,
                document.blocks().len()
            );
            compose_document(&document, config)?
        }
    };
    Ok(rendered)
}

fn compose_document(document: &Document, config: &PipelineConfig) -> Result<String, AppError> {
    Ok(match config.format {
        OutputFormat::Text => compose_plain_text(document, config.render.max_depth),
        OutputFormat::Outline => compose_outline(document),
        OutputFormat::Summary => serde_json::to_string_pretty(&summarize(document))?,
        _ => render_markdown(document, &config.render),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn config(format: OutputFormat) -> PipelineConfig {
        PipelineConfig {
            format,
            ..Default::default()
        }
    }

    fn payload() -> Value {
        let blocks = json!([
            {"block_id": "h", "block_type": 3, "heading1": {"elements": [{"text_run": {"content": "Title"}}]}},
            {"block_id": "p", "block_type": 2, "text": {"elements": [{"text_run": {"content": "Hello"}}]}}
        ]);
        json!([{"type": "text", "text": blocks.to_string()}])
    }

    #[test]
    fn test_markdown_view_unwraps_envelope() {
        let rendered = compose_view(payload(), &config(OutputFormat::Markdown)).unwrap();
        assert_eq!(rendered, "# Title\n\nHello\n");
    }

    #[test]
    fn test_text_and_outline_views() {
        assert_eq!(
            compose_view(payload(), &config(OutputFormat::Text)).unwrap(),
            "Title\n\nHello"
        );
        assert_eq!(
            compose_view(payload(), &config(OutputFormat::Outline)).unwrap(),
            "1. Title"
        );
    }

    #[test]
    fn test_format_view_names_the_envelope() {
        let rendered = compose_view(payload(), &config(OutputFormat::Format)).unwrap();
        assert_eq!(rendered, detect_response_format(&payload()).to_string());
    }

    #[test]
    fn test_normalized_view_is_a_json_array() {
        let rendered = compose_view(payload(), &config(OutputFormat::Normalized)).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_summary_view_counts_blocks() {
        let rendered = compose_view(payload(), &config(OutputFormat::Summary)).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["total_blocks"], json!(2));
    }

    #[test]
    fn test_info_view_reports_block_id() {
        let info = json!({"_type": "wiki", "title": "W", "obj_token": "doxcnObj"});
        let rendered = compose_view(info, &config(OutputFormat::Info)).unwrap();
        let parsed: Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["document_id_for_blocks"], json!("doxcnObj"));
        assert_eq!(parsed["info"]["origin"], json!("wiki"));
    }
}
