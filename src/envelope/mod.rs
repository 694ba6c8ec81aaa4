// src/envelope/mod.rs
//! Envelope normalization for "get document blocks" responses.
//!
//! The tool-calling layer in front of the Feishu API does not return blocks
//! in one shape. Depending on the transport the payload is:
//!
//! 1. a plain array of block objects,
//! 2. a one-element array whose only element is `{"text": "<JSON array>"}`,
//! 3. the same envelope with trailing non-JSON text after the array.
//!
//! [`normalize_blocks`] turns any of these into the flat block sequence and
//! never fails. Anything it cannot repair comes back unchanged (or empty,
//! when the payload is not a sequence at all).

mod extract;
mod observer;

pub use extract::extract_json_array;
pub use observer::{
    LogObserver, NoopObserver, NormalizeEvent, NormalizeObserver, RecordingObserver,
};

use observer::preview;

use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Shape of a raw response, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseFormat {
    UnknownNotList,
    EmptyList,
    NormalBlockArray,
    WrappedJsonInText,
    WrappedTextWithHints,
    SingleDictWithoutText,
    SingleNonDict,
    MultiItemUnknownFormat,
}

impl ResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::UnknownNotList => "UNKNOWN_NOT_LIST",
            ResponseFormat::EmptyList => "EMPTY_LIST",
            ResponseFormat::NormalBlockArray => "NORMAL_BLOCK_ARRAY",
            ResponseFormat::WrappedJsonInText => "WRAPPED_JSON_IN_TEXT",
            ResponseFormat::WrappedTextWithHints => "WRAPPED_TEXT_WITH_HINTS",
            ResponseFormat::SingleDictWithoutText => "SINGLE_DICT_WITHOUT_TEXT",
            ResponseFormat::SingleNonDict => "SINGLE_NON_DICT",
            ResponseFormat::MultiItemUnknownFormat => "MULTI_ITEM_UNKNOWN_FORMAT",
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a raw payload without modifying it.
pub fn detect_response_format(raw: &Value) -> ResponseFormat {
    let Some(items) = raw.as_array() else {
        return ResponseFormat::UnknownNotList;
    };
    let Some(first) = items.first() else {
        return ResponseFormat::EmptyList;
    };

    if let Some(object) = first.as_object() {
        if object.contains_key("block_id") || object.contains_key("block_type") {
            return ResponseFormat::NormalBlockArray;
        }
    }

    if items.len() > 1 {
        return ResponseFormat::MultiItemUnknownFormat;
    }

    match first {
        Value::Object(object) => match object.get("text") {
            Some(Value::String(text)) if text.starts_with('[') => {
                ResponseFormat::WrappedJsonInText
            }
            Some(Value::String(_)) => ResponseFormat::WrappedTextWithHints,
            _ => ResponseFormat::SingleDictWithoutText,
        },
        _ => ResponseFormat::SingleNonDict,
    }
}

/// Normalizes a raw payload into a block sequence.
pub fn normalize_blocks(raw: Value) -> Vec<Value> {
    normalize_blocks_with(raw, &mut NoopObserver)
}

/// As [`normalize_blocks`], reporting each decision to `observer`.
pub fn normalize_blocks_with(raw: Value, observer: &mut dyn NormalizeObserver) -> Vec<Value> {
    observer.observe(NormalizeEvent::FormatDetected(detect_response_format(&raw)));

    let items = match raw {
        Value::Array(items) => items,
        other => {
            observer.observe(NormalizeEvent::NotASequence {
                json_type: json_type_name(&other),
            });
            return Vec::new();
        }
    };

    if let [single] = items.as_slice() {
        if let Some(text) = single.get("text").and_then(Value::as_str) {
            if let Some(blocks) = unwrap_envelope(text, observer) {
                return blocks;
            }
        }
    }

    observer.observe(NormalizeEvent::PassedThrough { items: items.len() });
    items
}

/// Parses JSON text with no nesting limit.
///
/// Embedded children nest one object and one array per level, so serde_json's
/// default recursion limit would reject documents past roughly 64 levels.
/// Depth is bounded later by the walker's `max_depth` instead.
pub fn parse_json(text: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(text);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

/// Decodes the `text` of an envelope, falling back to bracket extraction.
fn unwrap_envelope(text: &str, observer: &mut dyn NormalizeObserver) -> Option<Vec<Value>> {
    match parse_json(text) {
        Ok(parsed) => return decoded_array(parsed, false, observer),
        Err(err) => observer.observe(NormalizeEvent::DirectParseFailed {
            reason: err.to_string(),
        }),
    }

    let Some(prefix) = extract_json_array(text) else {
        observer.observe(NormalizeEvent::ExtractionFailed {
            text_length: text.len(),
            preview: preview(text),
        });
        return None;
    };
    observer.observe(NormalizeEvent::PrefixExtracted {
        length: prefix.len(),
    });

    match parse_json(prefix) {
        Ok(parsed) => decoded_array(parsed, true, observer),
        Err(err) => {
            observer.observe(NormalizeEvent::ExtractedParseFailed {
                reason: err.to_string(),
            });
            None
        }
    }
}

fn decoded_array(
    parsed: Value,
    extracted: bool,
    observer: &mut dyn NormalizeObserver,
) -> Option<Vec<Value>> {
    match parsed {
        Value::Array(blocks) => {
            observer.observe(NormalizeEvent::EnvelopeDecoded {
                blocks: blocks.len(),
                extracted,
            });
            Some(blocks)
        }
        other => {
            observer.observe(NormalizeEvent::EnvelopeNotArray {
                json_type: json_type_name(&other),
                extracted,
            });
            None
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_flat_array_is_unchanged() {
        let raw = json!([
            {"block_id": "a", "block_type": 1},
            {"block_id": "b", "block_type": 2}
        ]);
        let expected = raw.as_array().unwrap().clone();
        assert_eq!(normalize_blocks(raw), expected);
    }

    #[test]
    fn test_non_sequence_becomes_empty() {
        assert!(normalize_blocks(json!({"block_id": "a"})).is_empty());
        assert!(normalize_blocks(json!("text")).is_empty());
        assert!(normalize_blocks(Value::Null).is_empty());
    }

    #[test]
    fn test_envelope_is_unwrapped() {
        let blocks = json!([{"block_id": "a"}, {"block_id": "b"}]);
        let raw = json!([{ "text": blocks.to_string() }]);
        assert_eq!(normalize_blocks(raw), blocks.as_array().unwrap().clone());
    }

    #[test]
    fn test_trailing_text_is_cut_off() {
        let raw = json!([{ "text": "[{\"block_id\":\"a\",\"block_type\":2}]EXTRA TEXT" }]);
        assert_eq!(
            normalize_blocks(raw),
            vec![json!({"block_id": "a", "block_type": 2})]
        );
    }

    #[test]
    fn test_unrepairable_envelope_passes_through() {
        let raw = json!([{ "text": "no json here" }]);
        assert_eq!(normalize_blocks(raw.clone()), raw.as_array().unwrap().clone());

        let object_text = json!([{ "text": "{\"a\": 1}" }]);
        assert_eq!(
            normalize_blocks(object_text.clone()),
            object_text.as_array().unwrap().clone()
        );
    }

    #[test]
    fn test_single_block_without_text_string_is_unchanged() {
        let raw = json!([{"block_id": "a", "text": {"elements": []}}]);
        assert_eq!(normalize_blocks(raw.clone()), raw.as_array().unwrap().clone());
    }

    #[test]
    fn test_observer_sees_extraction_path() {
        let mut observer = RecordingObserver::default();
        let raw = json!([{ "text": "[1]tail" }]);
        let blocks = normalize_blocks_with(raw, &mut observer);

        assert_eq!(blocks, vec![json!(1)]);
        assert_eq!(observer.events.len(), 4);
        assert_eq!(
            observer.events[0],
            NormalizeEvent::FormatDetected(ResponseFormat::WrappedJsonInText)
        );
        assert!(matches!(
            observer.events[1],
            NormalizeEvent::DirectParseFailed { .. }
        ));
        assert_eq!(observer.events[2], NormalizeEvent::PrefixExtracted { length: 3 });
        assert_eq!(
            observer.events[3],
            NormalizeEvent::EnvelopeDecoded {
                blocks: 1,
                extracted: true
            }
        );
    }

    fn embedded_chain(levels: usize) -> Value {
        let mut block = json!({"block_id": format!("n{}", levels - 1), "block_type": 2});
        for level in (0..levels - 1).rev() {
            block = json!({
                "block_id": format!("n{}", level),
                "block_type": 2,
                "children": [block]
            });
        }
        block
    }

    #[test]
    fn test_deeply_nested_envelope_is_decoded() {
        let document = json!([embedded_chain(80)]);
        let raw = json!([{ "text": document.to_string() }]);

        let blocks = normalize_blocks(raw);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0]["block_id"], "n0");
    }

    #[test]
    fn test_deeply_nested_envelope_with_trailing_text() {
        let document = json!([embedded_chain(80)]);
        let raw = json!([{ "text": format!("{} (truncated)", document) }]);

        let blocks = normalize_blocks(raw);
        assert_eq!(blocks[0]["block_id"], "n0");
    }

    #[test]
    fn test_parse_json_rejects_trailing_characters() {
        assert!(parse_json("[1] tail").is_err());
        assert_eq!(parse_json(" [1] ").unwrap(), json!([1]));
    }

    #[test]
    fn test_detect_response_format() {
        let cases = [
            (json!({}), ResponseFormat::UnknownNotList),
            (json!([]), ResponseFormat::EmptyList),
            (json!([{"block_type": 2}]), ResponseFormat::NormalBlockArray),
            (json!([{"text": "[{}]"}]), ResponseFormat::WrappedJsonInText),
            (json!([{"text": "hint"}]), ResponseFormat::WrappedTextWithHints),
            (json!([{"other": 1}]), ResponseFormat::SingleDictWithoutText),
            (json!([3]), ResponseFormat::SingleNonDict),
            (json!([1, 2]), ResponseFormat::MultiItemUnknownFormat),
        ];
        for (raw, expected) in cases {
            assert_eq!(detect_response_format(&raw), expected, "payload {}", raw);
        }
    }
}
