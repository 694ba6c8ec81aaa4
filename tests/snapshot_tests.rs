// tests/snapshot_tests.rs
//! Behavioral tests for the normalization and rendering pipeline, driven
//! through the public API only.

use feishu2md::{
    blocks_to_markdown, extract_json_array, heading_level, merge_lists, normalize_blocks,
    normalize_blocks_with, render_markdown, render_table, walk, Document, MergePolicy,
    NormalizeEvent, RecordingObserver, RenderConfig, RenderItem, TableStyle, WalkOptions,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn rich(content: &str) -> Value {
    json!({"elements": [{"text_run": {"content": content}}]})
}

fn text_block(id: &str, content: &str) -> Value {
    json!({"block_id": id, "block_type": 2, "text": rich(content)})
}

#[test]
fn flat_block_arrays_pass_through_unchanged() {
    let blocks = json!([text_block("a", "one"), text_block("b", "two")]);
    let expected = blocks.as_array().cloned().unwrap_or_default();

    assert_eq!(normalize_blocks(blocks.clone()), expected);
    assert_eq!(normalize_blocks(Value::Array(expected.clone())), expected);
}

#[test]
fn text_envelope_round_trips() {
    let blocks = vec![text_block("a", "one"), text_block("b", "two"), text_block("c", "three")];
    let envelope = json!([{"type": "text", "text": Value::Array(blocks.clone()).to_string()}]);

    let mut observer = RecordingObserver::default();
    assert_eq!(normalize_blocks_with(envelope, &mut observer), blocks);
    assert!(observer.events.contains(&NormalizeEvent::EnvelopeDecoded {
        blocks: 3,
        extracted: false
    }));
}

#[test]
fn bracket_extraction_drops_trailing_text() {
    let text = r#"[{"block_id":"a","block_type":2}]EXTRA TEXT"#;
    assert_eq!(
        extract_json_array(text),
        Some(r#"[{"block_id":"a","block_type":2}]"#)
    );

    let normalized = normalize_blocks(json!([{"text": text}]));
    assert_eq!(normalized, vec![json!({"block_id": "a", "block_type": 2})]);
}

#[test]
fn bracket_inside_string_does_not_end_extraction() {
    let text = r#"[{"block_id":"a","text":"x]y \"q\" ]"}] tail"#;
    assert_eq!(
        extract_json_array(text),
        Some(r#"[{"block_id":"a","text":"x]y \"q\" ]"}]"#)
    );
}

#[test]
fn unparseable_envelope_is_passed_through() {
    let raw = json!([{"text": "no array here"}]);
    let mut observer = RecordingObserver::default();

    let expected = raw.as_array().cloned().unwrap_or_default();
    assert_eq!(normalize_blocks_with(raw, &mut observer), expected);
    assert!(observer
        .events
        .iter()
        .any(|event| matches!(event, NormalizeEvent::ExtractionFailed { .. })));
}

#[test]
fn non_sequences_normalize_to_nothing() {
    assert!(normalize_blocks(json!({"blocks": []})).is_empty());
    assert!(normalize_blocks(json!("text")).is_empty());
    assert_eq!(blocks_to_markdown(Value::Null), "");
}

#[test]
fn heading_levels_follow_type_codes() {
    assert_eq!(heading_level(3), Some(1));
    assert_eq!(heading_level(11), Some(9));
    assert_eq!(heading_level(2), None);
    assert_eq!(heading_level(12), None);
}

#[test]
fn ordered_numbering_restarts_after_a_bullet() {
    let document = Document::from_values(&[
        json!({"block_id": "1", "block_type": 13, "text": rich("a")}),
        json!({"block_id": "2", "block_type": 13, "text": rich("b")}),
        json!({"block_id": "3", "block_type": 13, "text": rich("c")}),
        json!({"block_id": "4", "block_type": 12, "bullet": rich("x")}),
        json!({"block_id": "5", "block_type": 13, "text": rich("d")}),
    ]);

    insta::assert_snapshot!(render_markdown(&document, &RenderConfig::default()), @r###"
    1. a
    2. b
    3. c
    - x
    1. d
    "###);
}

#[test]
fn merging_never_drops_items() {
    let items = vec![
        RenderItem::Bullet("a".to_string()),
        RenderItem::Paragraph("p".to_string()),
        RenderItem::Todo {
            checked: false,
            text: "t".to_string(),
        },
    ];
    let merged = merge_lists(items.clone(), MergePolicy::default());

    assert!(merged.len() >= items.len());
    let kept: Vec<&RenderItem> = merged
        .iter()
        .filter(|item| **item != RenderItem::Blank)
        .collect();
    assert_eq!(kept, items.iter().collect::<Vec<_>>());
}

fn table_document(row_size: u64, column_size: u64, cells: Value, extra: Vec<Value>) -> Document {
    let mut values = vec![json!({
        "block_id": "tbl",
        "block_type": 31,
        "table": {"property": {"row_size": row_size, "column_size": column_size}, "cells": cells}
    })];
    values.extend(extra);
    Document::from_values(&values)
}

#[test]
fn pipes_in_cells_are_escaped() {
    let document = table_document(
        1,
        1,
        json!(["c"]),
        vec![
            json!({"block_id": "c", "block_type": 32, "children": ["t"]}),
            text_block("t", "a|b"),
        ],
    );

    assert_eq!(
        render_table("tbl", &document.block_map(), TableStyle::Styled),
        "| a\\|b |\n| --- |"
    );
}

#[test]
fn empty_tables_render_a_placeholder() {
    let no_rows = table_document(0, 3, json!([]), Vec::new());
    let no_columns = table_document(2, 0, json!([]), Vec::new());

    assert_eq!(
        render_table("tbl", &no_rows.block_map(), TableStyle::Styled),
        "[Table: empty table]"
    );
    assert_eq!(
        render_table("tbl", &no_columns.block_map(), TableStyle::Plain),
        "[Table: empty table]"
    );
}

#[test]
fn short_cell_lists_pad_with_empty_cells() {
    let document = table_document(
        2,
        2,
        json!(["c"]),
        vec![
            json!({"block_id": "c", "block_type": 32, "children": ["t"]}),
            text_block("t", "only"),
        ],
    );

    insta::assert_snapshot!(render_table("tbl", &document.block_map(), TableStyle::Plain), @r###"
    | only |  |
    | --- | --- |
    |  |  |
    "###);
}

#[test]
fn depth_guard_truncates_silently() {
    // Five levels of embedded nesting.
    let mut block = text_block("leaf", "leaf");
    for depth in (0..4).rev() {
        block = json!({
            "block_id": format!("n{}", depth),
            "block_type": 2,
            "text": rich(&format!("level {}", depth)),
            "children": [block]
        });
    }
    let document = Document::from_values(&[block]);

    let options = WalkOptions {
        max_depth: 2,
        skip_table_cells: false,
    };
    let visited: Vec<String> = walk(&document, options).map(|info| info.text).collect();
    assert_eq!(visited, vec!["level 0", "level 1", "level 2"]);

    let config = RenderConfig {
        max_depth: 2,
        ..Default::default()
    };
    assert_eq!(
        render_markdown(&document, &config),
        "level 0\n\nlevel 1\n\nlevel 2\n"
    );
}

#[test]
fn deep_envelope_renders_up_to_the_depth_limit() {
    let mut block = text_block("n119", "level 119");
    for depth in (0..119).rev() {
        block = json!({
            "block_id": format!("n{}", depth),
            "block_type": 2,
            "text": rich(&format!("level {}", depth)),
            "children": [block]
        });
    }
    let envelope = json!([{"type": "text", "text": json!([block]).to_string()}]);

    let markdown = blocks_to_markdown(envelope);
    assert!(markdown.starts_with("level 0\n\nlevel 1\n\n"));
    assert!(markdown.contains("level 100\n"));
    assert!(!markdown.contains("level 101"));
}

#[test]
fn stacked_styles_nest_in_order() {
    let raw = json!([{
        "block_id": "p",
        "block_type": 2,
        "text": {"elements": [{"text_run": {
            "content": "content",
            "text_element_style": {"bold": true, "italic": true, "inline_code": true}
        }}]}
    }]);

    assert_eq!(blocks_to_markdown(raw), "`***content***`\n");
}

#[test]
fn title_and_paragraph_end_to_end() {
    let raw = json!([
        {"block_id": "h", "block_type": 3, "heading1": rich("Title")},
        text_block("p", "Hello")
    ]);

    assert_eq!(blocks_to_markdown(raw), "# Title\n\nHello\n");
}

#[test]
fn mistyped_styles_never_drop_text() {
    let raw = json!([{
        "block_id": "p",
        "block_type": 2,
        "text": {"elements": [
            {"text_run": {"content": "kept", "text_element_style": {"bold": 1}}},
            {"text_run": {"content": " x", "text_element_style": {"text_color": true}}}
        ]}
    }]);

    assert_eq!(blocks_to_markdown(raw), "**kept** x\n");
}

#[test]
fn mentions_and_links_render_inline() {
    let raw = json!([{
        "block_id": "p",
        "block_type": 2,
        "text": {"elements": [
            {"text_run": {"content": "See "}},
            {"inline_component": {"type": "mention_doc", "title": "Roadmap", "url": "https://feishu.cn/docx/s"}},
            {"text_run": {"content": " and ", "text_element_style": {"link": {"url": "https://example.com"}}}},
            {"inline_component": {"type": "user"}}
        ]}
    }]);

    assert_eq!(
        blocks_to_markdown(raw),
        "See [Roadmap](https://feishu.cn/docx/s)[ and ](https://example.com)`@user`\n"
    );
}
