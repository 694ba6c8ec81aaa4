// benches/rendering_bench.rs
//! Benchmarks for envelope normalization and Markdown rendering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use feishu2md::{normalize_blocks, render_markdown, summarize, Document, RenderConfig};
use serde_json::{json, Value};

/// A flat block array of `sections` headings, each followed by a paragraph,
/// a three-item list and a 3x3 table.
fn sample_blocks(sections: usize) -> Vec<Value> {
    let rich = |content: String| json!({"elements": [{"text_run": {"content": content}}]});
    let mut blocks = Vec::with_capacity(sections * 20);

    for section in 0..sections {
        blocks.push(json!({
            "block_id": format!("h{}", section),
            "block_type": 4,
            "heading2": rich(format!("Section {}", section)),
        }));
        blocks.push(json!({
            "block_id": format!("p{}", section),
            "block_type": 2,
            "text": {"elements": [
                {"text_run": {"content": "Plain and "}},
                {"text_run": {"content": "bold", "text_element_style": {"bold": true}}}
            ]},
        }));
        for item in 0..3 {
            blocks.push(json!({
                "block_id": format!("o{}_{}", section, item),
                "block_type": 13,
                "text": rich(format!("Step {}", item)),
            }));
        }

        let cells: Vec<String> = (0..9).map(|i| format!("c{}_{}", section, i)).collect();
        blocks.push(json!({
            "block_id": format!("t{}", section),
            "block_type": 31,
            "table": {"property": {"row_size": 3, "column_size": 3}, "cells": cells},
            "children": cells,
        }));
        for (i, cell) in cells.iter().enumerate() {
            let text_id = format!("{}_t", cell);
            blocks.push(json!({"block_id": cell, "block_type": 32, "children": [text_id]}));
            blocks.push(json!({"block_id": text_id, "block_type": 2, "text": rich(format!("v{}", i))}));
        }
    }

    blocks
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize_envelope");
    for sections in [10, 100] {
        let encoded = Value::Array(sample_blocks(sections)).to_string();
        let envelope = json!([{"type": "text", "text": format!("{}\ntrailing note", encoded)}]);
        group.bench_with_input(BenchmarkId::from_parameter(sections), &envelope, |b, raw| {
            b.iter(|| normalize_blocks(black_box(raw.clone())))
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_markdown");
    let config = RenderConfig::default();
    for sections in [10, 100] {
        let document = Document::from_values(&sample_blocks(sections));
        group.bench_with_input(BenchmarkId::from_parameter(sections), &document, |b, doc| {
            b.iter(|| render_markdown(black_box(doc), &config))
        });
    }
    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let document = Document::from_values(&sample_blocks(100));
    c.bench_function("summarize_100_sections", |b| {
        b.iter(|| summarize(black_box(&document)))
    });
}

criterion_group!(benches, bench_normalize, bench_render, bench_summarize);
criterion_main!(benches);
