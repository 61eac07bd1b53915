//! Parse and search benchmarks on a generated export
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pipview::document::Document;
use pipview::search;
use pipview::view::{ViewState, project};
use std::fmt::Write;
use std::hint::black_box;

/// Catalog of `groups` top-level groups, each four levels deep, plus a
/// definition table covering every leaf
fn generate_export(groups: usize) -> String {
    let mut defs = String::from("<table><tr><th>Name</th><th>Definition</th></tr>\n");
    let mut catalog = String::from("<table>\n<tr><td>1</td><td></td><td>Pip3A4.Root</td></tr>\n");
    let mut id = 1;

    for g in 0..groups {
        id += 1;
        let _ = writeln!(catalog, "<tr><td>{id}</td><td></td><td>|--Group{g}</td></tr>");
        for s in 0..4 {
            id += 1;
            let _ = writeln!(
                catalog,
                "<tr><td>{id}</td><td></td><td>|--|--Section{g}_{s}.Choice</td></tr>"
            );
            for f in 0..5 {
                id += 1;
                let _ = writeln!(
                    catalog,
                    "<tr><td>{id}</td><td></td><td>|--|--|--Field{g}_{s}_{f}</td></tr>"
                );
                let _ = writeln!(
                    defs,
                    "<tr><td>Field{g}_{s}_{f}</td><td>Field &amp; value {f}</td></tr>"
                );
            }
        }
    }

    defs.push_str("</table>\n");
    catalog.push_str("</table>\n");
    format!("<html><body>{defs}{catalog}</body></html>")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for groups in [10, 100] {
        let raw = generate_export(groups);
        group.bench_with_input(BenchmarkId::new("document", groups), &raw, |b, raw| {
            b.iter(|| Document::parse(black_box(raw)))
        });
        group.bench_with_input(BenchmarkId::new("catalog", groups), &raw, |b, raw| {
            b.iter(|| pipview::parse(black_box(raw)))
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let catalog = pipview::parse(&generate_export(100)).expect("generated export parses");
    let store = catalog.store();

    let queries = [
        "Field50_2_3",
        "Field",
        "/Pip3A4/Group50/Section50_2/Field50_2_3",
        "/Pip3A4/Group99/Choice/Field99_3_4",
        "/Pip3A4/Group50/Missing/Field",
    ];

    let mut group = c.benchmark_group("search");
    for query in queries {
        group.bench_with_input(BenchmarkId::from_parameter(query), &query, |b, &q| {
            b.iter(|| search::resolve(store, black_box(q)))
        });
    }
    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let catalog = pipview::parse(&generate_export(100)).expect("generated export parses");
    let store = catalog.store();

    let mut state = ViewState::new();
    c.bench_function("project_collapsed", |b| {
        b.iter(|| project(store, black_box(&state.expanded)))
    });

    state.expand_all(store);
    c.bench_function("project_expanded", |b| {
        b.iter(|| project(store, black_box(&state.expanded)))
    });
}

criterion_group!(benches, bench_parse, bench_search, bench_projection);

criterion_main!(benches);
