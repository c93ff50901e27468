//! Benchmarks for the outline and section pipelines.
//!
//! Run with: cargo bench
//!
//! Documents are synthetic: every page has a bold heading, a numbered
//! subheading and a few body lines.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use docintel::{
    Document, HeuristicClassifier, OutlineAssembler, Page, PersonaContext, SectionAnalyzer, Span,
};

/// Creates a synthetic document with the given number of pages.
fn create_test_document(page_count: usize) -> Document {
    let pages = (0..page_count)
        .map(|i| {
            let number = i as u32 + 1;
            let mut spans = vec![
                Span::new(format!("CHAPTER {}", number), 18.0, true, 72.0, 60.0),
                Span::new(format!("{}.1 Findings", number), 14.0, true, 72.0, 100.0),
            ];
            let mut text = format!("CHAPTER {}\n{}.1 Findings\n", number, number);
            for line in 0..20 {
                let body = format!(
                    "Line {} of page {} reports survey findings for the benchmark.",
                    line, number
                );
                spans.push(Span::new(body.clone(), 10.0, false, 72.0, 130.0 + line as f32 * 14.0));
                text.push_str(&body);
                text.push('\n');
                if line % 5 == 4 {
                    text.push('\n');
                }
            }
            Page::new(number).with_spans(spans).with_text(text)
        })
        .collect();

    Document::new("benchmark.pdf", pages)
}

/// Benchmark outline extraction at various sizes.
fn bench_outline(c: &mut Criterion) {
    let assembler = OutlineAssembler::new(Arc::new(HeuristicClassifier::new()));
    let mut group = c.benchmark_group("outline");

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| assembler.assemble(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark section detection, scoring and ranking.
fn bench_sections(c: &mut Criterion) {
    let context = PersonaContext::new("PhD Researcher", "Summarize survey findings");
    let analyzer = SectionAnalyzer::new(&context, Default::default());
    let mut group = c.benchmark_group("sections");

    for page_count in [1, 10, 50].iter() {
        let doc = create_test_document(*page_count);
        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| analyzer.analyze(black_box(&doc)));
        });
    }

    group.finish();
}

/// Benchmark document construction (body-size statistics).
fn bench_document_creation(c: &mut Criterion) {
    c.bench_function("document_creation", |b| {
        b.iter(|| create_test_document(black_box(10)));
    });
}

criterion_group!(benches, bench_outline, bench_sections, bench_document_creation);
criterion_main!(benches);
