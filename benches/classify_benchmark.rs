//! Benchmarks for outline extraction.
//!
//! Run with: cargo bench
//!
//! These benchmarks run the classifier and assembler over synthetic pages
//! and time header sniffing.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use pdf_outline::{HeuristicConfig, Line, LineClassifier, OutlineAssembler, Page};

const PROSE: &str = "Measurements were repeated three times and averaged before analysis.";

/// Creates laid-out pages resembling a technical report.
fn create_pages(page_count: u32) -> Vec<Page> {
    (1..=page_count)
        .map(|number| {
            let mut lines = vec![
                Line::new(format!("{}. Section {}", number, number), number, 0)
                    .with_font(16.0, true),
            ];
            for sub in 1..=3 {
                lines.push(
                    Line::new(format!("{}.{} Analysis Step", number, sub), number, 0)
                        .with_font(13.0, true),
                );
                for _ in 0..12 {
                    lines.push(Line::new(PROSE, number, 0).with_font(10.0, false));
                }
                lines.push(Line::new("KEY RESULTS", number, 0).with_font(10.0, true));
            }
            lines.push(Line::new("Quarterly Report", number, 0).with_font(8.0, false));
            lines.push(Line::new(number.to_string(), number, 0).with_font(8.0, false));
            Page::from_lines(number, lines)
        })
        .collect()
}

/// Benchmark header sniffing.
fn bench_format_detection(c: &mut Criterion) {
    let pdf_data = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n1 0 obj";
    let non_pdf_data = b"Not a PDF file at all, just random text content";

    c.bench_function("sniff_valid_pdf", |b| {
        b.iter(|| pdf_outline::sniff(black_box(pdf_data)).is_ok());
    });

    c.bench_function("sniff_non_pdf", |b| {
        b.iter(|| pdf_outline::sniff(black_box(non_pdf_data)).is_err());
    });
}

/// Benchmark classifier construction and outline assembly at various sizes.
fn bench_assemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble");
    let config = HeuristicConfig::default();

    for page_count in [1, 10, 50].iter() {
        let pages = create_pages(*page_count);

        group.bench_function(format!("{}_pages", page_count), |b| {
            b.iter(|| {
                let classifier = LineClassifier::new(black_box(&pages), &config);
                OutlineAssembler::new(&classifier).assemble(&pages)
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_format_detection, bench_assemble);
criterion_main!(benches);
