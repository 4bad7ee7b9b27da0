use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use nova_core::document::{Document, PageInput};
use nova_core::high_level::{ConvertOptions, analyze_page, convert_document};
use nova_core::layout::{BBox, TableCandidate, Token};
use nova_core::tables::StrategyDetection;

/// A page of `rows` text lines with a 10x4 table in the middle, detected
/// twice (once per strategy) with slightly different bboxes.
fn synthetic_page(rows: usize) -> PageInput {
    let mut tokens = Vec::with_capacity(rows * 8);
    for r in 0..rows {
        let top = 40.0 + r as f64 * 14.0;
        for c in 0..8 {
            let x0 = 30.0 + c as f64 * 65.0;
            let text = if c % 3 == 0 { "Lo" } else { "ipsum" };
            tokens.push(Token::new(text, x0, top, x0 + 28.0, top + 10.0));
            tokens.push(Token::new("rem", x0 + 29.0, top, x0 + 45.0, top + 10.0));
        }
    }

    let grid: Vec<Vec<Option<String>>> = (0..10)
        .map(|r| (0..4).map(|c| Some(format!("{r}:{c}"))).collect())
        .collect();
    let mid = 40.0 + (rows / 2) as f64 * 14.0;
    let ruled = TableCandidate::new(BBox::new(30.0, mid, 400.0, mid + 140.0), grid.clone());
    let aligned = TableCandidate::new(BBox::new(31.0, mid + 2.0, 401.0, mid + 140.0), grid);

    PageInput {
        tokens,
        detections: vec![
            StrategyDetection::ok("lines", vec![ruled]),
            StrategyDetection::ok("text", vec![aligned]),
        ],
    }
}

fn bench_analyze_page(c: &mut Criterion) {
    let options = ConvertOptions::default();
    let mut group = c.benchmark_group("analyze_page");
    for rows in [20usize, 60, 200] {
        let page = synthetic_page(rows);
        group.bench_with_input(BenchmarkId::from_parameter(rows), &page, |b, page| {
            b.iter(|| black_box(analyze_page(black_box(page), 1, &options)))
        });
    }
    group.finish();
}

fn bench_convert_document(c: &mut Criterion) {
    let doc = Document::new((0..32).map(|_| synthetic_page(60)).collect());
    let options = ConvertOptions::default();
    c.bench_function("convert_document_32_pages", |b| {
        b.iter(|| black_box(convert_document(black_box(&doc), &options)))
    });
}

criterion_group!(benches, bench_analyze_page, bench_convert_document);
criterion_main!(benches);
