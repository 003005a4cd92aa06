//! Benchmarks for pager searching and screen repaints.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prettycat::pager::render::render_page;
use prettycat::pager::{LineBuffer, Message, ViewState, update};

fn document() -> LineBuffer {
    LineBuffer::from_lines(
        (0..10_000)
            .map(|i| format!("\x1b[38;5;250mline {i}\x1b[0m with some text to scan"))
            .collect(),
    )
}

fn bench_find_matches(c: &mut Criterion) {
    let lines = document();
    c.bench_function("find_matches", |b| {
        b.iter(|| lines.find_matches(black_box("LINE 99")));
    });
}

fn bench_render_page(c: &mut Criterion) {
    let lines = document();
    let state = update(ViewState::new(40), &lines, Message::PageDown);
    let mut out = Vec::with_capacity(8 * 1024);
    c.bench_function("render_page", |b| {
        b.iter(|| {
            out.clear();
            render_page(&mut out, black_box(&lines), &state, true).unwrap();
        });
    });
}

criterion_group!(benches, bench_find_matches, bench_render_page);
criterion_main!(benches);
