//! Benchmarks for key decoding and markdown rendering.

use std::io::Cursor;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use prettycat::document::{self, RenderOptions};
use prettycat::pager::KeyReader;
use prettycat::source::Source;

fn bench_decode_keys(c: &mut Criterion) {
    let bytes = b"jjjkkfb\x1b[A\x1b[B\x1b[5~\x1b[6~/needle\rnNgGq".repeat(64);
    c.bench_function("decode_keys", |b| {
        b.iter(|| {
            let mut reader = KeyReader::new(Cursor::new(black_box(&bytes)));
            let mut count = 0;
            while let Ok(Some(_)) = reader.read_key() {
                count += 1;
            }
            count
        });
    });
}

fn bench_render_markdown(c: &mut Criterion) {
    let source = Source {
        name: "sample.md".to_string(),
        data: include_bytes!("../tests/fixtures/sample.md").to_vec(),
        is_stdin: false,
    };
    let options = RenderOptions {
        color: true,
        truecolor: true,
    };
    c.bench_function("render_markdown", |b| {
        b.iter(|| document::render(black_box(&source), &options).unwrap());
    });
}

criterion_group!(benches, bench_decode_keys, bench_render_markdown);
criterion_main!(benches);
