use criterion::{criterion_group, criterion_main, Criterion};

use svgexport::{rasterize, ExportFormat, SourceDocument};

fn bench_rasterize_icon_sizes(c: &mut Criterion) {
    let markup = std::fs::read_to_string("tests/fixtures/check.svg").expect("read fixture");
    let document = SourceDocument::parse(&markup).expect("fixture is renderable");

    for size in [16u32, 48, 128] {
        c.bench_function(&format!("rasterize_png_{}", size), |b| {
            b.iter(|| {
                let _ = rasterize(&document, size, size, ExportFormat::Png).unwrap();
            })
        });
    }

    c.bench_function("rasterize_jpg_200", |b| {
        b.iter(|| {
            let _ = rasterize(&document, 200, 200, ExportFormat::Jpg).unwrap();
        })
    });
}

criterion_group!(benches, bench_rasterize_icon_sizes);
criterion_main!(benches);
