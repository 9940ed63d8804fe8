use svgexport::{rasterize, ExportFormat, SourceDocument};

fn fixture() -> SourceDocument {
    let markup = std::fs::read_to_string("tests/fixtures/check.svg").expect("read fixture");
    SourceDocument::parse(&markup).expect("fixture is renderable")
}

#[test]
fn smoke_rasterize_png() {
    let artifact = rasterize(&fixture(), 256, 128, ExportFormat::Png).unwrap();
    assert_eq!(artifact.width, 256);
    assert_eq!(artifact.height, 128);
    assert_eq!(artifact.filename, "256x128.png");
    // PNG signature
    assert_eq!(&artifact.data[..4], &[0x89, b'P', b'N', b'G']);
}

#[test]
fn smoke_rasterize_jpg() {
    let artifact = rasterize(&fixture(), 64, 64, ExportFormat::Jpg).unwrap();
    assert_eq!(artifact.filename, "64x64.jpg");
    // JFIF/SOI marker
    assert_eq!(&artifact.data[..2], &[0xFF, 0xD8]);
}
