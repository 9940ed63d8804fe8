//! Rasterization: decode SVG markup into a fixed-size pixel surface and
//! encode it as PNG or JPG.

use std::sync::{Arc, LazyLock};

use resvg::tiny_skia::{Color, Pixmap, Transform};
use resvg::usvg::{fontdb, Options, Tree};

use crate::error::{Error, Result};
use crate::{ExportFormat, RasterArtifact, SourceDocument};

/// JPEG quality used by [`rasterize`] when no converter config is in play
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

// Shared across all rasterize calls; system fonts are loaded once.
static OPTIONS: LazyLock<Options> = LazyLock::new(|| {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    Options {
        fontdb: Arc::new(db),
        ..Options::default()
    }
});

/// Rasterize `document` into a `width` x `height` surface encoded as `format`.
///
/// The requested box is authoritative: the image is scaled independently on
/// each axis to fill it, so a source with a different intrinsic aspect ratio
/// comes out distorted rather than letterboxed. JPG output is rendered over
/// an opaque white background since the format has no alpha channel.
pub fn rasterize(
    document: &SourceDocument,
    width: u32,
    height: u32,
    format: ExportFormat,
) -> Result<RasterArtifact> {
    rasterize_with_quality(document, width, height, format, DEFAULT_JPEG_QUALITY)
}

/// Like [`rasterize`], with an explicit JPEG encoder quality (1-100).
pub fn rasterize_with_quality(
    document: &SourceDocument,
    width: u32,
    height: u32,
    format: ExportFormat,
    jpeg_quality: u8,
) -> Result<RasterArtifact> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }

    let tree = Tree::from_str(document.root_markup(), &OPTIONS)
        .map_err(|e| Error::DecodeFailed(e.to_string()))?;

    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        Error::DecodeFailed(format!("cannot allocate a {}x{} surface", width, height))
    })?;

    if format == ExportFormat::Jpg {
        pixmap.fill(Color::WHITE);
    }

    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let data = encode(&pixmap, format, jpeg_quality)?;

    Ok(RasterArtifact {
        width,
        height,
        format,
        data,
        filename: format!("{}x{}.{}", width, height, format.extension()),
    })
}

fn encode(pixmap: &Pixmap, format: ExportFormat, jpeg_quality: u8) -> Result<Vec<u8>> {
    match format {
        ExportFormat::Png => pixmap
            .encode_png()
            .map_err(|e| Error::EncodeFailed(e.to_string())),
        ExportFormat::Jpg => {
            let mut rgb = image::RgbImage::new(pixmap.width(), pixmap.height());
            for (out, px) in rgb.pixels_mut().zip(pixmap.pixels()) {
                let c = px.demultiply();
                *out = image::Rgb([c.red(), c.green(), c.blue()]);
            }
            let mut buf = Vec::new();
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, jpeg_quality);
            encoder
                .encode_image(&rgb)
                .map_err(|e| Error::EncodeFailed(e.to_string()))?;
            Ok(buf)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CIRCLE: &str = r##"<svg width="100" height="50" viewBox="0 0 100 50" xmlns="http://www.w3.org/2000/svg">
        <circle cx="25" cy="25" r="20" fill="#4CAF50"/>
    </svg>"##;

    fn doc(markup: &str) -> SourceDocument {
        SourceDocument::parse(markup).expect("fixture must pass the marker check")
    }

    #[test]
    fn rasterize_matches_requested_dimensions() {
        let artifact = rasterize(&doc(CIRCLE), 64, 32, ExportFormat::Png).unwrap();
        assert_eq!(artifact.width, 64);
        assert_eq!(artifact.height, 32);
        assert_eq!(artifact.filename, "64x32.png");

        let decoded = Pixmap::decode_png(&artifact.data).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 32);
    }

    #[test]
    fn rasterize_ignores_intrinsic_aspect_ratio() {
        // 2:1 source into a square box still yields the requested square
        let artifact = rasterize(&doc(CIRCLE), 40, 40, ExportFormat::Png).unwrap();
        let decoded = Pixmap::decode_png(&artifact.data).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 40));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let err = rasterize(&doc(CIRCLE), 0, 32, ExportFormat::Png).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { width: 0, height: 32 }));
        let err = rasterize(&doc(CIRCLE), 32, 0, ExportFormat::Jpg).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn malformed_markup_is_an_opaque_decode_failure() {
        // Passes the shallow marker check, fails XML parsing
        let bad = doc("<svg><unclosed</svg>");
        let err = rasterize(&bad, 16, 16, ExportFormat::Png).unwrap_err();
        assert!(matches!(err, Error::DecodeFailed(_)));
    }

    #[test]
    fn png_preserves_transparency() {
        // No background rect: everything outside the circle stays transparent
        let artifact = rasterize(&doc(CIRCLE), 100, 50, ExportFormat::Png).unwrap();
        let decoded = Pixmap::decode_png(&artifact.data).unwrap();
        let corner = decoded.pixel(99, 0).unwrap();
        assert_eq!(corner.alpha(), 0);
    }

    #[test]
    fn jpg_renders_over_opaque_white() {
        let artifact = rasterize(&doc(CIRCLE), 100, 50, ExportFormat::Jpg).unwrap();
        let decoded = image::load_from_memory_with_format(
            &artifact.data,
            image::ImageFormat::Jpeg,
        )
        .unwrap()
        .to_rgb8();
        // Transparent source area must come out white (allow lossy wiggle)
        let px = decoded.get_pixel(99, 0);
        assert!(px[0] > 250 && px[1] > 250 && px[2] > 250, "corner was {:?}", px);
    }

    #[test]
    fn root_slice_is_rendered_not_the_raw_text() {
        let noisy = doc(&format!("some pasted notes\n{}\n-- end --", CIRCLE));
        let artifact = rasterize(&noisy, 16, 16, ExportFormat::Png).unwrap();
        assert_eq!(artifact.width, 16);
    }
}
