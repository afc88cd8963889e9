use std::path::Path;

use crate::foundation::error::{NounError, NounResult};

/// Straight-alpha RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub rgba8: Vec<u8>,
}

/// Avoid pathological allocations from a bad `scale`.
const MAX_DIM: u32 = 8_192;

pub fn parse_svg(document: &str) -> NounResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_str(document, &opts)
        .map_err(|e| NounError::render(format!("parse svg document: {e}")))
}

/// Rasterize an SVG document at `scale` times its intrinsic size.
pub fn rasterize_svg(document: &str, scale: f32) -> NounResult<RasterImage> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(NounError::validation("raster scale must be finite and > 0"));
    }

    let tree = parse_svg(document)?;
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;
    if width > MAX_DIM || height > MAX_DIM {
        return Err(NounError::render(format!(
            "raster size too large: {width}x{height} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| NounError::render("failed to allocate raster pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(&tree, xform, &mut pixmap.as_mut());

    let mut rgba8 = Vec::with_capacity((width * height * 4) as usize);
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba8.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }

    Ok(RasterImage {
        width,
        height,
        rgba8,
    })
}

/// Write `raster` as PNG, creating missing parent directories.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_png(path: &Path, raster: &RasterImage) -> NounResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| NounError::io(format!("create '{}'", parent.display()), e))?;
    }

    image::save_buffer_with_format(
        path,
        &raster.rgba8,
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| match e {
        image::ImageError::IoError(io) => {
            NounError::io(format!("write png '{}'", path.display()), io)
        }
        other => NounError::render(format!("encode png '{}': {other}", path.display())),
    })
}
