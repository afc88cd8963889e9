use std::path::Path;

use crate::{
    assets::RawImage,
    foundation::{
        core::{GRID_SIZE, Palette, Rgb8},
        error::{NounError, NounResult},
    },
    layer::{
        Layer, PartKind,
        codec::{DecodedImage, EncodedImage},
    },
};

/// Decode any raster format the `image` crate understands into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> NounResult<RawImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| NounError::asset_read(format!("decode image: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > GRID_SIZE || height > GRID_SIZE {
        return Err(NounError::asset_read(format!(
            "image is {width}x{height}; layers are at most {GRID_SIZE}x{GRID_SIZE}"
        )));
    }

    Ok(RawImage {
        width,
        height,
        rgba8: rgba.into_raw(),
    })
}

#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_image_file(path: impl AsRef<Path>) -> NounResult<RawImage> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)
        .map_err(|e| NounError::asset_read(format!("read '{}': {e}", path.display())))?;
    let raw = decode_image(&bytes).map_err(|e| match e {
        NounError::AssetRead(msg) => NounError::asset_read(format!("'{}': {msg}", path.display())),
        other => other,
    })?;
    tracing::debug!(width = raw.width, height = raw.height, "custom asset decoded");
    Ok(raw)
}

/// Encode a raster into a layer payload against `palette`.
///
/// Pixels with alpha 0 become transparent (index 0). Every other pixel takes the palette entry with
/// the same color, or the nearest one when the exact color is absent. The palette is not extended.
pub fn encode_layer(
    name: impl Into<String>,
    raw: &RawImage,
    kind: PartKind,
    palette: &Palette,
) -> NounResult<Layer> {
    check_dimensions(raw)?;

    let mut indices = Vec::with_capacity((raw.width * raw.height) as usize);
    for y in 0..raw.height {
        for x in 0..raw.width {
            let [r, g, b, a] = raw.pixel(x, y);
            if a == 0 {
                indices.push(0);
                continue;
            }
            let index = palette
                .nearest_index(Rgb8::new(r, g, b))
                .ok_or_else(|| NounError::render("palette has no opaque colors"))?;
            indices.push(index);
        }
    }

    let decoded = DecodedImage::from_index_grid(raw.width, raw.height, &indices)?;
    Ok(Layer::new(name, kind, EncodedImage::encode(&decoded)))
}

fn check_dimensions(raw: &RawImage) -> NounResult<()> {
    if raw.width > GRID_SIZE || raw.height > GRID_SIZE {
        return Err(NounError::asset_read(format!(
            "image is {}x{}; layers are at most {GRID_SIZE}x{GRID_SIZE}",
            raw.width, raw.height
        )));
    }
    let expected = (raw.width * raw.height * 4) as usize;
    if raw.rgba8.len() != expected {
        return Err(NounError::asset_read(format!(
            "image is {}x{} but carries {} bytes of RGBA8 (expected {expected})",
            raw.width,
            raw.height,
            raw.rgba8.len()
        )));
    }
    Ok(())
}
