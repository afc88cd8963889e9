//! Seeded Noun generation.
//!
//! One run is a straight line:
//!
//! 1. derive a [`Seed`] from an identifier and 32 bytes of [`Entropy`]
//! 2. resolve the seed into ordered part [`Layer`]s and a [`Background`] ([`TraitResolver`])
//! 3. optionally append a custom layer read from a local raster ([`inject_custom_layer`])
//! 4. flatten everything into an SVG document ([`Compositor`])
//! 5. write the document to disk ([`write_output`])
#![forbid(unsafe_code)]

pub mod assets;
pub mod catalog;
mod foundation;
pub mod layer;
pub mod output;
pub mod pipeline;
pub mod render;

pub use crate::assets::{
    RawImage,
    decode::{decode_image, encode_layer, read_image_file},
};
pub use crate::catalog::{
    CategoryCounts, PartImage, TraitCatalog,
    resolver::{NounParts, TraitResolver, generate_seed},
    seed::{derive_seed, seed_digest},
};
pub use crate::foundation::core::{
    Background, Entropy, GRID_SIZE, Palette, Rgb8, Seed, random_identifier,
};
pub use crate::foundation::error::{NounError, NounResult};
pub use crate::layer::{EncodedImage, Layer, PartKind, inject_custom_layer};
pub use crate::output::{decode_base64, encode_base64, write_output};
pub use crate::pipeline::{
    Composition, CustomLayerSource, PipelineOpts, PipelineOutput, compose, load_custom_layer,
    run_pipeline,
};
pub use crate::render::{
    Compositor,
    raster::{RasterImage, parse_svg, rasterize_svg, write_png},
    svg::SvgCompositor,
};
