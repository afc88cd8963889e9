use crate::{
    foundation::{
        core::{Background, Palette},
        error::NounResult,
    },
    layer::Layer,
};

pub mod raster;
pub mod svg;

/// Flattens ordered layers over a background into one vector document.
///
/// Layers draw bottom-to-top in slice order; later layers win overlapping cells.
pub trait Compositor {
    fn render(
        &self,
        layers: &[Layer],
        palette: &Palette,
        background: &Background,
    ) -> NounResult<String>;
}
