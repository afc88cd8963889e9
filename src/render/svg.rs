use std::fmt::Write as _;

use crate::{
    foundation::{
        core::{Background, GRID_SIZE, Palette},
        error::{NounError, NounResult},
    },
    layer::Layer,
    render::Compositor,
};

/// Default edge length of one grid cell in SVG user units.
pub const CELL_SIZE: u32 = 10;

/// Renders each layer as a `<g data-layer="NAME">` group of cell-aligned `<rect>`s.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgCompositor {
    pub cell_size: u32,
}

impl Default for SvgCompositor {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
        }
    }
}

impl SvgCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Side length of the whole document in user units.
    pub fn canvas_size(&self) -> u32 {
        GRID_SIZE * self.cell_size
    }
}

fn in_layer(name: &str, err: NounError) -> NounError {
    match err {
        NounError::Render(msg) => NounError::render(format!("layer '{name}': {msg}")),
        other => other,
    }
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

impl Compositor for SvgCompositor {
    #[tracing::instrument(skip_all, fields(layers = layers.len(), background = %background.color))]
    fn render(
        &self,
        layers: &[Layer],
        palette: &Palette,
        background: &Background,
    ) -> NounResult<String> {
        if self.cell_size == 0 {
            return Err(NounError::render("cell size must be > 0"));
        }

        let size = self.canvas_size();
        let cell = self.cell_size;
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" \
             xmlns=\"http://www.w3.org/2000/svg\" shape-rendering=\"crispEdges\">\
             <rect width=\"100%\" height=\"100%\" fill=\"#{}\" />",
            background.color
        );

        for layer in layers {
            let spans = layer
                .data
                .decode()
                .and_then(|img| img.spans())
                .map_err(|e| in_layer(&layer.name, e))?;

            let _ = write!(out, "<g data-layer=\"{}\">", escape_attr(&layer.name));
            let mut drawn = 0usize;
            for span in spans {
                let Some(color) = palette
                    .get(span.color)
                    .map_err(|e| in_layer(&layer.name, e))?
                else {
                    continue;
                };
                let _ = write!(
                    out,
                    "<rect width=\"{}\" height=\"{cell}\" x=\"{}\" y=\"{}\" fill=\"#{color}\" />",
                    u32::from(span.length) * cell,
                    u32::from(span.x) * cell,
                    u32::from(span.y) * cell,
                );
                drawn += 1;
            }
            out.push_str("</g>");
            tracing::debug!(layer = %layer.name, rects = drawn, "layer composited");
        }

        out.push_str("</svg>");
        Ok(out)
    }
}
