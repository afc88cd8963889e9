use std::path::PathBuf;

use serde::Serialize;

use crate::{
    assets::decode::{encode_layer, read_image_file},
    catalog::resolver::{TraitResolver, generate_seed},
    foundation::{
        core::{Background, Entropy, Seed},
        error::NounResult,
    },
    layer::{Layer, PartKind, inject_custom_layer},
    output::{DEFAULT_FILE_NAME, DEFAULT_OUT_DIR, encode_base64, write_output},
    render::Compositor,
};

/// Local raster drawn on top of the resolved parts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomLayerSource {
    pub path: PathBuf,
    pub name: String,
}

impl CustomLayerSource {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Use the file stem as the layer name (`assets/hat.png` -> `hat`).
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_owned());
        Self { path, name }
    }
}

/// Inputs for one run. Nothing here is random; callers choose the identifier and entropy.
#[derive(Clone, Debug)]
pub struct PipelineOpts {
    pub identifier: u64,
    pub entropy: Entropy,
    pub custom_layer: Option<CustomLayerSource>,
    pub out_dir: PathBuf,
    pub file_name: String,
}

impl Default for PipelineOpts {
    fn default() -> Self {
        Self {
            identifier: 0,
            entropy: Entropy::zero(),
            custom_layer: None,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_name: DEFAULT_FILE_NAME.to_owned(),
        }
    }
}

impl PipelineOpts {
    pub fn new(identifier: u64, entropy: Entropy) -> Self {
        Self {
            identifier,
            entropy,
            ..Self::default()
        }
    }

    pub fn with_custom_layer(mut self, source: CustomLayerSource) -> Self {
        self.custom_layer = Some(source);
        self
    }

    pub fn with_output(mut self, out_dir: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        self.out_dir = out_dir.into();
        self.file_name = file_name.into();
        self
    }
}

/// Everything produced before the write step.
#[derive(Clone, Debug, Serialize)]
pub struct Composition {
    pub seed: Seed,
    /// Layers in render order, custom layer (if any) last.
    pub layers: Vec<Layer>,
    pub background: Background,
    pub document: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct PipelineOutput {
    pub composition: Composition,
    pub document_base64: String,
    pub path: PathBuf,
}

/// Read a raster from disk and encode it as a custom layer against the resolver's palette.
pub fn load_custom_layer(
    resolver: &dyn TraitResolver,
    source: &CustomLayerSource,
) -> NounResult<Layer> {
    let raw = read_image_file(&source.path)?;
    encode_layer(source.name.clone(), &raw, PartKind::Custom, resolver.palette())
}

/// Seed, resolve, optionally inject, and composite. Performs no writes.
#[tracing::instrument(skip(resolver, compositor, entropy, custom), fields(entropy = %entropy))]
pub fn compose(
    resolver: &dyn TraitResolver,
    compositor: &dyn Compositor,
    identifier: u64,
    entropy: &Entropy,
    custom: Option<&CustomLayerSource>,
) -> NounResult<Composition> {
    let seed = generate_seed(resolver, identifier, entropy)?;
    tracing::info!(%seed, "seed");

    let resolved = resolver.resolve_parts(&seed)?;
    let names: Vec<&str> = resolved.parts.iter().map(|l| l.name.as_str()).collect();
    tracing::info!(parts = ?names, background = %resolved.background.color, "parts resolved");

    let layers = match custom {
        Some(source) => {
            let custom = load_custom_layer(resolver, source)?;
            inject_custom_layer(resolved.parts, custom)
        }
        None => resolved.parts,
    };

    let document = compositor.render(&layers, resolver.palette(), &resolved.background)?;

    Ok(Composition {
        seed,
        layers,
        background: resolved.background,
        document,
    })
}

/// Run the whole pipeline once: compose, log the document, and write it to disk.
///
/// Any failure aborts the run; the output file is only touched by the final write.
pub fn run_pipeline(
    resolver: &dyn TraitResolver,
    compositor: &dyn Compositor,
    opts: &PipelineOpts,
) -> NounResult<PipelineOutput> {
    tracing::info!(identifier = opts.identifier, entropy = %opts.entropy, "starting run");

    let composition = compose(
        resolver,
        compositor,
        opts.identifier,
        &opts.entropy,
        opts.custom_layer.as_ref(),
    )?;

    let document_base64 = encode_base64(&composition.document);
    tracing::info!(svg = %composition.document, "svg document");
    tracing::info!(svg_base64 = %document_base64, "svg base64");

    let path = write_output(&composition.document, &opts.out_dir, &opts.file_name)?;
    tracing::info!(path = %path.display(), "wrote document");

    Ok(PipelineOutput {
        composition,
        document_base64,
        path,
    })
}
