use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use nounsmith::{
    CustomLayerSource, Entropy, PipelineOpts, SvgCompositor, TraitCatalog, TraitResolver,
    random_identifier, rasterize_svg, run_pipeline, write_png,
};

#[derive(Parser, Debug)]
#[command(name = "nounsmith", version, about = "Generate a seeded Noun and write it as SVG")]
struct Cli {
    /// Identifier mixed into the seed (random in 0..10000 when omitted).
    #[arg(long = "id")]
    identifier: Option<u64>,

    /// 32 bytes of entropy as `0x` + 64 hex digits (random when omitted).
    #[arg(long)]
    entropy: Option<Entropy>,

    /// Raster image (at most 32x32) drawn on top of every resolved part.
    #[arg(long)]
    custom_layer: Option<PathBuf>,

    /// Name for the custom layer (defaults to the file stem).
    #[arg(long, requires = "custom_layer")]
    custom_layer_name: Option<String>,

    /// Output directory, created if missing.
    #[arg(long, default_value = nounsmith::output::DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Output file name inside `--out-dir`.
    #[arg(long, default_value = nounsmith::output::DEFAULT_FILE_NAME)]
    file_name: String,

    /// Trait catalog JSON to use instead of the built-in one.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Also rasterize the document to this PNG path.
    #[arg(long)]
    png: Option<PathBuf>,

    /// Pixel scale for `--png` (1.0 = 320x320).
    #[arg(long, default_value_t = 1.0)]
    png_scale: f32,

    /// Log per-stage detail.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let owned_catalog;
    let catalog: &TraitCatalog = match &cli.catalog {
        Some(path) => {
            owned_catalog = TraitCatalog::from_path(path)
                .with_context(|| format!("load catalog '{}'", path.display()))?;
            &owned_catalog
        }
        None => TraitCatalog::builtin()?,
    };
    tracing::debug!(version = %catalog.version, palette = catalog.palette().len(), "catalog ready");

    let identifier = cli.identifier.unwrap_or_else(random_identifier);
    let entropy = cli.entropy.unwrap_or_else(Entropy::random);

    let mut opts = PipelineOpts::new(identifier, entropy).with_output(&cli.out_dir, &cli.file_name);
    if let Some(path) = &cli.custom_layer {
        let source = match &cli.custom_layer_name {
            Some(name) => CustomLayerSource::new(path, name),
            None => CustomLayerSource::from_path(path),
        };
        opts = opts.with_custom_layer(source);
    }

    let compositor = SvgCompositor::new();
    let out = run_pipeline(catalog, &compositor, &opts).context("generate noun")?;

    if let Some(png) = &cli.png {
        let raster = rasterize_svg(&out.composition.document, cli.png_scale)?;
        write_png(png, &raster)?;
        eprintln!("wrote {}", png.display());
    }

    eprintln!("wrote {}", out.path.display());
    Ok(())
}

fn init_tracing(cli: &Cli) {
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.quiet {
        tracing::Level::WARN
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}
