use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "flaggrid",
    version,
    about = "Render a folder of SVG flags into labeled dark/light preview grids"
)]
struct Cli {
    /// JSON config file. Flags given on the command line override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory scanned for `.svg` files.
    #[arg(long)]
    images: Option<PathBuf>,

    /// Font file used for the labels.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output PNG of the dark theme (white labels).
    #[arg(long)]
    dark_out: Option<PathBuf>,

    /// Output PNG of the light theme (black labels).
    #[arg(long)]
    light_out: Option<PathBuf>,

    /// Thumbnails per row.
    #[arg(long)]
    per_row: Option<u32>,

    /// Thumbnail edge length in pixels.
    #[arg(long)]
    size: Option<u32>,

    /// Gap between thumbnails in pixels.
    #[arg(long)]
    spacing: Option<u32>,

    /// Margin around the grid in pixels.
    #[arg(long)]
    edge: Option<u32>,

    /// Label font size in pixels.
    #[arg(long)]
    font_size: Option<u32>,

    /// Worker threads (defaults to one per core).
    #[arg(long)]
    threads: Option<usize>,

    /// Log per-image progress.
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
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
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = build_config(cli)?;
    let report = flaggrid::run(&config).context("create grid images")?;

    tracing::info!(
        images = report.images,
        grids = report.outputs.len(),
        elapsed_ms = report.elapsed.as_millis() as u64,
        "done"
    );
    Ok(())
}

fn build_config(cli: Cli) -> anyhow::Result<flaggrid::Config> {
    let mut config = match &cli.config {
        Some(path) => flaggrid::Config::from_json_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => flaggrid::Config::default(),
    };

    if let Some(dir) = cli.images {
        config.images_dir = dir;
    }
    if let Some(font) = cli.font {
        config.font_path = font;
    }
    if let Some(out) = cli.dark_out {
        set_theme_output(&mut config, "dark", out)?;
    }
    if let Some(out) = cli.light_out {
        set_theme_output(&mut config, "light", out)?;
    }

    let geometry = &mut config.geometry;
    if let Some(v) = cli.per_row {
        geometry.flags_per_row = v;
    }
    if let Some(v) = cli.size {
        geometry.thumbnail_size = v;
    }
    if let Some(v) = cli.spacing {
        geometry.spacing = v;
    }
    if let Some(v) = cli.edge {
        geometry.edge_spacing = v;
    }
    if let Some(v) = cli.font_size {
        geometry.font_size = v;
    }
    if cli.threads.is_some() {
        config.threads = cli.threads;
    }

    Ok(config)
}

fn set_theme_output(config: &mut flaggrid::Config, name: &str, out: PathBuf) -> anyhow::Result<()> {
    let theme = config
        .themes
        .iter_mut()
        .find(|t| t.name == name)
        .with_context(|| format!("no '{name}' theme in the configuration"))?;
    theme.output = out;
    Ok(())
}
