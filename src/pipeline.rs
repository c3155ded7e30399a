//! Driver: list once, then render and compose one grid per theme.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use image::RgbaImage;
use rayon::prelude::*;

use crate::{
    assets::{
        decode::{PreparedSource, load_svg},
        font::{LabelFont, load_font},
        list::{SourceImage, list_images},
    },
    config::{Config, Theme},
    foundation::error::{FlagGridError, FlagGridResult},
    render::{
        grid::{GridGeometry, compose, write_png},
        thumbnail::render_thumbnail,
    },
};

/// Outcome of a successful [`run`].
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Number of images placed in every grid.
    pub images: usize,
    /// Written grids, in theme order.
    pub outputs: Vec<ThemeOutput>,
    /// Wall-clock time of the whole run.
    pub elapsed: Duration,
}

/// One written grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeOutput {
    pub theme: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Produce every themed grid described by `config`.
///
/// The first failure aborts the run; grids already written by earlier themes are left on disk but
/// must not be trusted.
pub fn run(config: &Config) -> FlagGridResult<RunReport> {
    let started = Instant::now();
    config.validate()?;

    let images = list_images(&config.images_dir)?;
    if images.is_empty() {
        return Err(FlagGridError::empty_input(format!(
            "no images found in '{}'",
            config.images_dir.display()
        )));
    }

    let font = load_font(&config.font_path)?;
    let pool = build_thread_pool(config.threads)?;
    let sources = prepare_sources(&images, &font, &pool)?;

    let mut outputs = Vec::with_capacity(config.themes.len());
    for theme in &config.themes {
        let canvas = render_theme(&sources, &font, theme, &config.geometry, &pool)?;
        write_png(&canvas, &theme.output)?;
        tracing::info!(
            theme = %theme.name,
            path = %theme.output.display(),
            width = canvas.width(),
            height = canvas.height(),
            "grid image created"
        );
        outputs.push(ThemeOutput {
            theme: theme.name.clone(),
            path: theme.output.clone(),
            width: canvas.width(),
            height: canvas.height(),
        });
    }

    Ok(RunReport {
        images: sources.len(),
        outputs,
        elapsed: started.elapsed(),
    })
}

/// Parse every listed image on `pool`, keeping list order.
pub fn prepare_sources(
    images: &[SourceImage],
    font: &LabelFont,
    pool: &rayon::ThreadPool,
) -> FlagGridResult<Vec<PreparedSource>> {
    pool.install(|| {
        images
            .par_iter()
            .map(|image| load_svg(image, font))
            .collect::<FlagGridResult<Vec<_>>>()
    })
}

/// Render one theme's grid in memory.
#[tracing::instrument(skip_all, fields(theme = %theme.name, images = sources.len()))]
pub fn render_theme(
    sources: &[PreparedSource],
    font: &LabelFont,
    theme: &Theme,
    geometry: &GridGeometry,
    pool: &rayon::ThreadPool,
) -> FlagGridResult<RgbaImage> {
    if sources.is_empty() {
        return Err(FlagGridError::empty_input("no images to render"));
    }
    geometry.validate()?;

    let thumbs = pool.install(|| {
        sources
            .par_iter()
            .map(|source| {
                tracing::debug!(label = source.label(), "render thumbnail");
                render_thumbnail(
                    &source.tree,
                    source.label(),
                    font,
                    theme.text_color,
                    geometry,
                )
            })
            .collect::<FlagGridResult<Vec<_>>>()
    })?;

    compose(&thumbs, geometry)
}

pub fn build_thread_pool(threads: Option<usize>) -> FlagGridResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(FlagGridError::validation(
            "'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| FlagGridError::validation(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
