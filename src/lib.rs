//! flaggrid renders a folder of SVG flags into labeled preview grids.
//!
//! # Pipeline overview
//!
//! 1. **List**: `images_dir -> Vec<SourceImage>` (`.svg` files, sorted by case-insensitive name)
//! 2. **Prepare**: load the label font once and parse every SVG once ([`PreparedSource`])
//! 3. **Render**: per theme, rasterize each source contain-fit into an `S × S` square and set its
//!    label underneath, in parallel
//! 4. **Compose**: place the thumbnails row-major on a transparent canvas ([`GridLayout`]) and
//!    write a PNG
//!
//! [`run`] drives all of it from a [`Config`]. The grid placement is a pure function of the image
//! count and [`GridGeometry`], so identical inputs always produce identical files.
#![forbid(unsafe_code)]

mod assets;
mod foundation;
mod render;

/// Run configuration and themes.
pub mod config;
/// Batch driver.
pub mod pipeline;

#[cfg(test)]
mod test_fixtures;

pub use assets::decode::{PreparedSource, load_svg, parse_svg};
pub use assets::font::{LabelFont, load_font};
pub use assets::list::{SUPPORTED_EXTENSION, SourceImage, list_images};
pub use config::{Config, Theme};
pub use foundation::core::Rgba8;
pub use foundation::error::{FlagGridError, FlagGridResult};
pub use pipeline::{
    RunReport, ThemeOutput, build_thread_pool, prepare_sources, render_theme, run,
};
pub use render::grid::{
    CellPlacement, GridGeometry, GridLayout, LABEL_PADDING, compose, write_png,
};
pub use render::thumbnail::{contain_fit, render_thumbnail};
