use std::sync::Arc;

use crate::{
    assets::{font::LabelFont, list::SourceImage},
    foundation::error::{FlagGridError, FlagGridResult},
};

/// A listed image with its parsed SVG tree, ready to be rendered by any theme.
#[derive(Clone, Debug)]
pub struct PreparedSource {
    pub image: SourceImage,
    pub tree: Arc<usvg::Tree>,
}

impl PreparedSource {
    pub fn label(&self) -> &str {
        &self.image.label
    }
}

pub fn parse_svg(bytes: &[u8], opts: &usvg::Options<'_>) -> FlagGridResult<usvg::Tree> {
    let tree = usvg::Tree::from_data(bytes, opts)
        .map_err(|e| FlagGridError::decode(format!("parse svg tree: {e}")))?;

    let size = tree.size();
    if !(size.width().is_finite() && size.height().is_finite())
        || size.width() <= 0.0
        || size.height() <= 0.0
    {
        return Err(FlagGridError::decode("svg has invalid width/height"));
    }
    Ok(tree)
}

/// Read and parse one listed image. Relative references resolve against its directory, and any
/// text inside the SVG is set in the label font.
pub fn load_svg(image: &SourceImage, font: &LabelFont) -> FlagGridResult<PreparedSource> {
    let bytes = std::fs::read(&image.path).map_err(|e| {
        FlagGridError::decode(format!("read '{}': {e}", image.path.display()))
    })?;

    let mut opts = font.usvg_options();
    opts.resources_dir = image.path.parent().map(|p| p.to_path_buf());

    let tree = parse_svg(&bytes, &opts).map_err(|e| match e {
        FlagGridError::Decode(msg) => {
            FlagGridError::decode(format!("'{}': {msg}", image.path.display()))
        }
        other => other,
    })?;

    Ok(PreparedSource {
        image: image.clone(),
        tree: Arc::new(tree),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
