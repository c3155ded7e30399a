use std::path::{Path, PathBuf};

use crate::foundation::error::{FlagGridError, FlagGridResult};

/// File extension (case-insensitive) of the images picked up by [`list_images`].
pub const SUPPORTED_EXTENSION: &str = "svg";

/// One input image found by [`list_images`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceImage {
    /// Path of the file, joined onto the listed directory.
    pub path: PathBuf,
    /// Base name without extension, used as the thumbnail label.
    pub label: String,
}

impl SourceImage {
    pub fn from_path(path: PathBuf) -> Self {
        let label = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, label }
    }
}

/// List the SVG files of `dir`, ordered by case-insensitive base name.
///
/// Files with other extensions and subdirectories are skipped. The sort is stable, so names that
/// only differ in case keep their file-name order.
pub fn list_images(dir: &Path) -> FlagGridResult<Vec<SourceImage>> {
    if !dir.is_dir() {
        return Err(FlagGridError::not_found(format!(
            "image directory '{}' does not exist",
            dir.display()
        )));
    }

    let entries = std::fs::read_dir(dir).map_err(|e| {
        FlagGridError::not_found(format!("read image directory '{}': {e}", dir.display()))
    })?;

    let mut paths = Vec::<PathBuf>::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            FlagGridError::not_found(format!("read image directory '{}': {e}", dir.display()))
        })?;
        let path = entry.path();
        if path.is_file() && has_supported_extension(&path) {
            paths.push(path);
        }
    }

    // `read_dir` order is platform-defined; pin it before the stable label sort.
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut images = paths
        .into_iter()
        .map(SourceImage::from_path)
        .collect::<Vec<_>>();
    images.sort_by_cached_key(|img| img.label.to_lowercase());

    tracing::debug!(dir = %dir.display(), count = images.len(), "listed images");
    Ok(images)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SUPPORTED_EXTENSION))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/list.rs"]
mod tests;
