//! Run configuration.
//!
//! Every component receives the values it needs from a [`Config`] instead of reading process-wide
//! constants. [`Config::default`] reproduces the stock layout: SVGs from `./src/exported`, labels
//! set in `./src/font.ttf`, ten 100px flags per row, and one dark-mode and one light-mode grid
//! under `./output/`.

use std::{
    collections::BTreeSet,
    fs::File,
    io::BufReader,
    path::{Component, Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Rgba8,
    foundation::error::{FlagGridError, FlagGridResult},
    render::grid::GridGeometry,
};

/// One label-color variant of the output grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    /// Short name used in logs (`dark`, `light`, ...).
    pub name: String,
    /// Label fill color.
    pub text_color: Rgba8,
    /// PNG written for this theme.
    pub output: PathBuf,
}

impl Theme {
    /// White labels, meant to be shown on a dark background.
    pub fn dark(output: impl Into<PathBuf>) -> Self {
        Self {
            name: "dark".to_owned(),
            text_color: Rgba8::WHITE,
            output: output.into(),
        }
    }

    /// Black labels, meant to be shown on a light background.
    pub fn light(output: impl Into<PathBuf>) -> Self {
        Self {
            name: "light".to_owned(),
            text_color: Rgba8::BLACK,
            output: output.into(),
        }
    }
}

/// Full configuration of a grid run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory scanned for `.svg` files.
    pub images_dir: PathBuf,
    /// Font file used for labels.
    pub font_path: PathBuf,
    /// Grid geometry shared by every theme.
    pub geometry: GridGeometry,
    /// Themes rendered in order.
    pub themes: Vec<Theme>,
    /// Worker threads for parsing and rendering. `None` uses rayon's default.
    pub threads: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            images_dir: PathBuf::from("./src/exported"),
            font_path: PathBuf::from("./src/font.ttf"),
            geometry: GridGeometry::default(),
            themes: vec![
                Theme::dark("./output/flagPreviewDark.png"),
                Theme::light("./output/flagPreviewLight.png"),
            ],
            threads: None,
        }
    }
}

impl Config {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> FlagGridResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FlagGridError::validation(format!("parse config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> FlagGridResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FlagGridError::not_found(format!("open config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> FlagGridResult<()> {
        self.geometry.validate()?;

        if let Some(n) = self.threads
            && n == 0
        {
            return Err(FlagGridError::validation(
                "'threads' must be >= 1 when set",
            ));
        }

        if self.themes.is_empty() {
            return Err(FlagGridError::validation("at least one theme is required"));
        }

        let mut outputs = BTreeSet::new();
        for theme in &self.themes {
            if theme.name.trim().is_empty() {
                return Err(FlagGridError::validation("theme name must be non-empty"));
            }
            if !outputs.insert(lexical_key(&theme.output)) {
                return Err(FlagGridError::validation(format!(
                    "themes share the output path '{}'",
                    theme.output.display()
                )));
            }
        }

        Ok(())
    }
}

/// `path` with `.` segments dropped, so `./out.png` and `out.png` compare equal.
fn lexical_key(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
