use std::{path::Path, sync::Arc};

use usvg::fontdb;

use crate::foundation::error::{FlagGridError, FlagGridResult};

/// Font used for thumbnail labels, loaded once and shared read-only by every render.
#[derive(Clone, Debug)]
pub struct LabelFont {
    family: String,
    fontdb: Arc<fontdb::Database>,
}

impl LabelFont {
    /// Register every face found in `bytes` and keep the family of the first one.
    pub fn from_bytes(bytes: Vec<u8>) -> FlagGridResult<Self> {
        let mut db = fontdb::Database::new();
        let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(bytes)));

        let family = ids
            .iter()
            .filter_map(|id| db.face(*id))
            .find_map(|face| face.families.first().map(|(name, _)| name.clone()))
            .ok_or_else(|| FlagGridError::font_load("no usable font face in font data"))?;

        Ok(Self {
            family,
            fontdb: Arc::new(db),
        })
    }

    /// A font with no faces. Labels laid out with it produce no glyphs.
    #[cfg(test)]
    pub(crate) fn without_faces() -> Self {
        Self {
            family: "none".to_owned(),
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn face_count(&self) -> usize {
        self.fontdb.len()
    }

    /// `usvg` options resolving text against this font only.
    pub fn usvg_options(&self) -> usvg::Options<'static> {
        let mut opts = usvg::Options::default();
        opts.font_family = self.family.clone();
        opts.fontdb = Arc::clone(&self.fontdb);
        opts
    }
}

/// Read the label font from `path`.
pub fn load_font(path: &Path) -> FlagGridResult<LabelFont> {
    let bytes = std::fs::read(path).map_err(|e| {
        FlagGridError::font_load(format!("read font '{}': {e}", path.display()))
    })?;
    let font = LabelFont::from_bytes(bytes).map_err(|e| match e {
        FlagGridError::FontLoad(msg) => {
            FlagGridError::font_load(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(path = %path.display(), family = font.family(), "loaded label font");
    Ok(font)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
