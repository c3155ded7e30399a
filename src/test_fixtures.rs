//! Shared fixtures for unit and integration tests.

use std::path::PathBuf;

use usvg::fontdb;

/// Bytes of an installed Latin text font, or `None` on hosts without fonts.
pub(crate) fn system_font_bytes() -> Option<Vec<u8>> {
    system_font_path().and_then(|path| std::fs::read(path).ok())
}

/// Path of an installed Latin text font. Sans faces are preferred, symbol and emoji faces are
/// never picked.
pub(crate) fn system_font_path() -> Option<PathBuf> {
    let mut db = fontdb::Database::new();
    db.load_system_fonts();

    let mut candidates = db
        .faces()
        .filter_map(|face| {
            let family = face.families.first()?.0.to_lowercase();
            if family.contains("emoji") || family.contains("symbol") {
                return None;
            }
            let path = match &face.source {
                fontdb::Source::File(path) | fontdb::Source::SharedFile(path, _) => path.clone(),
                _ => return None,
            };
            let rank = if family.contains("sans") && !family.contains("mono") {
                0
            } else {
                1
            };
            Some((rank, path))
        })
        .collect::<Vec<_>>();
    candidates.sort();
    candidates.into_iter().next().map(|(_, path)| path)
}

/// A wide flag with three horizontal stripes.
pub(crate) const STRIPES_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="150" viewBox="0 0 3 1.5">
  <rect width="3" height="0.5" fill="#ff0000"/>
  <rect y="0.5" width="3" height="0.5" fill="#00ff00"/>
  <rect y="1" width="3" height="0.5" fill="#0000ff"/>
</svg>"##;

/// A square flag with a single solid fill.
pub(crate) const SQUARE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <rect width="10" height="10" fill="#336699"/>
</svg>"##;

/// A scratch directory under `target/`, emptied on every call.
pub(crate) fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_fixtures").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
