#![allow(dead_code)]

use std::path::Path;

#[path = "../../src/test_fixtures.rs"]
mod fixtures;

pub(crate) use fixtures::{STRIPES_SVG, scratch_dir, system_font_path};

pub const TALL_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="40">
  <rect width="20" height="40" fill="#ffcc00"/>
  <circle cx="10" cy="20" r="6" fill="#222222"/>
</svg>"##;

/// Write one flag per name into `dir`, alternating between the two fixtures.
pub fn write_flags(dir: &Path, names: &[&str]) {
    std::fs::create_dir_all(dir).unwrap();
    for (i, name) in names.iter().enumerate() {
        let svg = if i % 2 == 0 { STRIPES_SVG } else { TALL_SVG };
        std::fs::write(dir.join(format!("{name}.svg")), svg).unwrap();
    }
}
