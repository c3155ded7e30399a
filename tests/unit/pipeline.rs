use std::{path::Path, sync::Arc};

use super::*;
use crate::{
    foundation::core::Rgba8,
    render::grid::GridLayout,
    test_fixtures::{SQUARE_SVG, STRIPES_SVG, scratch_dir, system_font_path},
};

fn prepared(label: &str, svg: &str) -> PreparedSource {
    let tree = usvg::Tree::from_data(svg.as_bytes(), &usvg::Options::default()).unwrap();
    PreparedSource {
        image: SourceImage::from_path(PathBuf::from(format!("{label}.svg"))),
        tree: Arc::new(tree),
    }
}

fn config_for(dir: &Path, font_path: PathBuf) -> Config {
    Config {
        images_dir: dir.join("flags"),
        font_path,
        themes: vec![
            Theme::dark(dir.join("out").join("dark.png")),
            Theme::light(dir.join("out").join("light.png")),
        ],
        ..Config::default()
    }
}

#[test]
fn thread_pool_validates_and_honours_count() {
    assert!(matches!(
        build_thread_pool(Some(0)).unwrap_err(),
        FlagGridError::Validation(_)
    ));
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
    assert!(build_thread_pool(None).is_ok());
}

#[test]
fn render_theme_rejects_empty_input() {
    let pool = build_thread_pool(Some(1)).unwrap();
    let err = render_theme(
        &[],
        &LabelFont::without_faces(),
        &Theme::dark("unused.png"),
        &GridGeometry::default(),
        &pool,
    )
    .unwrap_err();
    assert!(matches!(err, FlagGridError::EmptyInput(_)));
}

#[test]
fn render_theme_is_independent_of_thread_count() {
    let sources = (0..13)
        .map(|i| {
            let svg = if i % 2 == 0 { STRIPES_SVG } else { SQUARE_SVG };
            prepared(&format!("flag{i:02}"), svg)
        })
        .collect::<Vec<_>>();
    let font = LabelFont::without_faces();
    let theme = Theme::light("unused.png");
    let geometry = GridGeometry::default();

    let seq = render_theme(
        &sources,
        &font,
        &theme,
        &geometry,
        &build_thread_pool(Some(1)).unwrap(),
    )
    .unwrap();
    let par = render_theme(
        &sources,
        &font,
        &theme,
        &geometry,
        &build_thread_pool(Some(4)).unwrap(),
    )
    .unwrap();

    let layout = GridLayout::new(13, &geometry).unwrap();
    assert_eq!(seq.dimensions(), (layout.width(), layout.height()));
    assert_eq!(seq.as_raw(), par.as_raw());

    // Second cell holds the square flag, filled edge to edge.
    let cell = layout.cell(1).unwrap();
    assert_eq!(
        seq.get_pixel(cell.left as u32, cell.top as u32).0,
        [0x33, 0x66, 0x99, 255]
    );
}

#[test]
fn run_fails_on_missing_directory() {
    let dir = scratch_dir("pipeline_missing");
    let cfg = config_for(&dir, dir.join("font.ttf"));
    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, FlagGridError::NotFound(_)));
}

#[test]
fn run_fails_on_empty_directory_without_writing() {
    let dir = scratch_dir("pipeline_empty");
    std::fs::create_dir_all(dir.join("flags")).unwrap();
    std::fs::write(dir.join("flags").join("readme.txt"), "not a flag").unwrap();
    let cfg = config_for(&dir, dir.join("font.ttf"));

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, FlagGridError::EmptyInput(_)));
    assert!(!dir.join("out").join("dark.png").exists());
    assert!(!dir.join("out").join("light.png").exists());
}

#[test]
fn run_fails_on_missing_font() {
    let dir = scratch_dir("pipeline_no_font");
    std::fs::create_dir_all(dir.join("flags")).unwrap();
    std::fs::write(dir.join("flags").join("a.svg"), SQUARE_SVG).unwrap();
    let cfg = config_for(&dir, dir.join("missing.ttf"));

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, FlagGridError::FontLoad(_)));
}

#[test]
fn run_fails_on_invalid_svg() {
    let Some(font_path) = system_font_path() else {
        eprintln!("no system font installed; skipping");
        return;
    };
    let dir = scratch_dir("pipeline_bad_svg");
    std::fs::create_dir_all(dir.join("flags")).unwrap();
    std::fs::write(dir.join("flags").join("good.svg"), SQUARE_SVG).unwrap();
    std::fs::write(dir.join("flags").join("bad.svg"), "<svg").unwrap();

    let err = run(&config_for(&dir, font_path)).unwrap_err();
    assert!(matches!(err, FlagGridError::Decode(_)));
    assert!(err.to_string().contains("bad.svg"));
}

#[test]
fn run_writes_one_grid_per_theme() {
    let Some(font_path) = system_font_path() else {
        eprintln!("no system font installed; skipping");
        return;
    };
    let dir = scratch_dir("pipeline_ok");
    std::fs::create_dir_all(dir.join("flags")).unwrap();
    for name in ["b", "A", "c"] {
        std::fs::write(dir.join("flags").join(format!("{name}.svg")), STRIPES_SVG).unwrap();
    }

    let mut cfg = config_for(&dir, font_path);
    cfg.geometry.flags_per_row = 2;
    let report = run(&cfg).unwrap();

    assert_eq!(report.images, 3);
    assert_eq!(report.outputs.len(), 2);
    assert_eq!(report.outputs[0].theme, "dark");
    assert_eq!(report.outputs[1].theme, "light");

    let layout = GridLayout::new(3, &cfg.geometry).unwrap();
    for out in &report.outputs {
        assert_eq!((out.width, out.height), (layout.width(), layout.height()));
        let img = image::open(&out.path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (layout.width(), layout.height()));
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    let dark = image::open(&report.outputs[0].path).unwrap().to_rgba8();
    let light = image::open(&report.outputs[1].path).unwrap().to_rgba8();
    assert_ne!(dark.as_raw(), light.as_raw());
    assert_eq!(cfg.themes[0].text_color, Rgba8::WHITE);
}
