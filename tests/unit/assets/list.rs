use std::path::PathBuf;

use super::*;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_list").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn touch(dir: &Path, name: &str) {
    std::fs::write(dir.join(name), b"<svg/>").unwrap();
}

fn labels(images: &[SourceImage]) -> Vec<&str> {
    images.iter().map(|i| i.label.as_str()).collect()
}

#[test]
fn sorts_by_lowercased_base_name() {
    let dir = fresh_dir("sorted");
    for name in ["germany.svg", "Austria.svg", "belgium.SVG", "Canada.Svg"] {
        touch(&dir, name);
    }

    let images = list_images(&dir).unwrap();
    assert_eq!(labels(&images), ["Austria", "belgium", "Canada", "germany"]);
    assert_eq!(images[1].path, dir.join("belgium.SVG"));

    let mut expected = labels(&images)
        .iter()
        .map(|l| l.to_lowercase())
        .collect::<Vec<_>>();
    expected.sort();
    let actual = labels(&images)
        .iter()
        .map(|l| l.to_lowercase())
        .collect::<Vec<_>>();
    assert_eq!(actual, expected);
}

#[test]
fn ignores_other_extensions_and_directories() {
    let dir = fresh_dir("filtered");
    touch(&dir, "flag.svg");
    touch(&dir, "flag.png");
    touch(&dir, "notes.txt");
    touch(&dir, "svg");
    std::fs::create_dir_all(dir.join("nested.svg")).unwrap();

    let images = list_images(&dir).unwrap();
    assert_eq!(labels(&images), ["flag"]);
}

#[test]
fn case_only_duplicates_keep_file_name_order() {
    let dir = fresh_dir("ties");
    touch(&dir, "pride.svg");
    touch(&dir, "Pride.svg");

    let images = list_images(&dir).unwrap();
    assert_eq!(labels(&images), ["Pride", "pride"]);
}

#[test]
fn empty_directory_is_not_an_error() {
    let dir = fresh_dir("empty");
    assert!(list_images(&dir).unwrap().is_empty());
}

#[test]
fn missing_directory_is_not_found() {
    let err = list_images(Path::new("target/unit_list/does-not-exist")).unwrap_err();
    assert!(matches!(err, FlagGridError::NotFound(_)));
}

#[test]
fn label_drops_only_the_last_extension() {
    let img = SourceImage::from_path(PathBuf::from("flags/trans.v2.svg"));
    assert_eq!(img.label, "trans.v2");
}
