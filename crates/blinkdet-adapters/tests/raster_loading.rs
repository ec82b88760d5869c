//! Integration tests for image loading and diagnostic output.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use blinkdet_adapters::{load_image, DiagnosticWriter};
use blinkdet_test_support::SyntheticEyeBuilder;
use image::ImageFormat;
use std::path::Path;
use tempfile::TempDir;

fn write_fixture(dir: &Path, name: &str, format: ImageFormat) -> std::path::PathBuf {
    let path = dir.join(name);
    SyntheticEyeBuilder::open()
        .image
        .save_with_format(&path, format)
        .expect("should write fixture");
    path
}

#[test]
fn test_load_png() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "eye.png", ImageFormat::Png);

    let info = load_image(&path).expect("should load PNG");
    assert_eq!(info.width, 120);
    assert_eq!(info.height, 120);
    assert!(info.path.ends_with("eye.png"));
}

#[test]
fn test_load_jpeg() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "eye.jpg", ImageFormat::Jpeg);

    let info = load_image(&path).expect("should load JPEG");
    assert_eq!((info.width, info.height), (120, 120));
}

#[test]
fn test_load_bmp() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "eye.bmp", ImageFormat::Bmp);

    let info = load_image(&path).expect("should load BMP");
    assert_eq!((info.width, info.height), (120, 120));
}

#[test]
fn test_png_round_trip_preserves_pixels() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(dir.path(), "eye.png", ImageFormat::Png);

    let info = load_image(&path).unwrap();
    assert_eq!(
        info.image.to_rgb8().as_raw(),
        SyntheticEyeBuilder::open().image.to_rgb8().as_raw()
    );
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "not an image").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(err.to_string().contains("Unsupported file type"));
}

#[test]
fn test_corrupt_image() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG garbage").unwrap();

    assert!(load_image(&path).is_err());
}

#[test]
fn test_missing_file() {
    let err = load_image(Path::new("/nonexistent/eye.png")).unwrap_err();
    assert!(format!("{err:#}").contains("Failed to open image"));
}

#[test]
fn test_diagnostic_written_as_png() {
    let dir = TempDir::new().unwrap();
    let writer = DiagnosticWriter::new(dir.path().join("debug")).unwrap();
    let diagnostic = image::RgbImage::from_pixel(6, 4, image::Rgb([255, 0, 0]));

    let path = writer
        .save(Path::new("photos/face.jpg"), 0, &diagnostic)
        .unwrap();

    assert_eq!(path.file_name().unwrap(), "face_eye0.png");
    let reloaded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(reloaded, diagnostic);
}
