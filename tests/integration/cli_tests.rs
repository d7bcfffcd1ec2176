//! Path-based API and command-line tests.
//!
//! Tests verify:
//! - `detect_path`/`probe_path` open, probe and report files on disk
//! - Directory expansion order and failure reporting
//! - The `image-dims` binary's text and JSON output and exit status

use std::process::Command;

use image::ImageFormat as Encoder;

use image_dims::{collect_files, detect_path, probe_path, Dimensions, ImageFormat};

use super::test_utils::{avif, encode, exr, write_file};

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_image-dims"))
}

// =============================================================================
// Path API Tests
// =============================================================================

#[test]
fn test_detect_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "photo.jpg", &encode(200, 100, Encoder::Jpeg));

    assert_eq!(detect_path(&path).unwrap(), Dimensions::new(200, 100));
}

#[test]
fn test_probe_path_ignores_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "misnamed.png", &avif(64, 48));

    let info = probe_path(&path).unwrap();
    assert_eq!(info.format, ImageFormat::Avif);
    assert_eq!(info.dimensions, Dimensions::new(64, 48));
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.gif");

    let err = detect_path(&path).unwrap_err();
    assert_eq!(err.format, None);
    assert!(err.to_string().starts_with("Cannot read "));
}

#[test]
fn test_collect_and_probe_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "b.png", &encode(2, 3, Encoder::Png));
    write_file(dir.path(), "a.exr", &exr(4, 5, (0, 0)));
    write_file(dir.path(), "nested/c.bmp", &encode(6, 7, Encoder::Bmp));
    write_file(dir.path(), "nested/notes.txt", b"just some text, not an image");

    let results: Vec<_> = collect_files(&[dir.path()], false)
        .into_iter()
        .map(|file| probe_path(file.unwrap()))
        .collect();

    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap().format, ImageFormat::OpenExr);
    assert_eq!(results[1].as_ref().unwrap().format, ImageFormat::Png);
    assert_eq!(
        results[2].as_ref().unwrap().dimensions,
        Dimensions::new(6, 7)
    );
    assert!(results[3]
        .as_ref()
        .unwrap_err()
        .to_string()
        .starts_with("Unknown image format: "));
}

// =============================================================================
// Binary Tests
// =============================================================================

#[test]
fn test_binary_text_output() {
    let dir = tempfile::tempdir().unwrap();
    let gif = write_file(dir.path(), "a.gif", &encode(10, 20, Encoder::Gif));
    let qoi = write_file(dir.path(), "b.qoi", &encode(30, 40, Encoder::Qoi));

    let output = binary().arg(&gif).arg(&qoi).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("{} 10 20", gif.display()),
            format!("{} 30 40", qoi.display()),
        ]
    );
}

#[test]
fn test_binary_json_output() {
    let dir = tempfile::tempdir().unwrap();
    write_file(dir.path(), "x.tif", &encode(8, 9, Encoder::Tiff));

    let output = binary()
        .args(["--output", "json", "-j", "1"])
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["format"], "TIFF");
    assert_eq!(value["width"], 8);
    assert_eq!(value["height"], 9);
    assert!(value.get("error").is_none());
}

#[test]
fn test_binary_reports_failures() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_file(dir.path(), "good.png", &encode(1, 1, Encoder::Png));
    let bad = write_file(dir.path(), "bad.bin", b"0123456789abcdefghij0123456789");

    let output = binary().arg(&good).arg(&bad).output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim(), format!("{} 1 1", good.display()));

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains(&format!(
        "*** error: {} Unknown image format: {}",
        bad.display(),
        bad.display()
    )));
}

#[test]
fn test_binary_rejects_zero_jobs() {
    let output = binary().args(["-j", "0", "a.png"]).output().unwrap();
    assert!(!output.status.success());
}
