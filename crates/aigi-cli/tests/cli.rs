use std::path::{Path, PathBuf};

use assert_cmd::Command;
use image::{Rgb, RgbImage, Rgba, RgbaImage};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::Value;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("aigi"))
}

fn write_png(dir: &Path, name: &str, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(4, 3, Rgba(color))
        .save(&path)
        .expect("write png");
    path
}

fn save_sample(temp: &TempDir) -> PathBuf {
    let red = write_png(temp.path(), "a.png", [255, 0, 0, 255]);
    let green = write_png(temp.path(), "b.png", [0, 255, 0, 128]);
    let output = temp.path().join("frames.aigi");

    cmd()
        .arg("save")
        .arg(&output)
        .arg("--images")
        .arg(red)
        .arg(green)
        .arg("--metadata")
        .arg(r#"{"fps": 12, "name": "demo"}"#)
        .assert()
        .success()
        .stderr(contains("Saved 2 images to"));
    output
}

#[test]
fn help_lists_commands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("save").and(contains("load")).and(contains("info")));
}

#[test]
fn save_then_load_prints_metadata() {
    let temp = TempDir::new().expect("tempdir");
    let output = save_sample(&temp);

    let assert = cmd()
        .arg("load")
        .arg(&output)
        .assert()
        .success()
        .stderr(contains("Loaded 2 images from"));
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let metadata: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(metadata["fps"], 12);
    assert_eq!(metadata["name"], "demo");
}

#[test]
fn save_without_images_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("save")
        .arg(temp.path().join("empty.aigi"))
        .assert()
        .failure()
        .stderr(contains("error: no images provided").and(contains("hint:")));
}

#[test]
fn save_rejects_invalid_metadata() {
    let temp = TempDir::new().expect("tempdir");
    let image = write_png(temp.path(), "a.png", [1, 2, 3, 4]);
    cmd()
        .arg("save")
        .arg(temp.path().join("out.aigi"))
        .arg("--images")
        .arg(image)
        .arg("--metadata")
        .arg("{not json")
        .assert()
        .failure()
        .stderr(contains("invalid --metadata JSON"));
}

#[test]
fn save_expands_glob_in_sorted_order() {
    let temp = TempDir::new().expect("tempdir");
    write_png(temp.path(), "frame_2.png", [0, 0, 2, 255]);
    write_png(temp.path(), "frame_1.png", [0, 0, 1, 255]);
    write_png(temp.path(), "frame_3.png", [0, 0, 3, 255]);
    let output = temp.path().join("glob.aigi");
    let pattern = temp.path().join("frame_*.png");

    cmd()
        .arg("save")
        .arg(&output)
        .arg("--images")
        .arg(pattern.to_string_lossy().to_string())
        .arg("--quiet")
        .assert()
        .success()
        .stderr(predicates::str::contains("Saved").not());

    let extract = temp.path().join("out");
    cmd()
        .arg("load")
        .arg(&output)
        .arg("--extract")
        .arg(&extract)
        .arg("--quiet")
        .assert()
        .success();

    for index in 1..=3u8 {
        let path = extract.join(format!("image_{:03}.png", index));
        let decoded = image::open(&path).expect("extracted png").to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, index, 255]));
    }
}

#[test]
fn load_extracts_rgba_images() {
    let temp = TempDir::new().expect("tempdir");
    let rgb = temp.path().join("rgb.png");
    RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]))
        .save(&rgb)
        .expect("write png");
    let output = temp.path().join("rgb.aigi");
    cmd()
        .arg("save")
        .arg(&output)
        .arg("--images")
        .arg(&rgb)
        .assert()
        .success();

    let extract = temp.path().join("extracted");
    cmd()
        .arg("load")
        .arg(&output)
        .arg("--extract")
        .arg(&extract)
        .assert()
        .success()
        .stderr(contains("OK: 1 images extracted"));

    let decoded = image::open(extract.join("image_001.png")).expect("extracted png");
    assert_eq!(decoded.color(), image::ColorType::Rgba8);
    assert_eq!(decoded.to_rgba8().get_pixel(1, 1), &Rgba([10, 20, 30, 255]));
}

#[test]
fn info_json_reports_entries() {
    let temp = TempDir::new().expect("tempdir");
    let output = save_sample(&temp);

    let assert = cmd().arg("info").arg(&output).arg("--json").assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 stdout");
    let info: Value = serde_json::from_str(stdout.trim()).expect("valid json");
    assert_eq!(info["version"], 1);
    assert_eq!(info["image_count"], 2);
    assert_eq!(info["entries"].as_array().map(Vec::len), Some(2));
}

#[test]
fn load_rejects_non_container() {
    let temp = TempDir::new().expect("tempdir");
    let bogus = write_png(temp.path(), "bogus.png", [0, 0, 0, 0]);
    cmd()
        .arg("load")
        .arg(bogus)
        .assert()
        .failure()
        .code(2)
        .stderr(contains("error:").and(contains("invalid signature")));
}

#[test]
fn missing_input_shows_error_and_hint() {
    let temp = TempDir::new().expect("tempdir");
    cmd()
        .arg("info")
        .arg(temp.path().join("missing.aigi"))
        .assert()
        .failure()
        .stderr(contains("error: input file not found").and(contains("hint:")));
}

#[test]
fn save_accepts_bmp_and_jpeg_inputs() {
    let temp = TempDir::new().expect("tempdir");
    let bmp = temp.path().join("checker.bmp");
    RgbImage::from_fn(5, 4, |x, y| {
        if (x + y) % 2 == 0 {
            Rgb([250, 10, 10])
        } else {
            Rgb([10, 10, 250])
        }
    })
    .save(&bmp)
    .expect("write bmp");
    let jpeg = temp.path().join("flat.jpg");
    RgbImage::from_pixel(16, 8, Rgb([128, 128, 128]))
        .save(&jpeg)
        .expect("write jpeg");
    let output = temp.path().join("mixed.aigi");

    cmd()
        .arg("save")
        .arg(&output)
        .arg("--images")
        .arg(&bmp)
        .arg(&jpeg)
        .assert()
        .success()
        .stderr(contains("Saved 2 images to"));

    let extract = temp.path().join("mixed");
    cmd()
        .arg("load")
        .arg(&output)
        .arg("--extract")
        .arg(&extract)
        .arg("--quiet")
        .assert()
        .success();

    let first = image::open(extract.join("image_001.png"))
        .expect("extracted bmp")
        .to_rgba8();
    assert_eq!(first.dimensions(), (5, 4));
    assert_eq!(first.get_pixel(0, 0), &Rgba([250, 10, 10, 255]));
    assert_eq!(first.get_pixel(1, 0), &Rgba([10, 10, 250, 255]));

    let second = image::open(extract.join("image_002.png"))
        .expect("extracted jpeg")
        .to_rgba8();
    assert_eq!(second.dimensions(), (16, 8));
    assert!(second.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn long_version_adds_build_details() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains(" (")).and(contains(", ")));
    cmd()
        .arg("-V")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")).and(contains("(").not()));
}
