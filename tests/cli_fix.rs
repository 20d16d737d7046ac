//! CLI integration tests for `pxfix fix`
//!
//! These tests run the binary on generated fake-pixel images and check the
//! saved PNGs and exit codes.

use image::{Rgba, RgbaImage};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Get the path to the pxfix binary
fn pxfix_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_pxfix"))
}

/// Run pxfix inside `dir` with config discovery confined to it
fn run_in(dir: &Path, args: &[&str]) -> Output {
    Command::new(pxfix_binary())
        .args(args)
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute pxfix")
}

/// Color of logical pixel (x, y) in the generated art
fn logical_color(x: u32, y: u32) -> Rgba<u8> {
    Rgba([(x * 30) as u8, (y * 30) as u8, 100, 255])
}

/// Write `logical` x `logical` pixel art upscaled by `cell` to `dir/name`
fn write_fake_pixel_art(dir: &Path, name: &str, logical: u32, cell: u32) -> PathBuf {
    let size = logical * cell;
    let image = RgbaImage::from_fn(size, size, |x, y| logical_color(x / cell, y / cell));
    let path = dir.join(name);
    image.save(&path).expect("Failed to write fixture");
    path
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_fix_recovers_logical_pixels() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved: hero_pixel.png"));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (8, 8));
    for y in 0..8 {
        for x in 0..8 {
            assert_eq!(result.get_pixel(x, y), &logical_color(x, y), "pixel ({}, {})", x, y);
        }
    }
}

#[test]
fn test_fix_scale_multiplies_saved_size() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--scale", "4"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap();
    assert_eq!((result.width(), result.height()), (32, 32));
}

#[test]
fn test_fix_output_directory() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "-o", "out/"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(temp.path().join("out").join("hero_pixel.png").exists());
}

#[test]
fn test_fix_explicit_output_file() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "-o", "sprites/clean.png"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(temp.path().join("sprites").join("clean.png").exists());
}

#[test]
fn test_fix_manual_grid_and_size() {
    let temp = TempDir::new().unwrap();
    // 4x4 logical pixels at 6px each, not one of the estimator's candidates
    write_fake_pixel_art(temp.path(), "odd.png", 4, 6);

    let output =
        run_in(temp.path(), &["fix", "odd.png", "-g", "6", "--width", "4", "--height", "4"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("odd_pixel.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (4, 4));
    assert_eq!(result.get_pixel(3, 2), &logical_color(3, 2));
}

#[test]
fn test_fix_lenient_clamps_output_and_warns() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--width", "300"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(stderr(&output).contains("Warning:"));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (256, 8));
    assert_eq!(result.get_pixel(7, 0), &logical_color(7, 0));
    assert_eq!(result.get_pixel(8, 0), &Rgba([0, 0, 0, 0]));
}

#[test]
fn test_fix_lenient_clamps_offset() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "-x", "20"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(stdout(&output).contains("offset (7, 0)"));
}

#[test]
fn test_fix_strict_rejects_offset_past_cell() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "-g", "8", "-x", "8", "--strict"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Error:"));
    assert!(!temp.path().join("hero_pixel.png").exists());
}

#[test]
fn test_fix_strict_rejects_oversized_output() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--width", "300", "--strict"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_fix_max_output_override() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output =
        run_in(temp.path(), &["fix", "hero.png", "--width", "300", "--max-output", "512", "--strict"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap();
    assert_eq!(result.width(), 300);
}

#[test]
fn test_fix_preview_written() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--preview"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(stdout(&output).contains("Saved: hero_preview.png"));

    // Default preview scale is 8
    let preview = image::open(temp.path().join("hero_preview.png")).unwrap();
    assert_eq!((preview.width(), preview.height()), (64, 64));
}

#[test]
fn test_fix_fallback_uses_config_default_output() {
    let temp = TempDir::new().unwrap();
    let image = RgbaImage::from_pixel(100, 77, Rgba([10, 20, 30, 255]));
    image.save(temp.path().join("blob.png")).unwrap();
    fs::write(
        temp.path().join("pxfix.toml"),
        "[defaults]\noutput_width = 16\noutput_height = 10\n",
    )
    .unwrap();

    let output = run_in(temp.path(), &["fix", "blob.png"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("blob_pixel.png")).unwrap().to_rgba8();
    assert_eq!(result.dimensions(), (16, 10));
    assert_eq!(result.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
}

#[test]
fn test_fix_invalid_config_is_rejected() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);
    fs::write(temp.path().join("bad.toml"), "[defaults]\npreview_scale = 0\n").unwrap();

    let output = run_in(temp.path(), &["fix", "hero.png", "--config", "bad.toml"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("preview_scale"));
}

#[test]
fn test_fix_missing_input() {
    let temp = TempDir::new().unwrap();

    let output = run_in(temp.path(), &["fix", "nope.png"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Cannot open input file 'nope.png'"));
}

#[test]
fn test_fix_transparent_background_is_not_reported_missing() {
    let temp = TempDir::new().unwrap();
    // Left half fully transparent, grid covers every output pixel
    let image = RgbaImage::from_fn(64, 64, |x, y| {
        if x < 32 {
            Rgba([0, 0, 0, 0])
        } else {
            logical_color(x / 8, y / 8)
        }
    });
    image.save(temp.path().join("sprite.png")).unwrap();

    let output = run_in(temp.path(), &["fix", "sprite.png"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(!stderr(&output).contains("Warning:"), "unexpected warning: {}", stderr(&output));

    let result = image::open(temp.path().join("sprite_pixel.png")).unwrap().to_rgba8();
    assert_eq!(result.get_pixel(0, 0), &Rgba([0, 0, 0, 0]));
    assert_eq!(result.get_pixel(4, 0), &logical_color(4, 0));
}

#[test]
fn test_fix_small_max_output_without_config() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--max-output", "16"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap();
    assert_eq!((result.width(), result.height()), (8, 8));
}

#[test]
fn test_fix_max_output_below_exact_estimate() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--max-output", "4"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));

    let result = image::open(temp.path().join("hero_pixel.png")).unwrap();
    assert_eq!((result.width(), result.height()), (4, 4));
}

#[test]
fn test_fix_zero_max_output_names_the_flag() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "--max-output", "0"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("--max-output"));
    assert!(!stderr(&output).contains("pxfix.toml"));
}

#[test]
fn test_fix_preview_follows_output_directory() {
    let temp = TempDir::new().unwrap();
    write_fake_pixel_art(temp.path(), "hero.png", 8, 8);

    let output = run_in(temp.path(), &["fix", "hero.png", "-o", "out/", "--preview"]);
    assert!(output.status.success(), "Fix failed: {}", stderr(&output));
    assert!(temp.path().join("out").join("hero_pixel.png").exists());
    assert!(temp.path().join("out").join("hero_preview.png").exists());
    assert!(!temp.path().join("hero_preview.png").exists());
}
