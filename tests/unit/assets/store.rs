use std::io::Cursor;
use std::time::{Duration, Instant};

use super::*;

struct MemFetcher(Vec<u8>);

impl ImageFetcher for MemFetcher {
    fn fetch(&self, _source: &str) -> SceneResult<Vec<u8>> {
        Ok(self.0.clone())
    }
}

struct BrokenFetcher;

impl ImageFetcher for BrokenFetcher {
    fn fetch(&self, source: &str) -> SceneResult<Vec<u8>> {
        Err(SceneError::asset(format!("unreachable: {source}")))
    }
}

fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 3, image::Rgba([255, 0, 0, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn blocking_load_becomes_ready() {
    let asset = ImageAsset::load_blocking("mem.png", &MemFetcher(tiny_png()));
    assert!(asset.is_ready());
    let img = asset.image().unwrap();
    assert_eq!((img.width, img.height), (2, 3));
}

#[test]
fn failed_fetch_is_permanently_not_ready() {
    let asset = ImageAsset::load_blocking("remote.png", &BrokenFetcher);
    assert!(!asset.is_ready());
    assert!(asset.has_failed());
    assert!(asset.image().is_none());
}

#[test]
fn undecodable_bytes_fail() {
    let asset = ImageAsset::load_blocking("junk.png", &MemFetcher(b"junk".to_vec()));
    assert!(asset.has_failed());
}

#[test]
fn background_load_settles() {
    let asset = ImageAsset::spawn_load("mem.png", Arc::new(MemFetcher(tiny_png())));
    let deadline = Instant::now() + Duration::from_secs(5);
    while !asset.is_settled() && Instant::now() < deadline {
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(asset.is_ready());
}

#[test]
fn fs_fetcher_missing_file_is_asset_error() {
    let fetcher = FsFetcher::new(std::env::temp_dir());
    let err = fetcher.fetch("definitely-missing-sakura-asset.png").unwrap_err();
    assert!(matches!(err, SceneError::Asset(_)));
}
