#![allow(dead_code)]

use std::{io::Cursor, path::{Path, PathBuf}};

pub fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "nounsmith_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

/// 32x32 PNG: a pure red band on rows 0..2, columns 10..22; transparent elsewhere.
pub fn write_hat_png(path: &Path) {
    let mut img = image::RgbaImage::new(32, 32);
    for y in 0..2 {
        for x in 10..22 {
            img.put_pixel(x, y, image::Rgba([255, 0, 0, 255]));
        }
    }
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

pub fn zero_entropy_hex() -> String {
    format!("0x{}", "00".repeat(32))
}
