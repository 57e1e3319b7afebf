//! Test fixtures: small images generated on the fly.

use std::path::{Path, PathBuf};

/// Solid-color SVG of the given size
pub fn solid_svg(width: u32, height: u32, color: &str) -> Vec<u8> {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><rect width="{width}" height="{height}" fill="{color}"/></svg>"#
    )
    .into_bytes()
}

/// SVG whose left half is black and right half white
pub fn split_svg(width: u32, height: u32) -> Vec<u8> {
    let half = width / 2;
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><rect width="{width}" height="{height}" fill="#ffffff"/><rect width="{half}" height="{height}" fill="#000000"/></svg>"##
    )
    .into_bytes()
}

/// Solid-color PNG of the given size
pub fn solid_png(width: u32, height: u32, r: u8, g: u8, b: u8) -> Vec<u8> {
    let mut pixmap = tiny_skia::Pixmap::new(width, height).unwrap();
    pixmap.fill(tiny_skia::Color::from_rgba8(r, g, b, 255));
    pixmap.encode_png().unwrap()
}

/// Write a directory of frames, one solid gray level per frame
pub fn frame_dir(root: &Path, levels: &[u8]) -> PathBuf {
    let dir = root.join("frames");
    std::fs::create_dir_all(&dir).unwrap();
    for (i, &level) in levels.iter().enumerate() {
        std::fs::write(
            dir.join(format!("frame_{i:03}.png")),
            solid_png(20, 20, level, level, level),
        )
        .unwrap();
    }
    dir
}

/// Settings JSON with a black-to-white gradient
pub const BW_CHECKERED_JSON: &str = r##"{
    "cellSize": 10,
    "colorMode": "checkered",
    "gradient": [
        {"position": 0, "color": "#000000"},
        {"position": 100, "color": "#ffffff"}
    ]
}"##;
