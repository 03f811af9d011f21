//! Common test fixtures for heightmap tests.
//!
//! Grid files are produced as text here rather than through the codec under
//! test, so codec tests compare against an independent rendering.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

/// Pure red, the default mask sentinel.
pub const RED: [u8; 3] = [255, 0, 0];

/// Pure black, used as mask background.
pub const BLACK: [u8; 3] = [0, 0, 0];

/// Header lines in the common ESRI ASCII layout.
pub fn sample_header(rows: usize, cols: usize) -> Vec<String> {
    vec![
        format!("ncols        {}", cols),
        format!("nrows        {}", rows),
        "xllcorner    512000.000000".to_string(),
        "yllcorner    6780000.000000".to_string(),
        "cellsize     2.000000".to_string(),
        "NODATA_value -9999".to_string(),
    ]
}

/// Header lines with irregular spacing and a trailing tab.
pub fn irregular_header() -> Vec<String> {
    vec![
        "NCOLS 4".to_string(),
        "  NROWS\t3".to_string(),
        "XLLCENTER -12.5   ".to_string(),
        "YLLCENTER 44.25\t".to_string(),
        "CELLSIZE 0.000833333333".to_string(),
        "nodata_value  -32768".to_string(),
    ]
}

/// Render a grid file body in the plain space-separated layout.
pub fn render_grid_text(header: &[String], rows: &[Vec<f64>]) -> String {
    let mut text = String::new();
    for line in header {
        text.push_str(line);
        text.push('\n');
    }
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&cells.join(" "));
        text.push('\n');
    }
    text
}

/// Write a grid file into `dir` and return its path.
pub fn write_grid_file(dir: &Path, name: &str, header: &[String], rows: &[Vec<f64>]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, render_grid_text(header, rows)).expect("Failed to write grid fixture");
    path
}

/// Build an RGB image from a row-major pixel list.
pub fn rgb_image(width: u32, height: u32, pixels: &[[u8; 3]]) -> RgbImage {
    assert_eq!(pixels.len(), (width * height) as usize, "pixel count mismatch");
    RgbImage::from_fn(width, height, |x, y| Rgb(pixels[(y * width + x) as usize]))
}

/// Build a mask image painting `RED` where `selection` is true, black elsewhere.
pub fn selection_image(selection: &[Vec<bool>]) -> RgbImage {
    let height = selection.len() as u32;
    let width = selection.first().map_or(0, Vec::len) as u32;
    RgbImage::from_fn(width, height, |x, y| {
        if selection[y as usize][x as usize] {
            Rgb(RED)
        } else {
            Rgb(BLACK)
        }
    })
}

/// Save an image into `dir` (format taken from the extension) and return its path.
pub fn write_image_file(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    image.save(&path).expect("Failed to write image fixture");
    path
}
