//! Mask extraction from painted images.
//!
//! The mask image is normalized to RGB, resized to the reference grid shape
//! when its pixel dimensions differ, and thresholded against a sentinel
//! colour. Matching is exact: a pixel one step off the sentinel is not
//! selected.

use std::path::Path;

use image::{imageops, DynamicImage, RgbImage};
use tracing::{debug, info};

use crate::config::ResampleFilter;
use crate::error::Result;
use crate::types::{Mask, Shape};

/// Decode an image file of any format supported by the `image` crate.
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage> {
    let path = path.as_ref();
    let img = image::open(path)?;
    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "Loaded mask image"
    );
    Ok(img)
}

/// Derive a mask of shape `reference` from `image`.
///
/// Alpha is dropped and grayscale replicated before comparison, so every
/// image is compared on exactly three channels.
pub fn extract(
    image: &DynamicImage,
    reference: Shape,
    sentinel: [u8; 3],
    filter: ResampleFilter,
) -> Result<Mask> {
    let rgb = image.to_rgb8();
    let rgb = fit_to_shape(rgb, reference, filter);

    let cells: Vec<bool> = rgb.pixels().map(|px| px.0 == sentinel).collect();
    let mask = Mask::new(reference, cells)?;
    debug!(
        selected = mask.selected_count(),
        coverage = mask.coverage(),
        "Extracted mask"
    );
    Ok(mask)
}

/// Load `path` and derive a mask in one step.
pub fn extract_from_file(
    path: impl AsRef<Path>,
    reference: Shape,
    sentinel: [u8; 3],
    filter: ResampleFilter,
) -> Result<Mask> {
    let image = load_image(path)?;
    extract(&image, reference, sentinel, filter)
}

fn fit_to_shape(rgb: RgbImage, reference: Shape, filter: ResampleFilter) -> RgbImage {
    let native = Shape::new(rgb.height() as usize, rgb.width() as usize);
    if native == reference {
        return rgb;
    }

    info!(
        from = %native,
        to = %reference,
        filter = %filter,
        "Resizing mask to match heightmap dimensions"
    );
    imageops::resize(
        &rgb,
        reference.cols as u32,
        reference.rows as u32,
        filter.filter_type(),
    )
}
