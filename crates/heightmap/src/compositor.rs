//! Mask-driven compositing of two grids.

use crate::error::{HeightmapError, Result};
use crate::types::{Grid, Mask};

/// Merge `source` into a copy of `target` wherever `mask` is set.
///
/// All three inputs must share one shape; the check happens before any cell
/// is touched. The inputs are never modified.
pub fn merge(target: &Grid, source: &Grid, mask: &Mask) -> Result<Grid> {
    let shape = target.shape();
    if source.shape() != shape {
        return Err(HeightmapError::shape_mismatch("merge", shape, source.shape()));
    }
    if mask.shape() != shape {
        return Err(HeightmapError::shape_mismatch("merge", shape, mask.shape()));
    }

    let mut merged = target.clone();
    for ((out, &src), &selected) in merged
        .data_mut()
        .iter_mut()
        .zip(source.data())
        .zip(mask.cells())
    {
        if selected {
            *out = src;
        }
    }

    Ok(merged)
}
