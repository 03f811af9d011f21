//! Difference statistics between two grids.
//!
//! NaN and infinities are not filtered out. A NaN anywhere in the difference
//! makes every statistic NaN; an infinity turns the mean and standard
//! deviation infinite or NaN following ordinary float arithmetic.

use serde::{Deserialize, Serialize};

use crate::error::{HeightmapError, Result};
use crate::types::{Grid, Shape};

/// Elementwise `source - target` plus its summary statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceReport {
    pub difference: Grid,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl DifferenceReport {
    /// Scalar part of the report, suitable for logging or serialization.
    pub fn summary(&self) -> DifferenceSummary {
        DifferenceSummary {
            shape: self.difference.shape(),
            mean: self.mean,
            std_dev: self.std_dev,
            min: self.min,
            max: self.max,
        }
    }
}

/// The statistics of a [`DifferenceReport`] without the difference array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferenceSummary {
    pub shape: Shape,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Compare two equally shaped grids.
pub fn compare(target: &Grid, source: &Grid) -> Result<DifferenceReport> {
    if source.shape() != target.shape() {
        return Err(HeightmapError::shape_mismatch(
            "compare",
            target.shape(),
            source.shape(),
        ));
    }

    let values: Vec<f64> = source
        .data()
        .iter()
        .zip(target.data())
        .map(|(s, t)| s - t)
        .collect();

    let (mean, std_dev) = mean_and_std(&values);
    let (min, max) = min_max(&values);
    let difference = Grid::new(target.shape(), values)?;

    Ok(DifferenceReport {
        difference,
        mean,
        std_dev,
        min,
        max,
    })
}

/// Mean and population standard deviation. NaN for an empty slice.
fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}

/// Minimum and maximum, propagating NaN. NaN for an empty slice.
fn min_max(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    // f64::min/max skip NaN, which would hide missing data
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            if v.is_nan() || lo.is_nan() {
                (f64::NAN, f64::NAN)
            } else {
                (lo.min(v), hi.max(v))
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_constant_offset() {
        let target = Grid::from_rows(&[vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let source = Grid::from_rows(&[vec![2.0, 2.0], vec![2.0, 2.0]]).unwrap();

        let report = compare(&target, &source).unwrap();
        assert_eq!(report.difference.data(), &[2.0, 2.0, 2.0, 2.0]);
        assert_eq!(report.mean, 2.0);
        assert_eq!(report.std_dev, 0.0);
        assert_eq!(report.min, 2.0);
        assert_eq!(report.max, 2.0);
    }

    #[test]
    fn test_compare_direction_is_source_minus_target() {
        let target = Grid::from_rows(&[vec![10.0, 5.0]]).unwrap();
        let source = Grid::from_rows(&[vec![4.0, 9.0]]).unwrap();

        let report = compare(&target, &source).unwrap();
        assert_eq!(report.difference.data(), &[-6.0, 4.0]);
        assert_eq!(report.min, -6.0);
        assert_eq!(report.max, 4.0);
        assert_eq!(report.mean, -1.0);
        // population std of [-6, 4] around -1 is 5
        assert!((report.std_dev - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_compare_propagates_nan() {
        let target = Grid::from_rows(&[vec![0.0, 0.0, 0.0]]).unwrap();
        let source = Grid::from_rows(&[vec![1.0, f64::NAN, 3.0]]).unwrap();

        let report = compare(&target, &source).unwrap();
        assert!(report.mean.is_nan());
        assert!(report.std_dev.is_nan());
        assert!(report.min.is_nan());
        assert!(report.max.is_nan());
    }

    #[test]
    fn test_compare_infinity() {
        let target = Grid::from_rows(&[vec![0.0, 0.0]]).unwrap();
        let source = Grid::from_rows(&[vec![1.0, f64::INFINITY]]).unwrap();

        let report = compare(&target, &source).unwrap();
        assert_eq!(report.max, f64::INFINITY);
        assert_eq!(report.min, 1.0);
        assert_eq!(report.mean, f64::INFINITY);
    }

    #[test]
    fn test_compare_shape_mismatch() {
        let target = Grid::from_rows(&[vec![0.0, 0.0], vec![0.0, 0.0]]).unwrap();
        let source = Grid::from_rows(&[vec![0.0, 0.0, 0.0, 0.0]]).unwrap();

        let err = compare(&target, &source).unwrap_err();
        assert!(matches!(err, HeightmapError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_summary_serializes() {
        let target = Grid::from_rows(&[vec![1.0, 2.0]]).unwrap();
        let source = Grid::from_rows(&[vec![2.0, 4.0]]).unwrap();
        let summary = compare(&target, &source).unwrap().summary();

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["shape"]["rows"], 1);
        assert_eq!(json["shape"]["cols"], 2);
        assert_eq!(json["mean"], 1.5);
        assert_eq!(json["max"], 2.0);
    }
}
