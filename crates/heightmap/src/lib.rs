//! Heightmap merging with painted masks.
//!
//! This crate merges two elevation grids stored in a six-line-header text
//! format. Cells painted in a sentinel colour on a mask image are taken from
//! the source grid, everything else from the target grid. It also reports how
//! the two inputs differ.
//!
//! # Architecture
//!
//! ```text
//! codec::read(target), codec::read(source)
//!      │
//!      ├─► stats::compare ─► DifferenceReport ─► MergeReporter
//!      │
//!      ├─► mask::extract(image, target.shape()) ─► Mask
//!      │
//!      └─► compositor::merge(target, source, mask) ─► codec::write
//! ```
//!
//! # Example
//!
//! ```ignore
//! use heightmap::{codec, compositor, mask, MergeConfig};
//!
//! let config = MergeConfig::default();
//! let (header, target) = codec::read("target.asc")?;
//! let (_, source) = codec::read("source.asc")?;
//! let mask = mask::extract_from_file(
//!     "mask.png",
//!     target.shape(),
//!     config.sentinel_color,
//!     config.resample_filter,
//! )?;
//! let merged = compositor::merge(&target, &source, &mask)?;
//! codec::write("merged.asc", &header, &merged)?;
//! ```

pub mod codec;
pub mod compositor;
pub mod config;
pub mod error;
pub mod mask;
pub mod pipeline;
pub mod report;
pub mod stats;
pub mod types;

// Re-export commonly used types at crate root
pub use config::{MergeConfig, ResampleFilter, DEFAULT_SENTINEL};
pub use error::{HeightmapError, Result};
pub use pipeline::{compare_files, merge_files, MergeOutcome, MergeRequest};
pub use report::{
    JsonSummaryReporter, MergeArtifacts, MergeReporter, NullReporter, ReporterChain,
    TracingReporter,
};
pub use stats::{DifferenceReport, DifferenceSummary};
pub use types::{Grid, Header, Mask, Shape, HEADER_LINES};
