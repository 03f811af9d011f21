//! File-level orchestration of compare and merge runs.
//!
//! ```text
//! target.asc ─┐
//!             ├─► codec::read ─► stats::compare ─► reporter.on_difference
//! source.asc ─┘        │
//!                      ▼
//! mask.png ──► mask::extract (resized to target shape)
//!                      │
//!                      ▼
//!             compositor::merge ─► codec::write ─► reporter.on_merge
//! ```

use std::path::{Path, PathBuf};

use tracing::info;

use crate::codec;
use crate::compositor;
use crate::config::MergeConfig;
use crate::error::Result;
use crate::mask;
use crate::report::{MergeArtifacts, MergeReporter};
use crate::stats::{self, DifferenceReport, DifferenceSummary};

/// Paths taking part in a merge run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRequest {
    /// Grid to be modified. Its header is written to the output.
    pub target: PathBuf,
    /// Grid that supplies values for masked cells.
    pub source: PathBuf,
    /// Painted image selecting the cells to replace.
    pub mask: PathBuf,
    /// Where the merged grid is written.
    pub output: PathBuf,
}

/// Result of a completed merge run.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    pub output: PathBuf,
    pub difference: DifferenceSummary,
    pub selected_cells: usize,
    pub coverage: f64,
}

/// Read two grids and compute their difference statistics.
pub fn compare_files(target: impl AsRef<Path>, source: impl AsRef<Path>) -> Result<DifferenceReport> {
    let (_, target_grid) = codec::read(target)?;
    let (_, source_grid) = codec::read(source)?;
    stats::compare(&target_grid, &source_grid)
}

/// Run the full compare-then-merge flow and write the merged grid.
pub fn merge_files(
    request: &MergeRequest,
    config: &MergeConfig,
    reporter: &mut dyn MergeReporter,
) -> Result<MergeOutcome> {
    info!(
        target = %request.target.display(),
        source = %request.source.display(),
        mask = %request.mask.display(),
        "Starting merge"
    );

    let (target_header, target) = codec::read(&request.target)?;
    let (_, source) = codec::read(&request.source)?;

    let report = stats::compare(&target, &source)?;
    reporter.on_difference(&report)?;

    let mask = mask::extract_from_file(
        &request.mask,
        target.shape(),
        config.sentinel_color,
        config.resample_filter,
    )?;

    let merged = compositor::merge(&target, &source, &mask)?;
    codec::write(&request.output, &target_header, &merged)?;

    reporter.on_merge(&MergeArtifacts {
        target: &target,
        mask: &mask,
        merged: &merged,
        output_path: &request.output,
    })?;

    info!(output = %request.output.display(), "Merge complete");

    Ok(MergeOutcome {
        output: request.output.clone(),
        difference: report.summary(),
        selected_cells: mask.selected_count(),
        coverage: mask.coverage(),
    })
}
