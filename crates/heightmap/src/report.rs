//! Reporting hooks for consumers of merge results.
//!
//! Plotting, dialogs and other presentation live outside this crate. They
//! receive results through [`MergeReporter`]; two plain implementations are
//! provided here, one logging through `tracing` and one writing a JSON
//! summary file.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Result;
use crate::stats::{DifferenceReport, DifferenceSummary};
use crate::types::{Grid, Mask};

/// Everything a merge produced, borrowed for the duration of the callback.
#[derive(Debug, Clone, Copy)]
pub struct MergeArtifacts<'a> {
    pub target: &'a Grid,
    pub mask: &'a Mask,
    pub merged: &'a Grid,
    pub output_path: &'a Path,
}

/// Consumer of comparison and merge results.
pub trait MergeReporter {
    /// Called once the target/source difference has been computed.
    fn on_difference(&mut self, report: &DifferenceReport) -> Result<()>;

    /// Called after the merged grid has been written.
    fn on_merge(&mut self, artifacts: &MergeArtifacts<'_>) -> Result<()>;
}

/// Reporter that does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl MergeReporter for NullReporter {
    fn on_difference(&mut self, _report: &DifferenceReport) -> Result<()> {
        Ok(())
    }

    fn on_merge(&mut self, _artifacts: &MergeArtifacts<'_>) -> Result<()> {
        Ok(())
    }
}

/// Logs statistics and mask coverage at info level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl MergeReporter for TracingReporter {
    fn on_difference(&mut self, report: &DifferenceReport) -> Result<()> {
        info!(
            shape = %report.difference.shape(),
            mean = %format!("{:.2}", report.mean),
            std_dev = %format!("{:.2}", report.std_dev),
            min = %format!("{:.2}", report.min),
            max = %format!("{:.2}", report.max),
            "Difference statistics"
        );
        Ok(())
    }

    fn on_merge(&mut self, artifacts: &MergeArtifacts<'_>) -> Result<()> {
        info!(
            output = %artifacts.output_path.display(),
            selected = artifacts.mask.selected_count(),
            coverage = %format!("{:.1}%", artifacts.mask.coverage() * 100.0),
            "Merged grid written"
        );
        Ok(())
    }
}

/// JSON document written by [`JsonSummaryReporter`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub difference: Option<DifferenceSummary>,
    pub merge: Option<MergeSummary>,
}

/// Scalar description of a completed merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeSummary {
    pub output_path: PathBuf,
    pub selected_cells: usize,
    pub total_cells: usize,
    pub coverage: f64,
}

/// Writes the accumulated summary to a JSON file after every callback.
///
/// NaN statistics serialize as `null`.
#[derive(Debug, Clone)]
pub struct JsonSummaryReporter {
    path: PathBuf,
    document: SummaryDocument,
}

impl JsonSummaryReporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: SummaryDocument::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &SummaryDocument {
        &self.document
    }

    fn flush(&self) -> Result<()> {
        let file = File::create(&self.path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.document).map_err(std::io::Error::from)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

impl MergeReporter for JsonSummaryReporter {
    fn on_difference(&mut self, report: &DifferenceReport) -> Result<()> {
        self.document.difference = Some(report.summary());
        self.flush()
    }

    fn on_merge(&mut self, artifacts: &MergeArtifacts<'_>) -> Result<()> {
        self.document.merge = Some(MergeSummary {
            output_path: artifacts.output_path.to_path_buf(),
            selected_cells: artifacts.mask.selected_count(),
            total_cells: artifacts.mask.shape().len(),
            coverage: artifacts.mask.coverage(),
        });
        self.flush()
    }
}

/// Fans each callback out to several reporters in order.
#[derive(Default)]
pub struct ReporterChain {
    reporters: Vec<Box<dyn MergeReporter>>,
}

impl ReporterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, reporter: impl MergeReporter + 'static) -> Self {
        self.reporters.push(Box::new(reporter));
        self
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl MergeReporter for ReporterChain {
    fn on_difference(&mut self, report: &DifferenceReport) -> Result<()> {
        for reporter in &mut self.reporters {
            reporter.on_difference(report)?;
        }
        Ok(())
    }

    fn on_merge(&mut self, artifacts: &MergeArtifacts<'_>) -> Result<()> {
        for reporter in &mut self.reporters {
            reporter.on_merge(artifacts)?;
        }
        Ok(())
    }
}
