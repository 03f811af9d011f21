//! Subcommand implementations.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use tracing::info;

use heightmap::{
    compare_files, merge_files, JsonSummaryReporter, MergeConfig, MergeReporter, MergeRequest,
    ReporterChain, TracingReporter,
};

/// Inputs of the `merge` subcommand.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    pub target: PathBuf,
    pub source: PathBuf,
    pub mask: PathBuf,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub write_report: bool,
}

/// Compare two grids and log (optionally write) the statistics.
pub fn compare(
    config: &MergeConfig,
    target: &Path,
    source: &Path,
    report_path: Option<&Path>,
) -> Result<()> {
    let report_path = report_path.map(|path| resolve(config, path));
    check_paths(&[target, source], &outputs(&[report_path.as_deref()]))?;

    let report = compare_files(target, source).with_context(|| {
        format!(
            "Failed to compare {} with {}",
            target.display(),
            source.display()
        )
    })?;

    let mut reporter = ReporterChain::new().with(TracingReporter);
    if let Some(path) = report_path {
        reporter = reporter.with(JsonSummaryReporter::new(path));
    }
    reporter.on_difference(&report)?;
    Ok(())
}

/// Run the full merge.
pub fn merge(config: &MergeConfig, options: MergeOptions) -> Result<()> {
    let stamp = date_stamp();
    let output = match &options.output {
        Some(path) => resolve(config, path),
        None => config.output_path(&format!("merged_{}.asc", stamp)),
    };
    let report_path = match (&options.report, options.write_report) {
        (_, false) => None,
        (Some(path), true) => Some(resolve(config, path)),
        (None, true) => Some(config.output_path(&format!("comparison_{}.json", stamp))),
    };
    check_paths(
        &[
            options.target.as_path(),
            options.source.as_path(),
            options.mask.as_path(),
        ],
        &outputs(&[Some(output.as_path()), report_path.as_deref()]),
    )?;

    let mut reporter = ReporterChain::new().with(TracingReporter);
    if let Some(path) = report_path {
        info!(path = %path.display(), "Writing summary");
        reporter = reporter.with(JsonSummaryReporter::new(path));
    }

    let request = MergeRequest {
        target: options.target,
        source: options.source,
        mask: options.mask,
        output,
    };
    let outcome = merge_files(&request, config, &mut reporter).with_context(|| {
        format!(
            "Failed to merge {} into {}",
            request.source.display(),
            request.target.display()
        )
    })?;

    info!(
        output = %outcome.output.display(),
        selected = outcome.selected_cells,
        "Done"
    );
    Ok(())
}

/// Relative paths land in the configured output directory.
fn resolve(config: &MergeConfig, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match &config.output_dir {
        Some(dir) => dir.join(path),
        None => path.to_path_buf(),
    }
}

fn outputs<'a>(paths: &[Option<&'a Path>]) -> Vec<&'a Path> {
    paths.iter().flatten().copied().collect()
}

/// Reject runs where two inputs are the same file or any written file
/// would replace an input or another written file.
fn check_paths(inputs: &[&Path], outputs: &[&Path]) -> Result<()> {
    for (i, a) in inputs.iter().enumerate() {
        for b in &inputs[i + 1..] {
            if same_file(a, b) {
                bail!(
                    "Inputs must be different files, {} is given twice",
                    a.display()
                );
            }
        }
    }

    for (i, out) in outputs.iter().enumerate() {
        if let Some(input) = inputs.iter().find(|input| same_file(out, input)) {
            bail!("{} would overwrite input {}", out.display(), input.display());
        }
        if let Some(other) = outputs[i + 1..].iter().find(|other| same_file(out, other)) {
            bail!("{} is used for two outputs ({})", out.display(), other.display());
        }
    }
    Ok(())
}

/// Equal as given, or resolving to the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn date_stamp() -> String {
    Local::now().format("%Y%m%d").to_string()
}
