//! Configuration layering for the command-line tool.
//!
//! Precedence, lowest first: built-in defaults, the YAML file given with
//! `--config`, `HEIGHTMAP_*` environment variables, command-line flags.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use heightmap::{MergeConfig, ResampleFilter};

/// Values given directly on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub sentinel: Option<[u8; 3]>,
    pub resample_filter: Option<ResampleFilter>,
}

/// Build the effective configuration.
pub fn load(path: Option<&Path>, overrides: &Overrides) -> Result<MergeConfig> {
    let base = match path {
        Some(path) => {
            info!(path = %path.display(), "Loading configuration file");
            MergeConfig::from_yaml_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => MergeConfig::default(),
    };

    let config = apply_overrides(
        base.apply_env().context("Invalid HEIGHTMAP_* environment variable")?,
        overrides,
    );
    config.validate().context("Invalid configuration")?;

    debug!(
        sentinel = ?config.sentinel_color,
        resample_filter = %config.resample_filter,
        output_dir = ?config.output_dir,
        "Effective configuration"
    );
    Ok(config)
}

fn apply_overrides(mut config: MergeConfig, overrides: &Overrides) -> MergeConfig {
    if let Some(sentinel) = overrides.sentinel {
        config.sentinel_color = sentinel;
    }
    if let Some(filter) = overrides.resample_filter {
        config.resample_filter = filter;
    }
    config
}
