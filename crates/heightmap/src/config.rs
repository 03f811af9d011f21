//! Configuration for mask extraction and merge outputs.

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use crate::error::{HeightmapError, Result};

/// Pure red, the colour painted on masks to mark cells taken from the source.
pub const DEFAULT_SENTINEL: [u8; 3] = [255, 0, 0];

/// Configuration for a merge run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeConfig {
    /// RGB colour that selects a cell for replacement.
    pub sentinel_color: [u8; 3],

    /// Filter used when the mask image has to be resized to the grid shape.
    pub resample_filter: ResampleFilter,

    /// Directory for default-named outputs. Current directory when unset.
    pub output_dir: Option<PathBuf>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            sentinel_color: DEFAULT_SENTINEL,
            resample_filter: ResampleFilter::Nearest,
            output_dir: None,
        }
    }
}

impl MergeConfig {
    /// Load configuration from a YAML file. Missing keys take their defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Apply overrides from environment variables.
    pub fn apply_env(mut self) -> Result<Self> {
        if let Ok(val) = std::env::var("HEIGHTMAP_SENTINEL_COLOR") {
            self.sentinel_color = parse_rgb(&val)?;
        }

        if let Ok(val) = std::env::var("HEIGHTMAP_RESAMPLE_FILTER") {
            self.resample_filter = ResampleFilter::parse(&val)?;
        }

        if let Ok(val) = std::env::var("HEIGHTMAP_OUTPUT_DIR") {
            if !val.is_empty() {
                self.output_dir = Some(PathBuf::from(val));
            }
        }

        Ok(self)
    }

    /// Load configuration from defaults plus environment variables.
    pub fn from_env() -> Result<Self> {
        Self::default().apply_env()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.output_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(HeightmapError::config(format!(
                    "output_dir {} is not a directory",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Resolve a file name against `output_dir`.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

/// Parse an `r,g,b` triple such as `255,0,0`.
pub fn parse_rgb(s: &str) -> Result<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(HeightmapError::config(format!(
            "colour {:?} must have three comma-separated components",
            s
        )));
    }

    let mut rgb = [0u8; 3];
    for (slot, part) in rgb.iter_mut().zip(&parts) {
        *slot = part.parse().map_err(|_| {
            HeightmapError::config(format!("colour component {:?} is not 0-255", part))
        })?;
    }
    Ok(rgb)
}

/// Resampling filter applied to mask images whose size differs from the grid.
///
/// Only `Nearest` keeps every output pixel equal to some input pixel. The
/// smoothing filters blend colours at region edges, and blended pixels no
/// longer match the sentinel exactly, so painted regions shrink or vanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResampleFilter {
    #[default]
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl ResampleFilter {
    /// Parse from string (case-insensitive). Unknown names are rejected.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull_rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            _ => Err(HeightmapError::config(format!(
                "unknown resample filter {:?} (expected nearest, triangle, catmull_rom, gaussian or lanczos3)",
                s
            ))),
        }
    }

    /// The matching `image` crate filter.
    pub fn filter_type(&self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::CatmullRom => FilterType::CatmullRom,
            Self::Gaussian => FilterType::Gaussian,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl std::fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Triangle => write!(f, "triangle"),
            Self::CatmullRom => write!(f, "catmull_rom"),
            Self::Gaussian => write!(f, "gaussian"),
            Self::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}
