//! JSON run configuration for the demo binaries.
//!
//! ```json
//! {
//!   "input": "shapes.png",
//!   "params": { "kernel": "sobel", "edges": { "enabled": true, "closure": true } },
//!   "output": { "module": "out/module.png", "edges": "out/edges.png", "summary_json": "out/summary.json" }
//! }
//! ```
use crate::detector::DetectorParams;
use crate::error::{DetectError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    pub input: PathBuf,
    #[serde(default)]
    pub params: DetectorParams,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where to write each stage; stages without a path are not saved.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub module: Option<PathBuf>,
    /// Prefix for the normalized directional components; `out/comp.png`
    /// writes `out/comp_0.png`, `out/comp_1.png`, ...
    pub components: Option<PathBuf>,
    pub threshold: Option<PathBuf>,
    pub slope_color: Option<PathBuf>,
    pub extrema: Option<PathBuf>,
    pub edges: Option<PathBuf>,
    pub closed_edges: Option<PathBuf>,
    pub segment_accumulator: Option<PathBuf>,
    pub segments: Option<PathBuf>,
    pub circle_accumulator: Option<PathBuf>,
    pub circles: Option<PathBuf>,
    /// Render grids as 0/255 masks instead of raw values.
    pub binary: bool,
    pub summary_json: Option<PathBuf>,
}

impl OutputConfig {
    /// Path of directional component `index`, when a prefix is configured.
    pub fn component_path(&self, index: usize) -> Option<PathBuf> {
        let prefix = self.components.as_ref()?;
        let stem = prefix
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "component".to_string());
        let ext = prefix
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_else(|| "png".to_string());
        Some(prefix.with_file_name(format!("{stem}_{index}.{ext}")))
    }
}

pub fn load_config(path: &Path) -> Result<RuntimeConfig> {
    let data = fs::read_to_string(path).map_err(|e| {
        DetectError::Io(format!("Failed to read config {}: {e}", path.display()))
    })?;
    parse_config(&data)
        .map_err(|e| DetectError::Config(format!("Failed to parse config {}: {e}", path.display())))
}

fn parse_config(data: &str) -> std::result::Result<RuntimeConfig, serde_json::Error> {
    serde_json::from_str(data)
}
