use super::{load_json, LayoutConfig};
use crate::methods::LayoutKind;
use crate::transform::{FlipAxis, Rotation, Transform};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct ReportConfig {
    /// Image to transform; a synthetic gradient is used when absent.
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub synthetic: SyntheticConfig,
    #[serde(default = "default_layouts")]
    pub layouts: Vec<LayoutConfig>,
    #[serde(default = "default_transforms")]
    pub transforms: Vec<Transform>,
    pub output: ReportOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReportOutputConfig {
    pub report_json: PathBuf,
    /// Optional PPM dump of the last transformed image.
    #[serde(default)]
    pub last_image: Option<PathBuf>,
}

fn default_layouts() -> Vec<LayoutConfig> {
    LayoutKind::ALL.into_iter().map(LayoutConfig::new).collect()
}

fn default_transforms() -> Vec<Transform> {
    vec![
        Transform::Rotate(Rotation::R90),
        Transform::Rotate(Rotation::R180),
        Transform::Flip(FlipAxis::Horizontal),
        Transform::Transpose,
    ]
}

pub fn load_config(path: &Path) -> Result<ReportConfig, String> {
    load_json(path)
}
