//! Runtime configuration for the command-line tools.
//!
//! Both tools accept JSON config files; `ppmtrans` also takes flags that
//! override whatever a config file set.
pub mod ppmtrans;
pub mod report;

use crate::methods::{LayoutKind, MethodSuite};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Layout selection: which suite to build and, for block-major, the tile
/// size (`None` = sized to the 64 KiB tile budget).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub kind: LayoutKind,
    pub blocksize: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            kind: LayoutKind::RowMajor,
            blocksize: None,
        }
    }
}

impl LayoutConfig {
    pub fn new(kind: LayoutKind) -> Self {
        Self {
            kind,
            blocksize: None,
        }
    }

    pub fn suite<T: Clone + Default>(&self) -> MethodSuite<T> {
        MethodSuite::select_with(self.kind, self.blocksize)
    }
}

/// Read and deserialize a JSON config file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
