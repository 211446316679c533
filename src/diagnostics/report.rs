use super::TimingBreakdown;
use crate::methods::LayoutKind;
use serde::Serialize;

/// Input description recorded in a locality report.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Timings of every configured transform under one layout.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutTiming {
    pub layout: LayoutKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocksize: Option<usize>,
    pub traversal: String,
    pub timings: TimingBreakdown,
    pub ns_per_pixel: f64,
}

/// Result written by the `locality_report` tool.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalityReport {
    pub input: InputDescriptor,
    pub layouts: Vec<LayoutTiming>,
}

impl LocalityReport {
    /// Layout with the lowest total time, if any ran.
    pub fn fastest(&self) -> Option<&LayoutTiming> {
        self.layouts
            .iter()
            .min_by(|a, b| a.timings.total_ms.total_cmp(&b.timings.total_ms))
    }
}
