use crate::transform::Transform;
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Timing entry for one transform run or helper step.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timings for a run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn with_total(total_ms: f64) -> Self {
        Self {
            total_ms,
            stages: Vec::new(),
        }
    }

    /// Append a stage and add it to the total.
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.total_ms += elapsed_ms;
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }
}

/// Run `f` and return its output with the elapsed wall time in nanoseconds.
pub fn time_ns<R>(f: impl FnOnce() -> R) -> (R, f64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_secs_f64() * 1e9)
}

/// The two lines `ppmtrans -time` records for one transform: total time and
/// time per pixel, both in whole nanoseconds.
pub fn timing_lines(transform: Transform, elapsed_ns: f64, pixels: usize) -> [String; 2] {
    let per_pixel = if pixels == 0 {
        0.0
    } else {
        elapsed_ns / pixels as f64
    };
    [
        format!("Time taken to do {transform}: {elapsed_ns:.0} ns."),
        format!("Time taken to do {transform} per pixel: {per_pixel:.0} ns."),
    ]
}

/// Append [`timing_lines`] to `path`, creating the file if needed.
pub fn append_timing(
    path: &Path,
    transform: Transform,
    elapsed_ns: f64,
    pixels: usize,
) -> Result<(), String> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| format!("Failed to open timing file {}: {e}", path.display()))?;
    for line in timing_lines(transform, elapsed_ns, pixels) {
        writeln!(file, "{line}")
            .map_err(|e| format!("Failed to write timing file {}: {e}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{timing_lines, TimingBreakdown};
    use crate::transform::{FlipAxis, Rotation, Transform};

    #[test]
    fn lines_use_whole_nanoseconds() {
        let [total, per_px] = timing_lines(Transform::Rotate(Rotation::R90), 1200.4, 4);
        assert_eq!(total, "Time taken to do rotate 90: 1200 ns.");
        assert_eq!(per_px, "Time taken to do rotate 90 per pixel: 300 ns.");
    }

    #[test]
    fn flip_wording() {
        let [total, _] = timing_lines(Transform::Flip(FlipAxis::Horizontal), 10.0, 0);
        assert_eq!(total, "Time taken to do flip horizontally: 10 ns.");
    }

    #[test]
    fn breakdown_accumulates_total() {
        let mut t = TimingBreakdown::with_total(1.0);
        t.push("a", 2.0);
        t.push("b", 0.5);
        assert_eq!(t.stages.len(), 2);
        assert!((t.total_ms - 3.5).abs() < 1e-9);
    }
}
