//! Timing and reporting helpers used by the command-line tools.
pub mod report;
pub mod timing;

pub use report::{InputDescriptor, LayoutTiming, LocalityReport};
pub use timing::{append_timing, time_ns, timing_lines, StageTiming, TimingBreakdown};
