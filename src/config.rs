//! Sampling engine configuration.

/// Configuration handed to the sampling engine at start-up.
///
/// The engine's internal timing and change-detection algorithm is opaque
/// to this core; these are just the knobs it exposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SamplingConfig {
    /// Sampling period in engine clock ticks.
    pub interval_ticks: u32,

    /// Minimum report interval, in units of the sampling period.
    ///
    /// An unchanged reading is still reported at least this often.
    pub min_report_interval: u32,

    /// Change mask applied to the raw reading.
    ///
    /// Bits outside the mask do not count as a change and so do not
    /// trigger an early report. The default masks off the low 4 bits of
    /// a 12-bit conversion to suppress noise-level wakeups.
    pub change_mask: u16,
}

impl SamplingConfig {
    /// Bring-up defaults: 1 s sample period, 3-period minimum report
    /// interval, low 4 bits ignored for change detection.
    pub const DEFAULT: Self = Self {
        interval_ticks: 0x0001_0000,
        min_report_interval: 3,
        change_mask: 0x0FF0,
    };
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
