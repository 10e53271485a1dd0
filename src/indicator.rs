//! Activity indicator boundary.
//!
//! A single binary output giving visible liveness feedback. Not part of
//! the data path: the node task toggles it once per processed wake. The
//! opened pin is consumer-exclusive, so the read-negate-write toggle
//! needs no atomicity against the producer side.

/// Static configuration for the indicator output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PinConfig {
    /// Platform pin number.
    pub pin: u32,
    /// Level driven immediately after open.
    pub initial_high: bool,
}

impl PinConfig {
    /// Activity LED on the reference board: pin 0, initially off.
    pub const ACTIVITY_LED: Self = Self {
        pin: 0,
        initial_high: false,
    };
}

/// Why the indicator resource could not be acquired.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndicatorError {
    /// The pin is already claimed by another owner.
    Busy,
    /// The pin driver rejected the configuration.
    Hardware,
}

impl IndicatorError {
    /// Short diagnostic message.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Busy => "indicator pin already claimed",
            Self::Hardware => "indicator pin driver error",
        }
    }
}

impl core::fmt::Display for IndicatorError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message())
    }
}

/// An opened, exclusively owned indicator output.
pub trait Indicator {
    /// Current driven level.
    fn get_output(&self) -> bool;

    /// Drive the output level.
    fn set_output(&mut self, high: bool);
}

/// Driver capability that acquires the indicator output.
///
/// Failure here is the one fatal setup error in the core: a node without
/// its status indicator must not run silently, so the node task surfaces
/// it and the caller decides whether to halt.
pub trait IndicatorDriver {
    /// The opened pin handle type.
    type Pin: Indicator;

    /// Acquire the output described by `config`.
    fn open(&mut self, config: PinConfig) -> Result<Self::Pin, IndicatorError>;
}
