//! Platform implementations of the node's capability traits.
//!
//! The core never touches hardware directly; it sees [`WakeSignal`],
//! [`IndicatorDriver`] and friends. This module provides the two
//! realizations: the ESP-IDF one for the chip and mocks for host tests.
//!
//! [`WakeSignal`]: crate::event::WakeSignal
//! [`IndicatorDriver`]: crate::indicator::IndicatorDriver

#[cfg(target_os = "espidf")]
pub mod espidf;

#[cfg(any(test, feature = "mock"))]
pub mod mock;
