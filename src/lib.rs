//! # RustWsnNode
//!
//! Core firmware logic for one node of a wireless sensor network.
//!
//! ## Architecture
//!
//! ```text
//! Sampling Engine ──callback──▶ SampleMailbox ──wake──▶ NodeTask ──▶ RadioSender
//! (interrupt-like)              (overwrite +             (toggle LED,
//!                                level signal)            forward value)
//! ```
//!
//! The whole system pivots on one handoff: a producer running in an
//! interrupt-like context hands the latest sensor reading to a
//! cooperatively scheduled task without queuing and without blocking.
//! [`SampleMailbox`] is a single-slot overwrite buffer (freshness over
//! completeness: intermediate readings are lost by design) and
//! [`SignalLatch`] is the level-triggered wake latch behind the
//! [`WakeSignal`] capability. Everything else is wiring around that pair.
//!
//! External collaborators (sampling engine, radio, indicator pin) are
//! reached only through traits, so the core runs unmodified on the chip
//! and under host tests with fakes.

#![cfg_attr(not(test), no_std)]

#[cfg(feature = "mock")]
extern crate std;

pub mod config;
pub mod event;
pub mod indicator;
pub mod logging;
pub mod mailbox;
pub mod node;
pub mod platform;
pub mod radio;
pub mod source;

pub use config::SamplingConfig;
pub use event::{EventBits, SignalLatch, WakeSignal};
pub use indicator::{Indicator, IndicatorDriver, IndicatorError, PinConfig};
pub use mailbox::{SampleMailbox, SampleValue};
pub use node::{NodeError, NodeTask};
pub use radio::RadioSender;
pub use source::{SampleConsumer, SampleProducer, SampleSource};
