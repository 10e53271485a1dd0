//! Test doubles for the node's platform capabilities.
//!
//! Host-only (needs `std` for the blocking wait). Enabled for this
//! crate's own tests and, via the `mock` feature, for downstream host
//! harnesses.

use std::boxed::Box;
use std::sync::{Condvar, Mutex};
use std::vec::Vec;

use crate::config::SamplingConfig;
use crate::event::{EventBits, SignalLatch, WakeSignal};
use crate::indicator::{Indicator, IndicatorDriver, IndicatorError, PinConfig};
use crate::mailbox::SampleValue;
use crate::radio::RadioSender;
use crate::source::{SampleConsumer, SampleSource};

/// Blocking wake signal: the portable latch plus a condvar.
///
/// `wait_any` returns immediately when a bit is already pending (level
/// semantics), otherwise parks the thread until a post arrives.
pub struct MockSignal {
    latch: SignalLatch,
    lock: Mutex<()>,
    wake: Condvar,
}

impl MockSignal {
    pub const fn new() -> Self {
        Self {
            latch: SignalLatch::new(),
            lock: Mutex::new(()),
            wake: Condvar::new(),
        }
    }

    /// Peek at pending bits without clearing them.
    pub fn pending(&self, mask: EventBits) -> EventBits {
        self.latch.pending(mask)
    }
}

impl Default for MockSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl WakeSignal for MockSignal {
    fn post(&self, bits: EventBits) {
        // Take the lock around the latch update so a waiter between its
        // pending-check and its condvar park cannot miss the notify.
        let guard = self.lock.lock().unwrap();
        self.latch.post(bits);
        drop(guard);
        self.wake.notify_all();
    }

    fn wait_any(&self, mask: EventBits) -> EventBits {
        let mut guard = self.lock.lock().unwrap();
        loop {
            let fired = self.latch.take(mask);
            if !fired.is_empty() {
                return fired;
            }
            guard = self.wake.wait(guard).unwrap();
        }
    }
}

/// Indicator pin double: plain state plus a toggle trace.
#[derive(Debug, Default)]
pub struct MockIndicatorPin {
    level: bool,
    history: Vec<bool>,
}

impl MockIndicatorPin {
    /// Every level ever driven, oldest first.
    pub fn history(&self) -> &[bool] {
        &self.history
    }
}

impl Indicator for MockIndicatorPin {
    fn get_output(&self) -> bool {
        self.level
    }

    fn set_output(&mut self, high: bool) {
        self.level = high;
        self.history.push(high);
    }
}

/// Indicator driver double; can be configured to fail `open`.
#[derive(Debug, Default)]
pub struct MockIndicatorDriver {
    fail_with: Option<IndicatorError>,
    opened: Option<PinConfig>,
}

impl MockIndicatorDriver {
    /// A driver whose `open` always fails with `err`.
    pub fn failing(err: IndicatorError) -> Self {
        Self {
            fail_with: Some(err),
            opened: None,
        }
    }

    /// The config passed to the last successful `open`.
    pub fn opened(&self) -> Option<PinConfig> {
        self.opened
    }
}

impl IndicatorDriver for MockIndicatorDriver {
    type Pin = MockIndicatorPin;

    fn open(&mut self, config: PinConfig) -> Result<Self::Pin, IndicatorError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.opened = Some(config);
        let mut pin = MockIndicatorPin::default();
        pin.level = config.initial_high;
        Ok(pin)
    }
}

/// Radio double that records every forwarded value.
#[derive(Debug, Default)]
pub struct MockRadio {
    sent: Vec<SampleValue>,
}

impl MockRadio {
    /// Values forwarded so far, oldest first.
    pub fn sent(&self) -> &[SampleValue] {
        &self.sent
    }
}

impl RadioSender for MockRadio {
    fn send_value(&mut self, value: SampleValue) {
        self.sent.push(value);
    }
}

/// Sampling engine double.
///
/// Records the wiring calls and lets a test fire the registered consumer
/// on demand, standing in for the engine's interrupt context.
#[derive(Default)]
pub struct MockSampleEngine {
    config: Option<SamplingConfig>,
    consumer: Option<&'static dyn SampleConsumer>,
    started: bool,
}

impl MockSampleEngine {
    /// The config handed to `configure`, if any.
    pub fn config(&self) -> Option<SamplingConfig> {
        self.config
    }

    /// Whether a consumer has been registered.
    pub fn has_consumer(&self) -> bool {
        self.consumer.is_some()
    }

    /// Whether `start` was called.
    pub fn started(&self) -> bool {
        self.started
    }

    /// Deliver one reading to the registered consumer.
    ///
    /// # Panics
    ///
    /// Panics if no consumer is registered — a test driving an unwired
    /// engine is a broken test.
    pub fn trigger(&self, value: SampleValue) {
        self.consumer
            .expect("no consumer registered")
            .on_sample(value);
    }
}

impl SampleSource for MockSampleEngine {
    fn configure(&mut self, config: SamplingConfig) {
        self.config = Some(config);
    }

    fn register_consumer(&mut self, consumer: &'static dyn SampleConsumer) {
        self.consumer = Some(consumer);
    }

    fn start(&mut self) {
        self.started = true;
    }
}

/// Leak a value to get the `'static` borrow the engine registration
/// wants. Test-only; the node's real statics live in the firmware image.
pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}
