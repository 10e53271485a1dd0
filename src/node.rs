//! The node task: the consumer side of the handoff and the only control
//! loop in the core.
//!
//! Two logical states, one suspension point:
//!
//! ```text
//! WAIT ──wake──▶ PROCESS ──▶ WAIT ──▶ ...
//! ```
//!
//! On each wake the task toggles the activity indicator, drains the
//! mailbox and forwards the value to the radio. No retries, no timeouts,
//! no terminal state: the loop runs for the lifetime of the device. The
//! only failure the core ever surfaces is the indicator pin not opening
//! during setup.

use crate::config::SamplingConfig;
use crate::event::{EventBits, WakeSignal};
use crate::indicator::{Indicator, IndicatorDriver, IndicatorError, PinConfig};
use crate::mailbox::SampleMailbox;
use crate::radio::RadioSender;
use crate::source::{SampleConsumer, SampleSource};

/// Fatal setup failure.
///
/// Everything past setup is total, so this enum stays small. The caller
/// decides whether a setup failure halts the system or degrades it; the
/// core only reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeError {
    /// The activity indicator could not be acquired. A node without its
    /// status indicator is unsafe to run silently.
    Indicator(IndicatorError),
}

impl core::fmt::Display for NodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Indicator(err) => write!(f, "indicator unavailable: {err}"),
        }
    }
}

/// The node task context: mailbox, wake signal, opened indicator, radio.
///
/// Constructed once via [`init`](Self::init) and never destroyed — an
/// embedded process has no shutdown path. Borrows the mailbox and signal
/// (they are shared with the producer callback) and exclusively owns the
/// indicator and radio handles.
pub struct NodeTask<'a, S, I, R> {
    mailbox: &'a SampleMailbox,
    signal: &'a S,
    indicator: I,
    radio: R,
}

impl<'a, S, I, R> NodeTask<'a, S, I, R>
where
    S: WakeSignal,
    I: Indicator,
    R: RadioSender,
{
    /// One-time setup, order-significant:
    ///
    /// 1. acquire the indicator output (the only fatal step);
    /// 2. configure the sampling engine;
    /// 3. register the producer callback;
    /// 4. start the engine.
    ///
    /// After `start` the callback may fire at any time; the mailbox and
    /// signal are already wired, so an early sample is simply the first
    /// one the loop processes.
    pub fn init<D, E>(
        mailbox: &'a SampleMailbox,
        signal: &'a S,
        driver: &mut D,
        pin: PinConfig,
        engine: &mut E,
        producer: &'static dyn SampleConsumer,
        sampling: SamplingConfig,
        radio: R,
    ) -> Result<Self, NodeError>
    where
        D: IndicatorDriver<Pin = I>,
        E: SampleSource,
    {
        let indicator = driver.open(pin).map_err(NodeError::Indicator)?;

        engine.configure(sampling);
        engine.register_consumer(producer);
        engine.start();

        Ok(Self {
            mailbox,
            signal,
            indicator,
            radio,
        })
    }

    /// Run the WAIT/PROCESS loop forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.poll();
        }
    }

    /// One loop iteration: block until a wake, then process it.
    pub fn poll(&mut self) {
        let fired = self.signal.wait_any(EventBits::ALL);
        self.process(fired);
    }

    /// Handle the bits delivered by one wake.
    ///
    /// Bits other than [`EventBits::NEW_SAMPLE`] wake the task but are
    /// ignored until explicitly handled.
    pub fn process(&mut self, fired: EventBits) {
        if fired.contains(EventBits::NEW_SAMPLE) {
            // Visible liveness feedback: toggle once per processed wake.
            let lit = self.indicator.get_output();
            self.indicator.set_output(!lit);

            // Forward the freshest value. A spurious wake (already
            // drained) forwards nothing.
            if let Some(value) = self.mailbox.take_latest() {
                self.radio.send_value(value);
            }
        }
    }

    /// The opened indicator handle (diagnostics, tests).
    pub fn indicator(&self) -> &I {
        &self.indicator
    }

    /// The radio handle (diagnostics, tests).
    pub fn radio(&self) -> &R {
        &self.radio
    }
}
