//! Sampling engine boundary and the producer-side callback adapter.
//!
//! The sampling engine is an external subsystem: it owns its timing and
//! change-detection policy and invokes a registered consumer whenever a
//! fresh reading is ready, from an interrupt-like context. This core only
//! sees the [`SampleSource`] capability, so the real engine can be swapped
//! for a fake in tests without touching the node task.

use crate::config::SamplingConfig;
use crate::event::{EventBits, WakeSignal};
use crate::mailbox::{SampleMailbox, SampleValue};

/// Receiver of freshly sampled values.
///
/// Invoked from an interrupt-like context: implementations must complete
/// in bounded, short time — no blocking calls, no waiting on the radio.
pub trait SampleConsumer: Sync {
    /// Accept one fresh reading. Total: cannot fail, never blocks.
    fn on_sample(&self, value: SampleValue);
}

/// Capability interface over the external sampling engine.
///
/// Registration takes a `&'static` consumer because the engine calls back
/// asynchronously for the remaining lifetime of the process; on the node
/// the producer lives in a static, and tests leak one.
pub trait SampleSource {
    /// Hand the engine its timing/change-detection knobs.
    fn configure(&mut self, config: SamplingConfig);

    /// Register the callback invoked on every new reading.
    fn register_consumer(&mut self, consumer: &'static dyn SampleConsumer);

    /// Start sampling. After this the consumer may fire at any time.
    fn start(&mut self);
}

/// The core-owned producer callback: mailbox write plus wake post.
///
/// This is the entire interrupt-context footprint of the node — two
/// wait-free atomic operations. Both are total, so the callback has no
/// error path by construction.
pub struct SampleProducer<'a, S: WakeSignal> {
    mailbox: &'a SampleMailbox,
    signal: &'a S,
}

impl<'a, S: WakeSignal> SampleProducer<'a, S> {
    /// Bind a producer to the mailbox it overwrites and the signal it posts.
    pub const fn new(mailbox: &'a SampleMailbox, signal: &'a S) -> Self {
        Self { mailbox, signal }
    }
}

impl<S: WakeSignal> SampleConsumer for SampleProducer<'_, S> {
    #[inline]
    fn on_sample(&self, value: SampleValue) {
        // Order matters: the value must be in the slot before the wake
        // is visible, so a take_latest triggered by this post sees it.
        self.mailbox.write(value);
        self.signal.post(EventBits::NEW_SAMPLE);
    }
}
