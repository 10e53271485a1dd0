//! Single-slot overwrite mailbox for ISR-to-task sample handoff.
//!
//! This is the heart of the node. The sampling callback runs in an
//! interrupt-like context and may preempt the node task at any instruction
//! boundary; it must hand over the latest reading without queuing and
//! without ever blocking. The mailbox holds exactly one value plus one
//! pending flag, packed into a single `AtomicU32`:
//!
//! ```text
//! bit 16      bits 15..0
//! [pending] [ sample value ]
//! ```
//!
//! The single-word atomic store is the whole locking discipline: the
//! reader observes either the old word or the new word, never a torn mix,
//! so no interrupt-masking critical section is needed.
//!
//! # Lossy by design
//!
//! Two writes before one read are observably identical to one write:
//! the earlier value is gone. For a sensor node only the freshest reading
//! is worth transmitting, so this is the contract, not a bug.

use core::sync::atomic::{AtomicU32, Ordering};

/// A single sensor reading as produced by the sampling engine.
pub type SampleValue = u16;

/// Pending flag, kept above the 16 value bits.
const PENDING: u32 = 1 << 16;

/// Single-slot, overwrite-on-write, signal-on-read-clear mailbox.
///
/// # Contract
///
/// - [`write`](Self::write) is total: never blocks, never fails, safe from
///   interrupt context. Always replaces the slot and (re)asserts pending.
/// - [`take_latest`](Self::take_latest) is consumer-side only: retrieves
///   the value and clears pending in one atomic step, or returns `None`
///   on a spurious wake.
///
/// There is no history and no count. Memory ordering pairs a `Release`
/// store in the producer with an `AcqRel` swap in the consumer, so a
/// write-then-signal fully completed before a `take_latest` is visible
/// to that call.
pub struct SampleMailbox {
    slot: AtomicU32,
}

impl SampleMailbox {
    /// Create an empty mailbox (nothing pending).
    pub const fn new() -> Self {
        Self {
            slot: AtomicU32::new(0),
        }
    }

    /// Store a new value and mark it pending, replacing any unread value.
    ///
    /// Producer side. O(1), never blocks, never fails. Safe to call from
    /// an interrupt-like context that preempts the consumer.
    #[inline]
    pub fn write(&self, value: SampleValue) {
        self.slot.store(PENDING | value as u32, Ordering::Release);
    }

    /// Retrieve the most recent value and clear the pending flag.
    ///
    /// Consumer side. Returns `None` if nothing is pending — the node
    /// task never calls this without a preceding wake, but the contract
    /// tolerates spurious wakes.
    #[inline]
    pub fn take_latest(&self) -> Option<SampleValue> {
        let raw = self.slot.swap(0, Ordering::AcqRel);
        if raw & PENDING != 0 {
            Some(raw as SampleValue)
        } else {
            None
        }
    }

    /// Check whether an unread value is pending, without consuming it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.slot.load(Ordering::Acquire) & PENDING != 0
    }
}

impl Default for SampleMailbox {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_mailbox_returns_none() {
        let mailbox = SampleMailbox::new();
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take_latest(), None);
    }

    #[test]
    fn test_write_then_take() {
        let mailbox = SampleMailbox::new();

        mailbox.write(0x0123);
        assert!(mailbox.is_pending());
        assert_eq!(mailbox.take_latest(), Some(0x0123));
    }

    #[test]
    fn test_take_clears_pending() {
        let mailbox = SampleMailbox::new();

        mailbox.write(42);
        assert_eq!(mailbox.take_latest(), Some(42));

        // No intervening write: second take sees nothing.
        assert!(!mailbox.is_pending());
        assert_eq!(mailbox.take_latest(), None);
    }

    #[test]
    fn test_overwrite_keeps_only_latest() {
        let mailbox = SampleMailbox::new();

        mailbox.write(10);
        mailbox.write(20);
        assert_eq!(mailbox.take_latest(), Some(20));
        assert_eq!(mailbox.take_latest(), None);
    }

    #[test]
    fn test_freshness_over_any_write_sequence() {
        let mailbox = SampleMailbox::new();

        for value in 0..100u16 {
            mailbox.write(value);
        }
        assert_eq!(mailbox.take_latest(), Some(99));
    }

    #[test]
    fn test_zero_value_is_still_pending() {
        // The pending flag lives outside the value bits, so a written
        // zero is distinguishable from an empty slot.
        let mailbox = SampleMailbox::new();

        mailbox.write(0);
        assert!(mailbox.is_pending());
        assert_eq!(mailbox.take_latest(), Some(0));
    }

    #[test]
    fn test_write_after_take_reasserts_pending() {
        let mailbox = SampleMailbox::new();

        mailbox.write(1);
        let _ = mailbox.take_latest();
        mailbox.write(2);
        assert!(mailbox.is_pending());
        assert_eq!(mailbox.take_latest(), Some(2));
    }
}
