//! Level-triggered wake events for the node task.
//!
//! The node task suspends in exactly one place: waiting for any bit of its
//! event mask to become set. Events are *level* signals, not edges — a bit
//! posted five times before the waiter runs collapses to a single observed
//! "pending" state. That is precisely the coalescing the mailbox relies
//! on: the wake says "at least one new sample exists", never "N samples
//! exist".
//!
//! [`SignalLatch`] is the portable atomic latch; the blocking half lives
//! behind the [`WakeSignal`] capability so the chip build can use a
//! FreeRTOS event group while host tests plug in a condvar-backed fake.

use core::sync::atomic::{AtomicU32, Ordering};

/// A set of named event bits the node task can wait on.
///
/// Only bit 0 is assigned today. The wait mask is deliberately
/// [`ALL`](Self::ALL): future bits wake the task but are ignored until
/// explicitly handled, so they can never be misread as the sample bit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EventBits(u32);

impl EventBits {
    /// No events.
    pub const NONE: Self = Self(0);

    /// A new sample is available in the mailbox.
    pub const NEW_SAMPLE: Self = Self(1 << 0);

    /// Every bit, assigned or not. The node task waits on this mask.
    pub const ALL: Self = Self(u32::MAX);

    /// Build from a raw bit mask.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw bit mask.
    pub const fn bits(&self) -> u32 {
        self.0
    }

    /// True if every bit of `other` is set in `self`.
    pub const fn contains(&self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True if no bit is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Bits present in both sets.
    pub const fn intersect(&self, other: Self) -> Self {
        Self(self.0 & other.0)
    }
}

/// Lock-free, level-triggered event latch.
///
/// Posting is idempotent: re-posting an already-pending bit changes
/// nothing observable. `take` observes and clears in one atomic step, so
/// a post landing between observe and clear is never lost.
///
/// This latch carries the *state*; it does not block. Platform wake
/// primitives ([`WakeSignal`] impls) layer their suspend/resume mechanism
/// on top of it or replace it with a native equivalent.
pub struct SignalLatch {
    bits: AtomicU32,
}

impl SignalLatch {
    /// Create a latch with nothing pending.
    pub const fn new() -> Self {
        Self {
            bits: AtomicU32::new(0),
        }
    }

    /// Assert the given bits. ISR-safe, never blocks.
    ///
    /// Returns `true` if at least one bit went from clear to set —
    /// platform impls use that edge to decide whether a sleeping waiter
    /// needs a kick.
    #[inline]
    pub fn post(&self, bits: EventBits) -> bool {
        let prev = self.bits.fetch_or(bits.bits(), Ordering::AcqRel);
        prev & bits.bits() != bits.bits()
    }

    /// Atomically observe and clear the pending bits within `mask`.
    ///
    /// Returns the bits that were pending (possibly none).
    #[inline]
    pub fn take(&self, mask: EventBits) -> EventBits {
        let prev = self.bits.fetch_and(!mask.bits(), Ordering::AcqRel);
        EventBits::from_bits(prev & mask.bits())
    }

    /// Peek at the pending bits within `mask` without clearing them.
    #[inline]
    pub fn pending(&self, mask: EventBits) -> EventBits {
        EventBits::from_bits(self.bits.load(Ordering::Acquire) & mask.bits())
    }
}

impl Default for SignalLatch {
    fn default() -> Self {
        Self::new()
    }
}

/// Platform wake capability the node task blocks on.
///
/// # Contract
///
/// - `post` is safe from interrupt-like contexts and never blocks.
/// - `wait_any` suspends the caller until at least one bit of `mask` is
///   pending, then clears and returns exactly those bits. No timeout:
///   the node task waits forever and never polls.
/// - Level semantics: posts issued before a `wait_any` completes collapse
///   into that single wake.
pub trait WakeSignal: Sync {
    /// Assert event bits, waking the waiter if it is suspended.
    fn post(&self, bits: EventBits);

    /// Block until any bit of `mask` is pending; clear and return them.
    fn wait_any(&self, mask: EventBits) -> EventBits;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_bits_contains() {
        assert!(EventBits::ALL.contains(EventBits::NEW_SAMPLE));
        assert!(EventBits::NEW_SAMPLE.contains(EventBits::NEW_SAMPLE));
        assert!(!EventBits::NONE.contains(EventBits::NEW_SAMPLE));
        assert!(EventBits::NEW_SAMPLE.contains(EventBits::NONE));
    }

    #[test]
    fn test_latch_post_take() {
        let latch = SignalLatch::new();

        assert!(latch.post(EventBits::NEW_SAMPLE));
        assert_eq!(latch.take(EventBits::ALL), EventBits::NEW_SAMPLE);
        assert_eq!(latch.take(EventBits::ALL), EventBits::NONE);
    }

    #[test]
    fn test_latch_post_is_idempotent() {
        let latch = SignalLatch::new();

        // First post raises the level, the second is a no-op.
        assert!(latch.post(EventBits::NEW_SAMPLE));
        assert!(!latch.post(EventBits::NEW_SAMPLE));

        // Both posts collapse into one observed pending state.
        assert_eq!(latch.take(EventBits::ALL), EventBits::NEW_SAMPLE);
        assert_eq!(latch.take(EventBits::ALL), EventBits::NONE);
    }

    #[test]
    fn test_take_respects_mask() {
        let latch = SignalLatch::new();
        let other = EventBits::from_bits(1 << 5);

        latch.post(EventBits::NEW_SAMPLE);
        latch.post(other);

        // Taking only the sample bit leaves the other bit pending.
        assert_eq!(latch.take(EventBits::NEW_SAMPLE), EventBits::NEW_SAMPLE);
        assert_eq!(latch.pending(EventBits::ALL), other);
    }

    #[test]
    fn test_pending_does_not_clear() {
        let latch = SignalLatch::new();

        latch.post(EventBits::NEW_SAMPLE);
        assert_eq!(latch.pending(EventBits::ALL), EventBits::NEW_SAMPLE);
        assert_eq!(latch.pending(EventBits::ALL), EventBits::NEW_SAMPLE);
        assert_eq!(latch.take(EventBits::ALL), EventBits::NEW_SAMPLE);
    }
}
