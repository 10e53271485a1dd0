//! Level-signal semantics, including a real blocking waiter.

use std::sync::{Condvar, Mutex};
use std::thread;
use std::time::Duration;

use rust_wsn_node::{EventBits, SignalLatch, WakeSignal};

// Minimal blocking signal over the portable latch, the same shape the
// firmware builds from a FreeRTOS event group.
struct CondSignal {
    latch: SignalLatch,
    lock: Mutex<()>,
    wake: Condvar,
}

impl CondSignal {
    const fn new() -> Self {
        Self {
            latch: SignalLatch::new(),
            lock: Mutex::new(()),
            wake: Condvar::new(),
        }
    }
}

impl WakeSignal for CondSignal {
    fn post(&self, bits: EventBits) {
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

#[test]
fn test_post_before_wait_returns_immediately() {
    let signal = CondSignal::new();
    signal.post(EventBits::NEW_SAMPLE);
    assert_eq!(signal.wait_any(EventBits::ALL), EventBits::NEW_SAMPLE);
}

#[test]
fn test_double_post_collapses_to_one_wake() {
    let signal = CondSignal::new();

    // Two posts before the waiter runs.
    signal.post(EventBits::NEW_SAMPLE);
    signal.post(EventBits::NEW_SAMPLE);

    // Exactly one pending state is observable.
    assert_eq!(signal.wait_any(EventBits::ALL), EventBits::NEW_SAMPLE);
    assert_eq!(signal.latch.pending(EventBits::ALL), EventBits::NONE);
}

#[test]
fn test_post_wakes_blocked_waiter() {
    let signal = CondSignal::new();

    thread::scope(|scope| {
        let waiter = scope.spawn(|| signal.wait_any(EventBits::ALL));

        // Give the waiter a chance to actually block before posting.
        thread::sleep(Duration::from_millis(20));
        signal.post(EventBits::NEW_SAMPLE);

        assert_eq!(waiter.join().unwrap(), EventBits::NEW_SAMPLE);
    });
}

#[test]
fn test_wait_clears_only_masked_bits() {
    let signal = CondSignal::new();
    let future_bit = EventBits::from_bits(1 << 3);

    signal.post(EventBits::NEW_SAMPLE);
    signal.post(future_bit);

    let fired = signal.wait_any(EventBits::NEW_SAMPLE);
    assert_eq!(fired, EventBits::NEW_SAMPLE);

    // The unrelated bit stays latched for whoever handles it.
    assert_eq!(signal.latch.pending(EventBits::ALL), future_bit);
}
