//! Mailbox handoff tests, including the racing-producer cases that the
//! in-module unit tests cannot cover.

use std::thread;

use rust_wsn_node::SampleMailbox;

#[test]
fn test_single_write_single_take() {
    let mailbox = SampleMailbox::new();
    mailbox.write(0x0123);
    assert_eq!(mailbox.take_latest(), Some(0x0123));
    assert_eq!(mailbox.take_latest(), None);
}

#[test]
fn test_last_write_wins() {
    let mailbox = SampleMailbox::new();
    for value in [10, 20, 30, 40] {
        mailbox.write(value);
    }
    assert_eq!(mailbox.take_latest(), Some(40));
}

// Torn-write injection: the producer alternates between two values whose
// high and low halves are opposites. If the value update were not
// observed atomically, the consumer could read a half-old/half-new
// hybrid (0x0000 or 0xFFFF). It must never see one.
#[test]
fn test_no_torn_reads_under_race() {
    const A: u16 = 0x00FF;
    const B: u16 = 0xFF00;

    let mailbox = SampleMailbox::new();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..50_000u32 {
                mailbox.write(if i % 2 == 0 { A } else { B });
            }
        });

        for _ in 0..50_000 {
            if let Some(value) = mailbox.take_latest() {
                assert!(
                    value == A || value == B,
                    "torn read: got {value:#06x}, expected {A:#06x} or {B:#06x}"
                );
            }
        }
    });
}

// Freshness under concurrency: with a producer writing an increasing
// sequence, every value the consumer observes is newer than the one
// before, and after the producer finishes the final take yields the
// last value written.
#[test]
fn test_takes_are_monotonic_under_race() {
    const LAST: u16 = 9_999;

    let mailbox = SampleMailbox::new();

    thread::scope(|scope| {
        let producer = scope.spawn(|| {
            for value in 0..=LAST {
                mailbox.write(value);
            }
        });

        let mut previous: Option<u16> = None;
        while !producer.is_finished() {
            if let Some(value) = mailbox.take_latest() {
                if let Some(prev) = previous {
                    assert!(value > prev, "stale value {value} after {prev}");
                }
                previous = Some(value);
            }
        }
        producer.join().unwrap();

        // Whatever raced before, the slot now holds the freshest value
        // unless the consumer already drained it.
        match mailbox.take_latest() {
            Some(value) => assert_eq!(value, LAST),
            None => assert_eq!(previous, Some(LAST)),
        }
    });
}
