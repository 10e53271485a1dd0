//! Radio sender boundary.

use crate::mailbox::SampleValue;

/// Outbound path for sampled values.
///
/// Fire-and-forget: delivery, addressing and retries are entirely the
/// radio stack's concern. The node task inspects no result and performs
/// no retries of its own.
pub trait RadioSender {
    /// Queue one value for transmission.
    fn send_value(&mut self, value: SampleValue);
}
