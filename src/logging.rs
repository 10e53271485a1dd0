//! Non-blocking diagnostics for the node.
//!
//! ```text
//! node task / ISR         LogRing              drain task
//! ───────────────         ───────              ──────────
//! node_info!() ─────────▶ [e0][e1][e2] ──────▶ UART / console
//! non-blocking            lock-free ring       blocking ok
//! ```
//!
//! The producer path (sampling callback, node task) must never block on
//! I/O, so log records go into a fixed-size lock-free ring and a
//! background task drains them at leisure. When the ring is full the
//! record is dropped and counted; losing a diagnostic line beats stalling
//! the control loop.
//!
//! One producer per ring. The node owns its ring explicitly and passes
//! it where needed; there is no global stream.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

/// Maximum message length in bytes; longer messages are truncated.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring capacity (entries). Must be a power of two.
pub const DEFAULT_RING_SIZE: usize = 64;

/// Severity of a log record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    /// Fixed-width tag for output.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }
}

/// One formatted log record.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Timestamp in microseconds, supplied by the caller's clock.
    pub timestamp_us: i64,
    /// Severity.
    pub level: LogLevel,
    /// Used length of `msg`.
    pub len: u8,
    /// Message bytes, not NUL-terminated.
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// The written message bytes.
    pub fn text(&self) -> &[u8] {
        &self.msg[..self.len as usize]
    }
}

/// Lock-free SPSC ring of log records.
///
/// Single producer (whichever context owns the ring), single consumer
/// (the drain task). `record` never blocks; a full ring drops the record
/// and bumps the drop counter.
pub struct LogRing<const N: usize = DEFAULT_RING_SIZE> {
    entries: UnsafeCell<[LogEntry; N]>,
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: one producer, one consumer, indices coordinated with
// Acquire/Release atomics; a slot is touched by exactly one side at a time.
unsafe impl<const N: usize> Sync for LogRing<N> {}
unsafe impl<const N: usize> Send for LogRing<N> {}

impl<const N: usize> LogRing<N> {
    const MASK: usize = N - 1;

    /// Create an empty ring.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "ring capacity must be a power of 2");

        Self {
            entries: UnsafeCell::new([LogEntry::EMPTY; N]),
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Append a record. Producer side, never blocks.
    ///
    /// Returns `false` if the ring was full and the record was dropped.
    #[inline]
    pub fn record(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let write = self.write_idx.load(Ordering::Relaxed);
        let read = self.read_idx.load(Ordering::Acquire);

        if write.wrapping_sub(read) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: single producer; the consumer only reads slots below
        // write_idx, which is published after the slot is filled.
        unsafe {
            let entry = &mut (*self.entries.get())[(write as usize) & Self::MASK];
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }

        self.write_idx.store(write.wrapping_add(1), Ordering::Release);
        true
    }

    /// Pop the oldest record. Consumer side.
    #[inline]
    pub fn pop(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);

        if read == write {
            return None;
        }

        // SAFETY: single consumer; the producer never rewrites a slot
        // until read_idx has moved past it.
        let entry = unsafe { (*self.entries.get())[(read as usize) & Self::MASK] };

        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Number of records waiting to be drained.
    #[inline]
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        let write = self.write_idx.load(Ordering::Acquire);
        write.wrapping_sub(read)
    }

    /// Count of records dropped because the ring was full.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl<const N: usize> Default for LogRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Format into a fixed buffer, truncating. Returns bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: core::fmt::Arguments<'_>) -> usize {
    use core::fmt::Write;

    struct Cursor<'a> {
        buf: &'a mut [u8],
        pos: usize,
    }

    impl Write for Cursor<'_> {
        fn write_str(&mut self, s: &str) -> core::fmt::Result {
            let bytes = s.as_bytes();
            let room = self.buf.len() - self.pos;
            let take = bytes.len().min(room);
            self.buf[self.pos..self.pos + take].copy_from_slice(&bytes[..take]);
            self.pos += take;
            Ok(())
        }
    }

    let mut cursor = Cursor { buf, pos: 0 };
    let _ = core::fmt::write(&mut cursor, args);
    cursor.pos
}

/// Non-blocking log macro for use anywhere on the producer path.
///
/// Formats into a stack buffer and appends to the given ring; never
/// touches I/O.
#[macro_export]
macro_rules! node_log {
    ($level:expr, $ring:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $ring.record($timestamp, $level, &buf[..len]);
    }};
}

/// Info-level [`node_log!`].
#[macro_export]
macro_rules! node_info {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::node_log!($crate::logging::LogLevel::Info, $ring, $timestamp, $($arg)*)
    };
}

/// Warn-level [`node_log!`].
#[macro_export]
macro_rules! node_warn {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::node_log!($crate::logging::LogLevel::Warn, $ring, $timestamp, $($arg)*)
    };
}

/// Error-level [`node_log!`].
#[macro_export]
macro_rules! node_error {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::node_log!($crate::logging::LogLevel::Error, $ring, $timestamp, $($arg)*)
    };
}

/// Debug-level [`node_log!`].
#[macro_export]
macro_rules! node_debug {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::node_log!($crate::logging::LogLevel::Debug, $ring, $timestamp, $($arg)*)
    };
}
