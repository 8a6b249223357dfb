//! Fixed-capacity circular buffer of pending tone packets.
//!
//! The queue keeps an explicit `count` alongside `head`/`tail`, so the
//! empty/full invariant is self-evident: `count == 0` is empty,
//! `count == TONE_BUFFER_CAPACITY` is full, and both indices always stay in
//! range. The queue itself is not thread-safe; the engine wraps it in a
//! mutex held for one read-modify-write at a time.

use crate::theme::{TonePacket, ToneTheme};

/// Number of tone packets a beeper can hold (pending + playing)
pub const TONE_BUFFER_CAPACITY: usize = 50;

/// Fixed-capacity tone packet ring buffer
#[derive(Debug, Clone)]
pub struct ToneQueue {
    buf: [TonePacket; TONE_BUFFER_CAPACITY],
    /// Index of the next packet to pop
    head: usize,
    /// Index of the next free slot
    tail: usize,
    /// Number of queued packets
    count: usize,
}

impl ToneQueue {
    /// Create an empty queue
    pub const fn new() -> Self {
        Self {
            buf: [TonePacket::new(0, 0); TONE_BUFFER_CAPACITY],
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    /// Number of queued packets
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the queue holds no packets
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Free slots remaining
    #[inline]
    pub fn remaining(&self) -> usize {
        TONE_BUFFER_CAPACITY - self.count
    }

    /// Push one packet; returns `false` (queue unchanged) when full
    pub fn push(&mut self, packet: TonePacket) -> bool {
        if self.count == TONE_BUFFER_CAPACITY {
            return false;
        }
        self.buf[self.tail] = packet;
        self.tail = (self.tail + 1) % TONE_BUFFER_CAPACITY;
        self.count += 1;
        true
    }

    /// Push every packet of a theme, all-or-nothing.
    ///
    /// Returns `false` and leaves the queue untouched when the remaining
    /// capacity cannot hold the whole theme.
    pub fn push_theme(&mut self, theme: &ToneTheme) -> bool {
        if theme.len() > self.remaining() {
            return false;
        }
        for packet in theme.tones() {
            self.buf[self.tail] = *packet;
            self.tail = (self.tail + 1) % TONE_BUFFER_CAPACITY;
        }
        self.count += theme.len();
        true
    }

    /// Pop the packet at the head
    pub fn pop(&mut self) -> Option<TonePacket> {
        if self.count == 0 {
            return None;
        }
        let packet = self.buf[self.head];
        self.head = (self.head + 1) % TONE_BUFFER_CAPACITY;
        self.count -= 1;
        Some(packet)
    }

    /// Drop all queued packets
    pub fn clear(&mut self) {
        self.head = 0;
        self.tail = 0;
        self.count = 0;
    }
}

impl Default for ToneQueue {
    fn default() -> Self {
        Self::new()
    }
}
