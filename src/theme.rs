//! Tone packets and immutable tone themes.
//!
//! A [`TonePacket`] is the unit of playback: a frequency in Hz plus a
//! duration in milliseconds. A [`ToneTheme`] is a named, immutable sequence
//! of packets played back-to-back (a jingle). Themes are built once at
//! startup and shared behind `Arc`; conditions and callers never own them.

use crate::queue::TONE_BUFFER_CAPACITY;
use crate::{BeepError, Result};

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

/// A single tone command: frequency in Hz, duration in milliseconds.
///
/// A frequency of 0 is a silent rest — the output stays quiet for
/// `duration` while the playback timer keeps advancing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct TonePacket {
    /// Output frequency in Hz (0 = silent rest)
    pub frequency: u16,
    /// Playback duration in milliseconds
    pub duration: u16,
}

impl TonePacket {
    /// Create a new tone packet
    #[inline]
    pub const fn new(frequency: u16, duration: u16) -> Self {
        Self {
            frequency,
            duration,
        }
    }

    /// Whether this packet is a silent rest (frequency 0)
    #[inline]
    pub const fn is_rest(&self) -> bool {
        self.frequency == 0
    }
}

/// An immutable, named sequence of tone packets.
///
/// There is no mutation API. A theme can never be longer than the tone
/// buffer, so a successfully constructed theme always fits an idle engine
/// in one atomic enqueue.
#[derive(Debug, Clone)]
pub struct ToneTheme {
    name: String,
    tones: Box<[TonePacket]>,
}

impl ToneTheme {
    /// Create a theme from a packet sequence.
    ///
    /// # Errors
    ///
    /// Returns [`BeepError::ThemeTooLong`] if the sequence exceeds
    /// [`TONE_BUFFER_CAPACITY`]. The check runs here, at registration time,
    /// so oversized themes never become a runtime playback failure.
    pub fn new(name: impl Into<String>, tones: impl Into<Box<[TonePacket]>>) -> Result<Self> {
        let name = name.into();
        let tones = tones.into();
        if tones.len() > TONE_BUFFER_CAPACITY {
            return Err(BeepError::ThemeTooLong {
                name,
                len: tones.len(),
                capacity: TONE_BUFFER_CAPACITY,
            });
        }
        Ok(Self { name, tones })
    }

    /// Theme name as registered
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get a copy of the packet at `index`.
    ///
    /// Packets are returned by value; the backing storage stays private to
    /// the theme.
    #[inline]
    pub fn get(&self, index: usize) -> Option<TonePacket> {
        self.tones.get(index).copied()
    }

    /// Number of packets in the theme
    #[inline]
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    /// Whether the theme contains no packets
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }

    /// The packets as a slice
    #[inline]
    pub fn tones(&self) -> &[TonePacket] {
        &self.tones
    }

    /// Total playback duration in milliseconds
    pub fn total_duration(&self) -> u64 {
        self.tones.iter().map(|t| t.duration as u64).sum()
    }
}
