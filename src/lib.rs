//! Queued beeper/tone playback engine.
//!
//! Queues short audible tone commands (frequency + duration) in a
//! fixed-capacity circular buffer and plays them back through a hardware
//! backend — a digital pin toggled at a frequency-derived divider, or a PWM
//! channel programmed directly. Condition-triggered theme playback binds
//! boolean signals (button events, fault states) to pre-registered jingles
//! with play-count and edge-debounce semantics.
//!
//! # Architecture
//! - [`ToneEngine`] owns the packet buffer and the playback/mute/block
//!   state machine; two periodic callbacks drive it (fast buffer tick,
//!   slow condition tick).
//! - [`ToneBackend`] is the hardware strategy seam with two shipped
//!   implementations, [`PinToneBackend`] and [`PwmToneBackend`], consuming
//!   small capability traits instead of concrete MCU peripherals.
//! - [`ToneTheme`]s are immutable, registered at startup and shared behind
//!   `Arc`.
//!
//! # Crate feature flags
//! - `themes` (default): built-in default theme set (`themes`)
//! - `config` (default): serde descriptor tables + JSON loading (`config`)
//! - `export-wav` (opt-in): WAV rendering of packet sequences (enables
//!   optional `hound` dep)
//!
//! # Quick start
//! ```
//! use beeptone::{BeeperPin, PinToneBackend, ToneEngine, TonePacket, ToneTimer};
//!
//! struct Pin;
//! impl BeeperPin for Pin {
//!     fn set(&mut self, _level: bool) {}
//!     fn off(&mut self) {}
//! }
//!
//! struct Timer;
//! impl ToneTimer for Timer {
//!     fn tone(&mut self, _frequency: u16) {}
//!     fn no_tone(&mut self) {}
//!     fn toggle_divider(&self, _frequency: u16) -> u8 { 0 }
//! }
//!
//! let engine = ToneEngine::new(PinToneBackend::new(Pin, Timer));
//! engine.push_tone(TonePacket::new(3000, 10));
//! engine.process_tick(0);
//! assert!(engine.is_playing());
//! assert_eq!(engine.current_freq(), 3000);
//! ```

#![warn(missing_docs)]

pub mod backend;
pub mod condition;
#[cfg(feature = "config")]
pub mod config;
pub mod engine;
#[cfg(feature = "export-wav")]
pub mod export;
pub mod queue;
pub mod theme;
#[cfg(feature = "themes")]
pub mod themes;

/// Error types for registration, configuration and export operations
///
/// Runtime playback paths never produce errors: a full buffer or a muted
/// engine rejects input with a plain `bool`, everything else is a silent
/// no-op.
#[derive(thiserror::Error, Debug)]
pub enum BeepError {
    /// A theme longer than the tone buffer could never be enqueued
    #[error("theme {name:?} has {len} tones, exceeding the buffer capacity of {capacity}")]
    ThemeTooLong {
        /// Name the theme was registered under
        name: String,
        /// Number of packets in the rejected theme
        len: usize,
        /// The fixed buffer capacity
        capacity: usize,
    },

    /// A condition referenced a theme name that was never registered
    #[error("unknown theme {0:?}")]
    UnknownTheme(String),

    /// Configuration parse error
    #[cfg(feature = "config")]
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    /// IO error from the filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio export error
    #[cfg(feature = "export-wav")]
    #[error("export error: {0}")]
    Export(String),
}

/// Result type for registration and export operations
pub type Result<T> = std::result::Result<T, BeepError>;

// Public API exports
pub use backend::{BeeperPin, PinToneBackend, PwmChannel, PwmToneBackend, ToneBackend, ToneTimer};
pub use condition::ToneCondition;
#[cfg(feature = "config")]
pub use config::{BeeperConfig, ConditionSpec, ThemeRegistry, ThemeSpec};
pub use engine::ToneEngine;
pub use queue::{ToneQueue, TONE_BUFFER_CAPACITY};
pub use theme::{TonePacket, ToneTheme};
