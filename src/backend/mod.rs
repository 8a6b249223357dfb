//! Hardware backend abstraction.
//!
//! [`ToneBackend`] is the strategy seam between the playback engine and the
//! hardware: the engine decides *what* frequency should sound, the backend
//! decides *how* — toggling a digital pin at a divider-derived rate
//! ([`PinToneBackend`]) or programming a PWM channel directly
//! ([`PwmToneBackend`]). Hardware-specific hooks default to no-ops so a
//! backend only implements what its output type needs.
//!
//! The capability traits at the bottom ([`BeeperPin`], [`ToneTimer`],
//! [`PwmChannel`]) are the boundary to the out-of-scope hardware layer;
//! concrete MCU peripherals implement them, tests implement them with
//! recording fakes.

pub mod pin;
pub mod pwm;

pub use pin::PinToneBackend;
pub use pwm::PwmToneBackend;

/// Common interface for beeper hardware backends
pub trait ToneBackend: Send {
    /// Reprogram the hardware for a new frequency.
    ///
    /// Called by the engine whenever the buffer head changes. A frequency
    /// of 0 silences the output for the duration of a rest packet; the
    /// engine tracks the halted state, the backend only touches hardware.
    fn refresh_frequency(&mut self, frequency: u16);

    /// Stop all output and reset hardware state.
    ///
    /// Called once per playback session, when the buffer empties or the
    /// engine is muted mid-playback.
    fn silence(&mut self);

    /// Fast toggle tick for square-wave backends.
    ///
    /// The engine forwards its fastest periodic callback here only while
    /// playing and not halted. Default is a no-op for hardware that encodes
    /// frequency natively.
    fn toggle_tick(&mut self) {}

    /// Current toggle divider. Backends without a software divider report 0.
    fn freq_div(&self) -> u8 {
        0
    }
}

/// Digital output pin capability consumed by [`PinToneBackend`]
pub trait BeeperPin: Send {
    /// Drive the pin to the given level
    fn set(&mut self, level: bool);
    /// Turn the pin off
    fn off(&mut self);
}

/// Tone timer capability consumed by [`PinToneBackend`].
///
/// The timer owns the fast toggle schedule; `toggle_divider` reports how
/// many toggle ticks make up half a period of the requested frequency.
pub trait ToneTimer: Send {
    /// Start (or retune) the toggle timer for `frequency` Hz
    fn tone(&mut self, frequency: u16);
    /// Stop the toggle timer
    fn no_tone(&mut self);
    /// Toggle-tick divider for `frequency` (0 = toggle on every tick)
    fn toggle_divider(&self, frequency: u16) -> u8;
}

/// PWM channel capability consumed by [`PwmToneBackend`]
pub trait PwmChannel: Send {
    /// Program the channel output frequency (0 = off)
    fn set(&mut self, frequency: u16);
}
