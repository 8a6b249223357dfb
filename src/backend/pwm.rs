//! PWM backend: the channel hardware encodes frequency natively.

use super::{PwmChannel, ToneBackend};

/// PWM tone backend.
///
/// Frequency is programmed straight into the channel; the toggle divider
/// stays the no-op default since there is no software square wave to time.
#[derive(Debug)]
pub struct PwmToneBackend<C: PwmChannel> {
    channel: C,
}

impl<C: PwmChannel> PwmToneBackend<C> {
    /// Create a backend over a PWM channel; the output starts at 0
    pub fn new(mut channel: C) -> Self {
        channel.set(0);
        Self { channel }
    }
}

impl<C: PwmChannel> ToneBackend for PwmToneBackend<C> {
    fn refresh_frequency(&mut self, frequency: u16) {
        self.channel.set(frequency);
    }

    fn silence(&mut self) {
        self.channel.set(0);
    }
}
