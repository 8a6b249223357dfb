//! Square-wave backend: toggles a digital pin at a divider-derived rate.

use super::{BeeperPin, ToneBackend, ToneTimer};

/// Pin-toggle tone backend.
///
/// The hardware timer fires the fast toggle tick; `freq_cnt` counts ticks
/// and the pin flips each time the counter reaches the divider threshold,
/// producing a square wave at the requested frequency.
#[derive(Debug)]
pub struct PinToneBackend<P: BeeperPin, T: ToneTimer> {
    pin: P,
    timer: T,
    freq_cnt: u8,
    freq_div: u8,
    pin_state: bool,
}

impl<P: BeeperPin, T: ToneTimer> PinToneBackend<P, T> {
    /// Create a backend over a pin and its toggle timer; the pin starts off
    pub fn new(mut pin: P, timer: T) -> Self {
        pin.off();
        Self {
            pin,
            timer,
            freq_cnt: 0,
            freq_div: 0,
            pin_state: false,
        }
    }

    /// Flip the output pin and restart the tick counter
    #[inline]
    fn toggle(&mut self) {
        self.freq_cnt = 0;
        self.pin_state = !self.pin_state;
        self.pin.set(self.pin_state);
    }
}

impl<P: BeeperPin, T: ToneTimer> ToneBackend for PinToneBackend<P, T> {
    fn refresh_frequency(&mut self, frequency: u16) {
        if frequency > 0 {
            self.freq_div = self.timer.toggle_divider(frequency);
            self.freq_cnt = 0;
            self.timer.tone(frequency);
        } else {
            // Rest packet: stop toggling and wait out the duration.
            self.timer.no_tone();
            self.pin_state = false;
            self.freq_cnt = 0;
            self.pin.set(false);
        }
    }

    fn silence(&mut self) {
        self.timer.no_tone();
        self.pin.off();
        self.freq_div = 0;
        self.freq_cnt = 0;
        self.pin_state = false;
    }

    fn toggle_tick(&mut self) {
        self.freq_cnt = self.freq_cnt.wrapping_add(1);
        if self.freq_cnt >= self.freq_div {
            self.toggle();
        }
    }

    fn freq_div(&self) -> u8 {
        self.freq_div
    }
}
