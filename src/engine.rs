//! Tone playback engine: buffer draining, state machine, condition
//! scheduling.
//!
//! Two periodic schedules drive an engine:
//! - a fast tick calling [`ToneEngine::process_tick`] to consume the buffer
//!   head and retune the backend when it changes (plus, for the pin
//!   backend, an even faster tick calling [`ToneEngine::toggle_tick`]);
//! - a slow tick (reference cadence ~100 ms) calling
//!   [`ToneEngine::run_conditions`] with freshly sampled signal values.
//!
//! Caller-initiated pushes, theme playback and muting run concurrently with
//! both. Shared state is either atomic (flags, current frequency, packet
//! deadline) or guarded by a mutex held for one read-modify-write at a
//! time; enqueueing a whole theme is a single such operation.

use std::sync::atomic::{AtomicU16, AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bitflags::bitflags;
use parking_lot::Mutex;

use crate::backend::ToneBackend;
use crate::condition::ToneCondition;
use crate::queue::ToneQueue;
use crate::theme::{TonePacket, ToneTheme};

/// Backoff between polls while a blocking theme playback drains
const BLOCK_BACKOFF_MICROS: u64 = 100;

bitflags! {
    /// Engine playback state, packed into one atomic byte
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct EngineFlags: u8 {
        /// Packets are queued or sounding
        const PLAYING = 0x01;
        /// Playing, but mid-silent-gap (rest packet active)
        const HALTED = 0x02;
        /// Output suppressed; new tones are rejected
        const MUTED = 0x04;
        /// A blocking theme playback is waiting to drain
        const BLOCKING = 0x08;
    }
}

/// Queued tone playback engine over a hardware backend.
///
/// The engine is `Sync`: share it by reference (or `Arc`) between the tick
/// contexts and callers. All operations take `&self`.
pub struct ToneEngine<B: ToneBackend> {
    queue: Mutex<ToneQueue>,
    backend: Mutex<B>,
    conditions: Mutex<Vec<ToneCondition>>,
    flags: AtomicU8,
    /// Frequency of the packet currently sounding (0 while idle or halted)
    playing_freq: AtomicU16,
    /// Millisecond deadline of the active packet; 0 = nothing active yet
    active_until: AtomicU64,
}

impl<B: ToneBackend> ToneEngine<B> {
    /// Create an idle engine over `backend`
    pub fn new(backend: B) -> Self {
        Self {
            queue: Mutex::new(ToneQueue::new()),
            backend: Mutex::new(backend),
            conditions: Mutex::new(Vec::new()),
            flags: AtomicU8::new(0),
            playing_freq: AtomicU16::new(0),
            active_until: AtomicU64::new(0),
        }
    }

    #[inline]
    fn flags(&self) -> EngineFlags {
        EngineFlags::from_bits_truncate(self.flags.load(Ordering::Acquire))
    }

    #[inline]
    fn set_flags(&self, set: EngineFlags) {
        self.flags.fetch_or(set.bits(), Ordering::AcqRel);
    }

    #[inline]
    fn clear_flags(&self, clear: EngineFlags) {
        self.flags.fetch_and(!clear.bits(), Ordering::AcqRel);
    }

    /// Whether packets are queued or sounding
    #[inline]
    pub fn is_playing(&self) -> bool {
        self.flags().contains(EngineFlags::PLAYING)
    }

    /// Whether a rest packet is active (playing, but silent)
    #[inline]
    pub fn is_halted(&self) -> bool {
        self.flags().contains(EngineFlags::HALTED)
    }

    /// Whether the engine is muted
    #[inline]
    pub fn is_muted(&self) -> bool {
        self.flags().contains(EngineFlags::MUTED)
    }

    /// Whether a blocking theme playback is currently waiting
    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.flags().contains(EngineFlags::BLOCKING)
    }

    /// Frequency currently programmed into the backend (0 while idle or
    /// halted)
    #[inline]
    pub fn current_freq(&self) -> u16 {
        self.playing_freq.load(Ordering::Acquire)
    }

    /// Number of queued packets; 0 while idle
    pub fn buffered_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Enqueue a single tone packet.
    ///
    /// Returns `false` (buffer untouched) when the buffer is full or the
    /// engine is muted. A successful push from idle starts playback: the
    /// next fast tick picks the packet up and retunes the backend.
    pub fn push_tone(&self, packet: TonePacket) -> bool {
        if self.is_muted() {
            return false;
        }
        let pushed = self.queue.lock().push(packet);
        if pushed {
            self.set_flags(EngineFlags::PLAYING);
        }
        pushed
    }

    /// Enqueue every packet of a theme, all-or-nothing.
    ///
    /// Returns `false` (buffer untouched) when the remaining capacity
    /// cannot hold the whole theme, or when muted.
    ///
    /// With `block = true` the calling thread busy-waits (with a bounded
    /// backoff sleep) until playback finishes. Blocking playback must never
    /// be invoked from the tick context: draining only happens via
    /// [`process_tick`](Self::process_tick), so waiting there would
    /// deadlock.
    pub fn play_theme(&self, theme: &ToneTheme, block: bool) -> bool {
        if self.is_muted() {
            return false;
        }
        if !self.queue.lock().push_theme(theme) {
            return false;
        }
        self.set_flags(EngineFlags::PLAYING);
        if block {
            self.set_flags(EngineFlags::BLOCKING);
            while self.is_playing() {
                std::thread::sleep(Duration::from_micros(BLOCK_BACKOFF_MICROS));
            }
            self.clear_flags(EngineFlags::BLOCKING);
        }
        true
    }

    /// Mute or unmute; returns the new muted state.
    ///
    /// Muting during playback kills it synchronously — the hardware is
    /// silenced before this call returns. Unmuting only clears the flag;
    /// playback never auto-resumes.
    pub fn mute(&self, set: bool) -> bool {
        if set {
            self.finish_playing();
            self.set_flags(EngineFlags::MUTED);
        } else {
            self.clear_flags(EngineFlags::MUTED);
        }
        set
    }

    /// Fast periodic tick: consume the buffer head and retune the backend.
    ///
    /// `now_ms` is the caller's monotonic millisecond clock; the engine
    /// only compares it against deadlines derived from earlier values. If
    /// the active packet's duration has not elapsed this does nothing.
    /// Otherwise the next packet is dequeued: its frequency is latched, the
    /// halted state follows `frequency == 0`, and the backend's
    /// frequency-refresh hook runs. An empty buffer finishes playback.
    pub fn process_tick(&self, now_ms: u64) {
        if !self.is_playing() {
            return;
        }
        if now_ms < self.active_until.load(Ordering::Acquire) {
            return;
        }
        let next = self.queue.lock().pop();
        match next {
            Some(packet) => {
                self.playing_freq.store(packet.frequency, Ordering::Release);
                self.active_until
                    .store(now_ms + packet.duration as u64, Ordering::Release);
                if packet.is_rest() {
                    self.set_flags(EngineFlags::HALTED);
                } else {
                    self.clear_flags(EngineFlags::HALTED);
                }
                self.backend.lock().refresh_frequency(packet.frequency);
            }
            None => self.finish_playing(),
        }
    }

    /// Fastest periodic tick: advance the square-wave toggle while audible.
    ///
    /// Forwards to the backend's toggle hook only while playing and not
    /// halted; a no-op for backends without a software square wave.
    pub fn toggle_tick(&self) {
        let flags = self.flags();
        if flags.contains(EngineFlags::PLAYING) && !flags.contains(EngineFlags::HALTED) {
            self.backend.lock().toggle_tick();
        }
    }

    /// Stop playback: reset the buffer and silence the hardware.
    ///
    /// The PLAYING flag is claimed atomically, so concurrent callers (tick
    /// draining the last packet vs. a mute) silence the hardware exactly
    /// once per playback session.
    fn finish_playing(&self) {
        let cleared = (EngineFlags::PLAYING | EngineFlags::HALTED).bits();
        let prev = self.flags.fetch_and(!cleared, Ordering::AcqRel);
        if prev & EngineFlags::PLAYING.bits() == 0 {
            return;
        }
        self.playing_freq.store(0, Ordering::Release);
        self.active_until.store(0, Ordering::Release);
        self.queue.lock().clear();
        self.backend.lock().silence();
    }

    /// Register a condition at startup.
    ///
    /// Conditions are evaluated in registration order against the signal
    /// slice passed to [`run_conditions`](Self::run_conditions).
    pub fn register_condition(&self, theme: Arc<ToneTheme>, play_count: u8) {
        self.conditions
            .lock()
            .push(ToneCondition::new(theme, play_count));
    }

    /// Number of registered conditions
    pub fn condition_count(&self) -> usize {
        self.conditions.lock().len()
    }

    /// Slow periodic tick: evaluate conditions against sampled signals.
    ///
    /// Signals pair with conditions by registration order; a shorter slice
    /// evaluates only the matching prefix. Skipped entirely while muted.
    /// Triggered themes play non-blocking.
    pub fn run_conditions(&self, signals: &[bool]) {
        if self.is_muted() {
            return;
        }
        let mut conditions = self.conditions.lock();
        for (cond, &signal) in conditions.iter_mut().zip(signals) {
            if let Some(theme) = cond.evaluate(signal) {
                self.play_theme(&theme, false);
            }
        }
    }
}
