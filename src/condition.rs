//! Condition-triggered theme playback.
//!
//! A [`ToneCondition`] binds a caller-sampled boolean signal to a theme.
//! The `heard` latch debounces edges so a held signal triggers once per
//! rising edge; a non-zero play count bounds the total number of triggers
//! for the lifetime of the device.

use std::sync::Arc;

use crate::theme::ToneTheme;

/// Boolean-signal trigger for theme playback
#[derive(Debug, Clone)]
pub struct ToneCondition {
    /// Edge-debounce latch: signal has been continuously true since the
    /// last trigger
    heard: bool,
    /// Times this condition has triggered (never reset)
    plays: u8,
    /// Maximum triggers; 0 = unlimited (looping condition)
    play_count: u8,
    theme: Arc<ToneTheme>,
}

impl ToneCondition {
    /// Create a condition playing `theme` at most `play_count` times
    /// (0 = unlimited)
    pub fn new(theme: Arc<ToneTheme>, play_count: u8) -> Self {
        Self {
            heard: false,
            plays: 0,
            play_count,
            theme,
        }
    }

    /// Whether this condition triggers without limit
    #[inline]
    pub fn is_loop(&self) -> bool {
        self.play_count == 0
    }

    /// Times this condition has triggered so far
    #[inline]
    pub fn plays(&self) -> u8 {
        self.plays
    }

    /// The theme this condition plays
    #[inline]
    pub fn theme(&self) -> &Arc<ToneTheme> {
        &self.theme
    }

    /// Feed one freshly sampled signal value.
    ///
    /// Returns the theme to play on a rising edge with play budget
    /// remaining. While the signal stays high nothing re-triggers; a
    /// falling edge re-arms the latch. `plays` only ever increases, so an
    /// exhausted bounded condition stays exhausted even across re-arms.
    pub fn evaluate(&mut self, signal: bool) -> Option<Arc<ToneTheme>> {
        if !signal {
            self.heard = false;
            return None;
        }
        if self.heard {
            return None;
        }
        self.heard = true;
        if !self.is_loop() && self.plays >= self.play_count {
            return None;
        }
        self.plays = self.plays.saturating_add(1);
        Some(Arc::clone(&self.theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::TonePacket;

    fn theme() -> Arc<ToneTheme> {
        Arc::new(ToneTheme::new("beep", vec![TonePacket::new(3000, 10)]).unwrap())
    }

    #[test]
    fn test_single_trigger_while_held() {
        let mut cond = ToneCondition::new(theme(), 0);

        assert!(cond.evaluate(true).is_some());
        assert!(cond.evaluate(true).is_none());
        assert!(cond.evaluate(true).is_none());
        assert_eq!(cond.plays(), 1);
    }

    #[test]
    fn test_falling_edge_rearms() {
        let mut cond = ToneCondition::new(theme(), 0);

        assert!(cond.evaluate(true).is_some());
        assert!(cond.evaluate(false).is_none());
        assert!(cond.evaluate(true).is_some());
        assert_eq!(cond.plays(), 2);
    }

    #[test]
    fn test_play_count_exhausts_forever() {
        let mut cond = ToneCondition::new(theme(), 2);
        assert!(!cond.is_loop());

        // 1st and 2nd rising edges trigger
        assert!(cond.evaluate(true).is_some());
        cond.evaluate(false);
        assert!(cond.evaluate(true).is_some());
        cond.evaluate(false);

        // 3rd and every later rising edge is silently skipped
        for _ in 0..4 {
            assert!(cond.evaluate(true).is_none());
            cond.evaluate(false);
        }
        assert_eq!(cond.plays(), 2);
    }

    #[test]
    fn test_exhausted_rising_edge_still_latches() {
        let mut cond = ToneCondition::new(theme(), 1);
        assert!(cond.evaluate(true).is_some());
        cond.evaluate(false);

        // Exhausted: the rising edge sets the latch without triggering, so
        // the budget check is not repeated while the signal stays high.
        assert!(cond.evaluate(true).is_none());
        assert!(cond.evaluate(true).is_none());
    }

    #[test]
    fn test_loop_condition_unbounded() {
        let mut cond = ToneCondition::new(theme(), 0);
        assert!(cond.is_loop());

        for _ in 0..10 {
            assert!(cond.evaluate(true).is_some());
            assert!(cond.evaluate(false).is_none());
        }
        assert_eq!(cond.plays(), 10);
    }
}
