//! Condition scheduling scenarios: edge debouncing, play budgets and
//! config-driven wiring, all through the engine's slow-tick entry point.

use std::sync::Arc;

use beeptone::{ToneBackend, ToneEngine, TonePacket, ToneTheme};

struct NullBackend;

impl ToneBackend for NullBackend {
    fn refresh_frequency(&mut self, _frequency: u16) {}
    fn silence(&mut self) {}
}

fn beep_theme() -> Arc<ToneTheme> {
    Arc::new(ToneTheme::new("beep", vec![TonePacket::new(3000, 10)]).unwrap())
}

#[test]
fn held_signal_triggers_exactly_once() {
    let engine = ToneEngine::new(NullBackend);
    engine.register_condition(beep_theme(), 0);

    for _ in 0..5 {
        engine.run_conditions(&[true]);
    }
    assert_eq!(engine.buffered_count(), 1);

    // Falling edge re-arms; the next rising edge triggers again
    engine.run_conditions(&[false]);
    engine.run_conditions(&[true]);
    assert_eq!(engine.buffered_count(), 2);
}

#[test]
fn play_count_two_exhausts_on_third_edge() {
    let engine = ToneEngine::new(NullBackend);
    engine.register_condition(beep_theme(), 2);

    for edge in 0..6usize {
        engine.run_conditions(&[true]);
        engine.run_conditions(&[false]);
        let expected = (edge + 1).min(2);
        assert_eq!(engine.buffered_count(), expected, "after edge {edge}");
    }
}

#[test]
fn conditions_pair_with_signals_by_registration_order() {
    let engine = ToneEngine::new(NullBackend);
    let short = Arc::new(ToneTheme::new("short", vec![TonePacket::new(3000, 1)]).unwrap());
    let long = Arc::new(
        ToneTheme::new(
            "long",
            vec![
                TonePacket::new(1000, 300),
                TonePacket::new(0, 100),
                TonePacket::new(1000, 300),
            ],
        )
        .unwrap(),
    );
    engine.register_condition(short, 0);
    engine.register_condition(long, 0);

    engine.run_conditions(&[false, true]);
    assert_eq!(engine.buffered_count(), 3);

    engine.run_conditions(&[true, true]);
    assert_eq!(engine.buffered_count(), 4);
}

#[cfg(feature = "config")]
mod config_driven {
    use super::*;
    use anyhow::Result;
    use beeptone::{BeeperConfig, ThemeRegistry};

    #[test]
    fn json_config_wires_conditions() -> Result<()> {
        let config = BeeperConfig::from_json(
            r#"{
                "themes": [
                    { "name": "ok", "tones": [{ "frequency": 3000, "duration": 10 }] }
                ],
                "conditions": [
                    { "theme": "ok", "play_count": 1 }
                ]
            }"#,
        )?;

        let engine = ToneEngine::new(NullBackend);
        let mut registry = ThemeRegistry::new();
        registry.apply(&config, &engine)?;

        engine.run_conditions(&[true]);
        engine.run_conditions(&[false]);
        engine.run_conditions(&[true]);

        // play_count 1: the second rising edge is skipped
        assert_eq!(engine.buffered_count(), 1);
        Ok(())
    }

    #[cfg(feature = "themes")]
    #[test]
    fn default_themes_wire_by_name() -> Result<()> {
        let config = BeeperConfig::from_json(
            r#"{ "conditions": [ { "theme": "notify_confirm", "play_count": 2 } ] }"#,
        )?;

        let engine = ToneEngine::new(NullBackend);
        let mut registry = ThemeRegistry::with_defaults();
        registry.apply(&config, &engine)?;

        engine.run_conditions(&[true]);
        assert_eq!(engine.buffered_count(), 2); // notify_confirm has 2 tones
        Ok(())
    }
}
