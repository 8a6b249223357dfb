//! Startup registration: descriptor tables and the theme registry.
//!
//! Theme and condition tables are explicit data built at startup. A
//! [`BeeperConfig`] can be written inline, or loaded from JSON, and applied
//! to an engine once during initialization. Themes
//! register into a [`ThemeRegistry`] (name → shared theme); conditions wire
//! a registered theme to an engine with a play budget.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::backend::ToneBackend;
use crate::engine::ToneEngine;
use crate::theme::{TonePacket, ToneTheme};
use crate::{BeepError, Result};

/// Declarative theme: a name plus its packet sequence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeSpec {
    /// Registry name
    pub name: String,
    /// Packet sequence
    pub tones: Vec<TonePacket>,
}

/// Declarative condition: theme reference plus play budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionSpec {
    /// Name of a theme registered in the same config (or earlier)
    pub theme: String,
    /// Maximum triggers; 0 = unlimited
    #[serde(default)]
    pub play_count: u8,
}

/// Complete startup configuration for one beeper engine
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeeperConfig {
    /// Themes to register
    #[serde(default)]
    pub themes: Vec<ThemeSpec>,
    /// Conditions to wire, in slow-tick signal order
    #[serde(default)]
    pub conditions: Vec<ConditionSpec>,
}

impl BeeperConfig {
    /// Parse a configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Name → theme table built at startup
#[derive(Debug, Default)]
pub struct ThemeRegistry {
    themes: Vec<Arc<ToneTheme>>,
}

impl ThemeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry preloaded with the built-in theme set
    #[cfg(feature = "themes")]
    pub fn with_defaults() -> Self {
        Self {
            themes: crate::themes::defaults(),
        }
    }

    /// Register a theme under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`BeepError::ThemeTooLong`] when the sequence exceeds the
    /// tone buffer capacity.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        tones: impl Into<Box<[TonePacket]>>,
    ) -> Result<Arc<ToneTheme>> {
        let theme = Arc::new(ToneTheme::new(name, tones)?);
        self.themes.push(Arc::clone(&theme));
        Ok(theme)
    }

    /// Look up a registered theme by name
    pub fn get(&self, name: &str) -> Option<Arc<ToneTheme>> {
        self.themes.iter().find(|t| t.name() == name).cloned()
    }

    /// Number of registered themes
    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Register every theme of `config`, then wire its conditions into
    /// `engine` in declaration order (matching the slow-tick signal order).
    ///
    /// # Errors
    ///
    /// Returns [`BeepError::ThemeTooLong`] for an oversized theme and
    /// [`BeepError::UnknownTheme`] for a condition referencing a name that
    /// is registered neither in `config` nor earlier in this registry.
    pub fn apply<B: ToneBackend>(
        &mut self,
        config: &BeeperConfig,
        engine: &ToneEngine<B>,
    ) -> Result<()> {
        for spec in &config.themes {
            self.register(spec.name.clone(), spec.tones.clone())?;
        }
        for spec in &config.conditions {
            let theme = self
                .get(&spec.theme)
                .ok_or_else(|| BeepError::UnknownTheme(spec.theme.clone()))?;
            engine.register_condition(theme, spec.play_count);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ToneBackend;
    use crate::queue::TONE_BUFFER_CAPACITY;
    use std::io::Write;

    struct NullBackend;

    impl ToneBackend for NullBackend {
        fn refresh_frequency(&mut self, _frequency: u16) {}
        fn silence(&mut self) {}
    }

    const CONFIG_JSON: &str = r#"{
        "themes": [
            { "name": "ack", "tones": [{ "frequency": 3000, "duration": 10 }] },
            { "name": "alarm", "tones": [
                { "frequency": 1000, "duration": 300 },
                { "frequency": 0, "duration": 100 },
                { "frequency": 1000, "duration": 300 }
            ] }
        ],
        "conditions": [
            { "theme": "ack", "play_count": 1 },
            { "theme": "alarm" }
        ]
    }"#;

    #[test]
    fn test_json_config_applies() {
        let config = BeeperConfig::from_json(CONFIG_JSON).unwrap();
        let engine = ToneEngine::new(NullBackend);
        let mut registry = ThemeRegistry::new();

        registry.apply(&config, &engine).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(engine.condition_count(), 2);

        let alarm = registry.get("alarm").unwrap();
        assert_eq!(alarm.len(), 3);
        assert_eq!(alarm.total_duration(), 700);

        // The alarm condition (play_count unlisted, defaults to 0) triggers
        // on its rising edge
        engine.run_conditions(&[false, true]);
        assert_eq!(engine.buffered_count(), 3);
    }

    #[test]
    fn test_unknown_theme_rejected() {
        let config = BeeperConfig::from_json(
            r#"{ "conditions": [ { "theme": "missing", "play_count": 1 } ] }"#,
        )
        .unwrap();
        let engine = ToneEngine::new(NullBackend);
        let mut registry = ThemeRegistry::new();

        let err = registry.apply(&config, &engine).unwrap_err();
        assert!(matches!(err, BeepError::UnknownTheme(name) if name == "missing"));
        assert_eq!(engine.condition_count(), 0);
    }

    #[test]
    fn test_oversized_theme_rejected() {
        let mut registry = ThemeRegistry::new();
        let tones = vec![TonePacket::new(1000, 10); TONE_BUFFER_CAPACITY + 1];
        assert!(matches!(
            registry.register("oversized", tones),
            Err(BeepError::ThemeTooLong { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CONFIG_JSON.as_bytes()).unwrap();

        let config = BeeperConfig::from_file(file.path()).unwrap();
        assert_eq!(config.themes.len(), 2);
        assert_eq!(config.conditions.len(), 2);
    }

    #[cfg(feature = "themes")]
    #[test]
    fn test_registry_with_defaults() {
        let registry = ThemeRegistry::with_defaults();
        assert!(registry.get("button_ok").is_some());
        assert!(registry.get("notify_error").is_some());
        assert!(registry.get("nonexistent").is_none());
    }
}
