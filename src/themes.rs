//! Built-in theme set.
//!
//! The stock jingles shipped with the engine: short button feedback beeps
//! and the longer notify sequences. All are far below the buffer capacity,
//! so construction cannot fail.

use std::sync::Arc;

use crate::theme::{TonePacket, ToneTheme};

fn theme(name: &str, tones: &[(u16, u16)]) -> Arc<ToneTheme> {
    let packets: Vec<TonePacket> = tones.iter().map(|&(f, d)| TonePacket::new(f, d)).collect();
    Arc::new(ToneTheme::new(name, packets).expect("stock themes fit the tone buffer"))
}

/// Minimal blip for next/previous navigation
pub fn button_next_prev() -> Arc<ToneTheme> {
    theme("button_next_prev", &[(3000, 1)])
}

/// Short confirmation beep for an accepted button press
pub fn button_ok() -> Arc<ToneTheme> {
    theme("button_ok", &[(3000, 10)])
}

/// Two-tone rising chirp for a reset action
pub fn button_reset() -> Arc<ToneTheme> {
    theme("button_reset", &[(6500, 50), (7500, 80)])
}

/// Single long warning tone
pub fn notify_warning() -> Arc<ToneTheme> {
    theme("notify_warning", &[(1000, 300)])
}

/// Five-tone alternating error sequence
pub fn notify_error() -> Arc<ToneTheme> {
    theme(
        "notify_error",
        &[
            (3050, 150),
            (7200, 100),
            (3050, 150),
            (2000, 100),
            (3050, 150),
        ],
    )
}

/// Two-tone confirmation jingle
pub fn notify_confirm() -> Arc<ToneTheme> {
    theme("notify_confirm", &[(3050, 50), (4000, 30)])
}

/// Every stock theme, in registration order
pub fn defaults() -> Vec<Arc<ToneTheme>> {
    vec![
        button_next_prev(),
        button_ok(),
        button_reset(),
        notify_warning(),
        notify_error(),
        notify_confirm(),
    ]
}
