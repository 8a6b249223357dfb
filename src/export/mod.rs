//! Off-device audio export.
//!
//! Renders packet sequences to 16-bit mono WAV, synthesizing the same
//! square wave the pin backend would toggle out. Rest packets render as
//! silence. Useful for previewing registered themes without hardware.

use std::path::Path;

use crate::theme::{TonePacket, ToneTheme};
use crate::{BeepError, Result};

/// Square-wave amplitude, leaving headroom below full scale
const AMPLITUDE: f32 = 0.8;

/// WAV rendering parameters
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Output sample rate in Hz
    pub sample_rate: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
        }
    }
}

/// Synthesize a packet sequence into samples in [-1.0, 1.0]
pub fn render_samples(tones: &[TonePacket], options: RenderOptions) -> Vec<f32> {
    let rate = options.sample_rate as f32;
    let mut samples = Vec::new();
    for packet in tones {
        let count = (options.sample_rate as u64 * packet.duration as u64 / 1000) as usize;
        if packet.is_rest() {
            samples.extend(std::iter::repeat(0.0).take(count));
            continue;
        }
        let half_period = rate / (2.0 * packet.frequency as f32);
        for i in 0..count {
            let phase = (i as f32 / half_period) as u32;
            let level = if phase % 2 == 0 { AMPLITUDE } else { -AMPLITUDE };
            samples.push(level);
        }
    }
    samples
}

/// Render a packet sequence to a 16-bit mono WAV file
pub fn render_tones(
    tones: &[TonePacket],
    path: impl AsRef<Path>,
    options: RenderOptions,
) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: options.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer =
        hound::WavWriter::create(path, spec).map_err(|e| BeepError::Export(e.to_string()))?;
    for sample in render_samples(tones, options) {
        let value = (sample * i16::MAX as f32) as i16;
        writer
            .write_sample(value)
            .map_err(|e| BeepError::Export(e.to_string()))?;
    }
    writer
        .finalize()
        .map_err(|e| BeepError::Export(e.to_string()))?;
    Ok(())
}

/// Render a whole theme to a 16-bit mono WAV file
pub fn render_theme(theme: &ToneTheme, path: impl AsRef<Path>, options: RenderOptions) -> Result<()> {
    render_tones(theme.tones(), path, options)
}
