//! Engine configuration, loaded from TOML.

use crate::{
    error::{Error, Result},
    synthesis::DurationModel,
    voice::VoiceProfile,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_sample_rate() -> u32 {
    44_100
}

fn default_lead_in_secs() -> f64 {
    0.1
}

fn default_master_gain() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_preview_chars() -> usize {
    50
}

fn default_preview_rate_boost() -> f64 {
    1.2
}

fn default_max_render_secs() -> f64 {
    600.0
}

fn default_block_frames() -> usize {
    512
}

/// Settings shared by every request a synthesizer serves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output sample rate in Hz.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Delay between a real-time request and its first phoneme, in seconds.
    #[serde(default = "default_lead_in_secs")]
    pub lead_in_secs: f64,

    #[serde(default = "default_master_gain")]
    pub master_gain: f64,

    /// Add ±1/65536 of noise before quantizing.
    #[serde(default = "default_true")]
    pub dither: bool,

    /// Seed for jitter, shimmer and dither. Unseeded requests draw from the OS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Scale each phoneme by the inverse of its formant cascade's peak gain.
    #[serde(default = "default_true")]
    pub formant_gain_compensation: bool,

    #[serde(default)]
    pub duration_model: DurationModel,

    /// Characters of text a preview speaks.
    #[serde(default = "default_preview_chars")]
    pub preview_chars: usize,

    /// Syllable rate multiplier for previews.
    #[serde(default = "default_preview_rate_boost")]
    pub preview_rate_boost: f64,

    /// Longest offline render accepted, in seconds.
    #[serde(default = "default_max_render_secs")]
    pub max_render_secs: f64,

    /// Treat blank text as a validation error instead of returning an empty container.
    #[serde(default)]
    pub reject_empty_text: bool,

    /// Frames mixed per block by the output device.
    #[serde(default = "default_block_frames")]
    pub block_frames: usize,

    /// Extra voices; one with a built-in id replaces the built-in voice.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub voices: Vec<VoiceProfile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            lead_in_secs: default_lead_in_secs(),
            master_gain: default_master_gain(),
            dither: true,
            seed: None,
            formant_gain_compensation: true,
            duration_model: DurationModel::default(),
            preview_chars: default_preview_chars(),
            preview_rate_boost: default_preview_rate_boost(),
            max_render_secs: default_max_render_secs(),
            reject_empty_text: false,
            block_frames: default_block_frames(),
            voices: Vec::new(),
        }
    }
}

impl Config {
    /// Reads and validates a TOML file.
    ///
    /// # Errors
    ///
    /// IO failures, malformed TOML and invalid values.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// # Errors
    ///
    /// Malformed TOML and invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::Config`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| Err(Error::Config(msg));
        if self.sample_rate < 8_000 || self.sample_rate > 192_000 {
            return fail(format!("sample_rate {} is outside 8000..=192000", self.sample_rate));
        }
        if !(0.0..=10.0).contains(&self.lead_in_secs) {
            return fail(format!("lead_in_secs {} is outside 0..=10", self.lead_in_secs));
        }
        if !(0.0..=1.0).contains(&self.master_gain) {
            return fail(format!("master_gain {} is outside 0..=1", self.master_gain));
        }
        if self.preview_chars == 0 {
            return fail("preview_chars must be > 0".into());
        }
        if !(self.preview_rate_boost.is_finite() && self.preview_rate_boost > 0.0) {
            return fail("preview_rate_boost must be > 0".into());
        }
        if !(self.max_render_secs.is_finite() && self.max_render_secs > 0.0) {
            return fail("max_render_secs must be > 0".into());
        }
        if self.block_frames == 0 || self.block_frames > 65_536 {
            return fail(format!("block_frames {} is outside 1..=65536", self.block_frames));
        }
        for voice in &self.voices {
            voice.validate().map_err(|e| Error::Config(e.to_string()))?;
        }
        Ok(())
    }
}
