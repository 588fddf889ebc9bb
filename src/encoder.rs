//! 16-bit mono PCM in a RIFF/WAVE container.
//!
//! ```text
//!  0  "RIFF"     4  36 + data   8  "WAVE"
//! 12  "fmt "    16  16         20  1 (PCM)     22  1 (mono)
//! 24  rate      28  rate * 2   32  2 (align)   34  16 (bits)
//! 36  "data"    40  data bytes 44  little-endian i16 samples
//! ```

use crate::{
    error::{Error, Result, ValidationError},
    render::RenderedAudio,
};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use phonosynth_dsp::WhiteNoise;
use rand::{SeedableRng, rngs::SmallRng};
use std::io::Cursor;
use tracing::debug;

pub const HEADER_LEN: usize = 44;
const BITS_PER_SAMPLE: u16 = 16;
const BYTES_PER_SAMPLE: u16 = BITS_PER_SAMPLE / 8;
/// Peak dither offset relative to full scale.
pub const DITHER_AMPLITUDE: f64 = 1.0 / 65_536.0;
const FULL_SCALE: f64 = 32_767.0;

/// The bit rate a caller asked for. Every hint yields the same 16-bit container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum QualityHint {
    Low,
    #[default]
    Standard,
    High,
    Maximum,
}

impl QualityHint {
    pub const ALL: [QualityHint; 4] = [
        QualityHint::Low,
        QualityHint::Standard,
        QualityHint::High,
        QualityHint::Maximum,
    ];

    #[must_use]
    pub fn bits_per_second(self) -> u32 {
        match self {
            QualityHint::Low => 64_000,
            QualityHint::Standard => 128_000,
            QualityHint::High => 192_000,
            QualityHint::Maximum => 320_000,
        }
    }
}

impl TryFrom<u32> for QualityHint {
    type Error = ValidationError;

    fn try_from(bps: u32) -> std::result::Result<Self, Self::Error> {
        QualityHint::ALL
            .into_iter()
            .find(|q| q.bits_per_second() == bps)
            .ok_or(ValidationError::Quality(bps))
    }
}

fn spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: BITS_PER_SAMPLE,
        sample_format: SampleFormat::Int,
    }
}

/// The fields of a parsed header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WavHeader {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub data_len: u32,
}

impl WavHeader {
    /// Reads back a header written by [`encode`].
    ///
    /// # Errors
    ///
    /// [`Error::Encode`] when `bytes` is not a 16-bit integer PCM container.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let reader = WavReader::new(Cursor::new(bytes))?;
        let spec = reader.spec();
        if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != BITS_PER_SAMPLE {
            return Err(Error::Encode(format!(
                "{}-bit {:?} samples, expected 16-bit integers",
                spec.bits_per_sample, spec.sample_format
            )));
        }
        let block = u32::from(spec.channels) * u32::from(BYTES_PER_SAMPLE);
        Ok(WavHeader {
            sample_rate: spec.sample_rate,
            channels: spec.channels,
            bits_per_sample: spec.bits_per_sample,
            data_len: reader.duration() * block,
        })
    }

    #[must_use]
    pub fn frames(&self) -> u32 {
        let block = u32::from(self.channels) * u32::from(self.bits_per_sample / 8);
        if block == 0 { 0 } else { self.data_len / block }
    }
}

/// Clamps, adds `dither`, clamps again and rounds to 16 bits.
#[must_use]
pub fn quantize(sample: f64, dither: f64) -> i16 {
    let s = (sample.clamp(-1.0, 1.0) + dither).clamp(-1.0, 1.0);
    (s * FULL_SCALE).round() as i16
}

/// Serialises `audio`. With `dither_seed` every sample gets ±1/65536 of seeded noise first.
///
/// # Errors
///
/// [`Error::Encode`] for non-mono audio, a zero sample rate, non-finite samples or a data
/// chunk that does not fit the container.
pub fn encode(audio: &RenderedAudio, dither_seed: Option<u64>) -> Result<Vec<u8>> {
    if audio.channels != 1 {
        return Err(Error::Encode(format!(
            "{} channels, only mono is supported",
            audio.channels
        )));
    }
    if audio.sample_rate == 0 {
        return Err(Error::Encode("sample rate is zero".into()));
    }
    if let Some(i) = audio.samples.iter().position(|s| !s.is_finite()) {
        return Err(Error::Encode(format!("sample {i} is not finite")));
    }
    let data_len = audio
        .samples
        .len()
        .checked_mul(usize::from(BYTES_PER_SAMPLE))
        .and_then(|n| u32::try_from(n).ok())
        .filter(|n| n.checked_add(36).is_some())
        .ok_or_else(|| Error::Encode("data chunk exceeds 4 GiB".into()))?;
    if audio
        .sample_rate
        .checked_mul(u32::from(BYTES_PER_SAMPLE))
        .is_none()
    {
        return Err(Error::Encode("byte rate overflows".into()));
    }

    let mut out = Vec::new();
    out.try_reserve_exact(HEADER_LEN + data_len as usize)
        .map_err(|e| Error::Encode(e.to_string()))?;
    let mut writer = WavWriter::new(Cursor::new(&mut out), spec(audio.sample_rate))?;
    let mut noise =
        dither_seed.map(|seed| WhiteNoise::new(SmallRng::seed_from_u64(seed), DITHER_AMPLITUDE));
    for &sample in &audio.samples {
        let dither = noise.as_mut().map_or(0.0, WhiteNoise::next_sample);
        writer.write_sample(quantize(f64::from(sample), dither))?;
    }
    writer.finalize()?;
    debug!(
        bytes = out.len(),
        sample_rate = audio.sample_rate,
        dither = dither_seed.is_some(),
        "encoded container"
    );
    Ok(out)
}
