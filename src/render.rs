//! Turning timelines into sound, either into a buffer or onto the output device.

use crate::{
    config::Config,
    device::{OutputDevice, PlaybackHandle},
    error::{Error, Result},
    synthesis::{PhonemeVoice, SignalGraph, Timeline},
};
use rand::Rng;
use tracing::{debug, info};

/// A finished mono buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedAudio {
    pub sample_rate: u32,
    pub channels: u16,
    pub samples: Vec<f32>,
    /// seconds
    pub duration: f64,
}

impl RenderedAudio {
    #[must_use]
    pub fn new(sample_rate: u32, samples: Vec<f32>) -> Self {
        let duration = if sample_rate == 0 {
            0.0
        } else {
            samples.len() as f64 / f64::from(sample_rate)
        };
        RenderedAudio {
            sample_rate,
            channels: 1,
            samples,
            duration,
        }
    }

    /// Zero samples.
    #[must_use]
    pub fn silent(sample_rate: u32) -> Self {
        Self::new(sample_rate, Vec::new())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0, |m, s| m.max(s.abs()))
    }
}

/// Gain and compensation applied to every phoneme voice.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Mix {
    master_gain: f64,
    compensate: bool,
}

impl Mix {
    fn voices(&self, graphs: &[SignalGraph], sample_rate: u32) -> Result<Vec<PhonemeVoice>> {
        let rate = sample_rate as usize;
        graphs
            .iter()
            .map(|graph| {
                let compensation = if self.compensate {
                    graph.formant_compensation(rate).map_err(render_error)?
                } else {
                    1.0
                };
                graph
                    .instantiate(rate, self.master_gain * compensation)
                    .map_err(render_error)
            })
            .collect()
    }
}

fn render_error(message: &str) -> Error {
    Error::Render(message.to_owned())
}

/// Renders a whole timeline into memory.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineRenderer {
    sample_rate: u32,
    mix: Mix,
    max_render_secs: f64,
}

impl OfflineRenderer {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        OfflineRenderer {
            sample_rate: config.sample_rate,
            mix: Mix {
                master_gain: config.master_gain,
                compensate: config.formant_gain_compensation,
            },
            max_render_secs: config.max_render_secs,
        }
    }

    #[must_use]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Frames a timeline occupies: its duration times the sample rate, rounded.
    #[must_use]
    pub fn frames(&self, timeline: &Timeline) -> usize {
        (timeline.duration() * f64::from(self.sample_rate)).round() as usize
    }

    /// Realizes and renders `timeline` on the calling thread.
    ///
    /// # Errors
    ///
    /// [`Error::Render`] when the timeline is longer than the configured limit, the buffer
    /// cannot be allocated or a filter rejects its parameters.
    pub fn render_blocking<R: Rng>(
        &self,
        timeline: &Timeline,
        rng: &mut R,
    ) -> Result<RenderedAudio> {
        let seconds = timeline.duration();
        if !seconds.is_finite() || seconds > self.max_render_secs {
            return Err(Error::Render(format!(
                "{seconds:.1} s exceeds the {:.1} s render limit",
                self.max_render_secs
            )));
        }
        let frames = self.frames(timeline);
        let mut mix: Vec<f64> = Vec::new();
        mix.try_reserve_exact(frames)
            .map_err(|e| Error::Render(format!("cannot allocate {frames} frames: {e}")))?;
        mix.resize(frames, 0.0);

        let graphs = timeline.realize_all(rng).map_err(render_error)?;
        let origin = (timeline.origin * f64::from(self.sample_rate)).ceil() as u64;
        for mut voice in self.mix.voices(&graphs, self.sample_rate)? {
            voice.mix_into(origin, &mut mix);
        }

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(frames)
            .map_err(|e| Error::Render(format!("cannot allocate {frames} frames: {e}")))?;
        samples.extend(mix.iter().map(|s| *s as f32));
        if let Some(i) = samples.iter().position(|s| !s.is_finite()) {
            return Err(Error::Render(format!("frame {i} is not finite")));
        }
        let audio = RenderedAudio::new(self.sample_rate, samples);
        debug!(
            frames,
            phonemes = graphs.len(),
            peak = audio.peak(),
            "rendered offline"
        );
        Ok(audio)
    }

    /// Renders on the blocking pool. Nothing is observable until the whole buffer is done.
    ///
    /// # Errors
    ///
    /// See [`OfflineRenderer::render_blocking`].
    pub async fn render<R>(&self, timeline: Timeline, mut rng: R) -> Result<RenderedAudio>
    where
        R: Rng + Send + 'static,
    {
        let renderer = *self;
        tokio::task::spawn_blocking(move || renderer.render_blocking(&timeline, &mut rng))
            .await
            .map_err(|e| Error::Render(format!("render task failed: {e}")))?
    }
}

/// Schedules timelines onto an [`OutputDevice`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RealTimeRenderer {
    mix: Mix,
}

impl RealTimeRenderer {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        RealTimeRenderer {
            mix: Mix {
                master_gain: config.master_gain,
                compensate: config.formant_gain_compensation,
            },
        }
    }

    /// Commits every phoneme of `timeline`, whose times are on the device clock.
    ///
    /// # Errors
    ///
    /// [`Error::EngineNotReady`] unless the device is running; [`Error::Render`] when a
    /// filter rejects its parameters.
    pub fn play<R: Rng>(
        &self,
        device: &OutputDevice,
        timeline: &Timeline,
        rng: &mut R,
    ) -> Result<PlaybackHandle> {
        let graphs = timeline.realize_all(rng).map_err(render_error)?;
        let voices = self.mix.voices(&graphs, device.sample_rate())?;
        let handle = device.schedule(voices, timeline.origin, timeline.end())?;
        info!(
            phonemes = graphs.len(),
            start = handle.start_time(),
            end = handle.end_time(),
            "playing"
        );
        Ok(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        acoustic::AcousticModel,
        lexicon::{Language, Lexicon, Utterance},
        synthesis::DurationModel,
        voice::{EffectiveParams, RuntimeModifiers, VoiceProfile},
    };
    use rand::{SeedableRng, rngs::SmallRng};

    fn config() -> Config {
        Config {
            sample_rate: 16_000,
            ..Config::default()
        }
    }

    fn timeline(text: &str) -> Timeline {
        let params = EffectiveParams::new(&VoiceProfile::default(), &RuntimeModifiers::default());
        Timeline::build(
            &Lexicon::new().analyze(text),
            &AcousticModel::new(),
            &params,
            DurationModel::Uniform,
            0.0,
        )
    }

    #[test]
    fn buffer_length_matches_timeline() {
        let renderer = OfflineRenderer::new(&config());
        let t = timeline("hello world");
        let audio = renderer
            .render_blocking(&t, &mut SmallRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(audio.samples.len(), (t.duration() * 16_000.0).round() as usize);
        assert!((audio.duration - t.duration()).abs() < 1e-3);
        assert!(audio.peak() > 0.0);
    }

    #[test]
    fn empty_timeline_is_silent() {
        let renderer = OfflineRenderer::new(&config());
        let audio = renderer
            .render_blocking(&timeline(""), &mut SmallRng::seed_from_u64(1))
            .unwrap();
        assert!(audio.is_empty());
        assert_eq!(audio.duration, 0.0);
    }

    #[test]
    fn render_limit() {
        let renderer = OfflineRenderer::new(&Config {
            max_render_secs: 0.5,
            ..config()
        });
        let err = renderer
            .render_blocking(
                &timeline("a rather long sentence that takes a while"),
                &mut SmallRng::seed_from_u64(1),
            )
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[test]
    fn unsupported_symbols_still_sound() {
        let params = EffectiveParams::new(&VoiceProfile::default(), &RuntimeModifiers::default());
        let utterance = Utterance {
            language: Language::Hindi,
            symbols: Lexicon::new().resolve("hello"),
        };
        let t = Timeline::build(
            &utterance,
            &AcousticModel::new(),
            &params,
            DurationModel::Uniform,
            0.0,
        );
        assert_eq!(t.unsupported, 4);
        let audio = OfflineRenderer::new(&config())
            .render_blocking(&t, &mut SmallRng::seed_from_u64(4))
            .unwrap();
        assert!(!audio.is_empty());
        assert!(audio.peak() > 0.0);
    }

    #[test]
    fn broken_envelope_is_a_render_error() {
        let mut t = timeline("ma");
        for event in &mut t.events {
            event.start = -1.0;
        }
        let err = OfflineRenderer::new(&config())
            .render_blocking(&t, &mut SmallRng::seed_from_u64(1))
            .unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }

    #[tokio::test]
    async fn async_render_matches_blocking() {
        let renderer = OfflineRenderer::new(&config());
        let t = timeline("namaste");
        let blocking = renderer
            .render_blocking(&t, &mut SmallRng::seed_from_u64(2))
            .unwrap();
        let awaited = renderer
            .render(t, SmallRng::seed_from_u64(2))
            .await
            .unwrap();
        assert_eq!(blocking, awaited);
    }
}
