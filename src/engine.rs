//! The request-level facade: text and voice settings in, audio out.

use crate::{
    acoustic::AcousticModel,
    bridge::{BridgeRequest, SpeechBridge},
    config::Config,
    device::{OutputDevice, PlaybackHandle},
    encoder::{self, QualityHint},
    error::{Result, ValidationError},
    lexicon::{Lexicon, Utterance},
    render::{OfflineRenderer, RealTimeRenderer, RenderedAudio},
    synthesis::Timeline,
    voice::{EffectiveParams, RuntimeModifiers, VoiceCatalog, VoiceProfile},
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One call's worth of text and settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: String,
    pub modifiers: RuntimeModifiers,
    pub quality: QualityHint,
    /// Overrides the configured seed.
    pub seed: Option<u64>,
}

impl SynthesisRequest {
    /// `text` in the default voice with neutral modifiers.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        SynthesisRequest {
            text: text.into(),
            voice: VoiceProfile::default().id,
            modifiers: RuntimeModifiers::default(),
            quality: QualityHint::default(),
            seed: None,
        }
    }

    #[must_use]
    pub fn voice(mut self, id: impl Into<String>) -> Self {
        self.voice = id.into();
        self
    }

    #[must_use]
    pub fn pitch_offset(mut self, offset: i32) -> Self {
        self.modifiers.pitch_offset = offset;
        self
    }

    #[must_use]
    pub fn speed(mut self, speed: f64) -> Self {
        self.modifiers.speed = speed;
        self
    }

    #[must_use]
    pub fn volume(mut self, volume: u8) -> Self {
        self.modifiers.volume = volume;
        self
    }

    #[must_use]
    pub fn quality(mut self, quality: QualityHint) -> Self {
        self.quality = quality;
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Random streams of one request.
struct Seeds {
    jitter: SmallRng,
    dither: Option<u64>,
}

/// A validated request, ready to place on a clock.
struct Prepared<'a> {
    utterance: Utterance,
    voice: &'a VoiceProfile,
    params: EffectiveParams,
}

/// Text-to-speech over the built-in tables.
pub struct Synthesizer {
    config: Config,
    lexicon: Lexicon,
    model: AcousticModel,
    voices: VoiceCatalog,
    offline: OfflineRenderer,
    realtime: RealTimeRenderer,
    bridge: Option<Arc<dyn SpeechBridge>>,
}

impl Synthesizer {
    /// # Errors
    ///
    /// Fails when the configuration or one of its voices is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let voices = VoiceCatalog::with_profiles(config.voices.iter().cloned())?;
        Ok(Synthesizer {
            lexicon: Lexicon::new(),
            model: AcousticModel::new(),
            voices,
            offline: OfflineRenderer::new(&config),
            realtime: RealTimeRenderer::new(&config),
            bridge: None,
            config,
        })
    }

    /// Tries `bridge` first for [`Synthesizer::synthesize`] whenever it reports ready.
    #[must_use]
    pub fn with_bridge(mut self, bridge: Arc<dyn SpeechBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn voices(&self) -> &VoiceCatalog {
        &self.voices
    }

    /// Language and phoneme symbols of `text`.
    #[must_use]
    pub fn analyze(&self, text: &str) -> Utterance {
        self.lexicon.analyze(text)
    }

    fn prepare(&self, request: &SynthesisRequest, rate_boost: f64) -> Result<Prepared<'_>> {
        request.modifiers.validate()?;
        let voice = self
            .voices
            .get(&request.voice)
            .ok_or_else(|| ValidationError::UnknownVoice(request.voice.clone()))?;
        if self.config.reject_empty_text && request.text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        let params = EffectiveParams::new(voice, &request.modifiers).with_rate_boost(rate_boost);
        let utterance = self.lexicon.analyze(&request.text);
        Ok(Prepared {
            utterance,
            voice,
            params,
        })
    }

    fn timeline(&self, prepared: &Prepared<'_>, origin: f64) -> Timeline {
        Timeline::build(
            &prepared.utterance,
            &self.model,
            &prepared.params,
            self.config.duration_model,
            origin,
        )
    }

    fn seeds(&self, request: &SynthesisRequest) -> Seeds {
        let mut jitter = match request.seed.or(self.config.seed) {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        let dither = self.config.dither.then(|| {
            match request.seed.or(self.config.seed) {
                Some(seed) => seed.wrapping_add(u64::from(request.quality.bits_per_second())),
                None => jitter.random(),
            }
        });
        Seeds { jitter, dither }
    }

    /// Renders offline and returns the dither seed the encoder should use.
    async fn render_with(
        &self,
        request: &SynthesisRequest,
        rate_boost: f64,
    ) -> Result<(RenderedAudio, Option<u64>)> {
        let prepared = self.prepare(request, rate_boost)?;
        let timeline = self.timeline(&prepared, 0.0);
        let Seeds { jitter, dither } = self.seeds(request);
        let audio = self.offline.render(timeline, jitter).await?;
        Ok((audio, dither))
    }

    /// Renders `request` into a buffer without encoding it.
    ///
    /// # Errors
    ///
    /// Validation and render failures.
    pub async fn render(&self, request: &SynthesisRequest) -> Result<RenderedAudio> {
        Ok(self.render_with(request, 1.0).await?.0)
    }

    /// Renders and encodes `request`. Blank text yields a header-only container unless
    /// the configuration rejects it.
    ///
    /// # Errors
    ///
    /// Validation, render and encode failures. Bridge failures are logged and never returned.
    pub async fn synthesize(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        if let Some(bytes) = self.try_bridge(request).await? {
            return Ok(bytes);
        }
        let (audio, dither) = self.render_with(request, 1.0).await?;
        let bytes = encoder::encode(&audio, dither)?;
        info!(
            voice = %request.voice,
            seconds = audio.duration,
            bytes = bytes.len(),
            "synthesized"
        );
        Ok(bytes)
    }

    async fn try_bridge(&self, request: &SynthesisRequest) -> Result<Option<Vec<u8>>> {
        let Some(bridge) = &self.bridge else {
            return Ok(None);
        };
        let prepared = self.prepare(request, 1.0)?;
        if prepared.utterance.symbols.is_empty() || !bridge.is_ready().await {
            return Ok(None);
        }
        let bridge_request = BridgeRequest::new(&request.text, prepared.voice, &request.modifiers);
        match bridge.synthesize(bridge_request).await {
            Ok(bytes) => {
                debug!(bytes = bytes.len(), "speech bridge answered");
                Ok(Some(bytes))
            }
            Err(e) => {
                warn!("speech bridge failed, synthesizing locally: {e}");
                Ok(None)
            }
        }
    }

    /// The first characters of `request`, spoken a little faster. Never uses the bridge.
    ///
    /// # Errors
    ///
    /// Validation, render and encode failures.
    pub async fn preview(&self, request: &SynthesisRequest) -> Result<Vec<u8>> {
        let mut request = request.clone();
        request.text = request.text.chars().take(self.config.preview_chars).collect();
        let (audio, dither) = self
            .render_with(&request, self.config.preview_rate_boost)
            .await?;
        debug!(chars = request.text.chars().count(), "rendered preview");
        encoder::encode(&audio, dither)
    }

    /// Plays `request` on `device`, resuming it first when it is suspended. The first
    /// phoneme starts one lead-in after the device's current time.
    ///
    /// # Errors
    ///
    /// Validation failures before the device is touched, then
    /// [`crate::Error::EngineNotReady`] when it cannot resume.
    pub async fn speak(
        &self,
        device: &OutputDevice,
        request: &SynthesisRequest,
    ) -> Result<PlaybackHandle> {
        let prepared = self.prepare(request, 1.0)?;
        device.resume().await?;
        let timeline = self.timeline(&prepared, device.now() + self.config.lead_in_secs);
        let mut seeds = self.seeds(request);
        self.realtime.play(device, &timeline, &mut seeds.jitter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        device::{CaptureSink, ClockMode, DeviceState},
    };
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn synth() -> Synthesizer {
        Synthesizer::new(Config {
            sample_rate: 16_000,
            seed: Some(11),
            ..Config::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn rejects_out_of_range_requests() {
        let s = synth();
        let err = s
            .synthesize(&SynthesisRequest::new("hi").speed(5.0))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::Speed(_))));
        let err = s
            .synthesize(&SynthesisRequest::new("hi").voice("nobody"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::UnknownVoice(_))
        ));
    }

    #[tokio::test]
    async fn empty_text_policy() {
        let bytes = synth().synthesize(&SynthesisRequest::new("  ")).await.unwrap();
        assert_eq!(bytes.len(), encoder::HEADER_LEN);

        let strict = Synthesizer::new(Config {
            reject_empty_text: true,
            ..Config::default()
        })
        .unwrap();
        let err = strict.synthesize(&SynthesisRequest::new("")).await.unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyText)));
    }

    #[tokio::test]
    async fn preview_is_shorter_and_faster() {
        let s = synth();
        let text = "the quick brown fox jumps over the lazy dog and keeps on running";
        let full = s.render(&SynthesisRequest::new(text)).await.unwrap();
        let preview = s.preview(&SynthesisRequest::new(text)).await.unwrap();
        let frames = (preview.len() - encoder::HEADER_LEN) / 2;
        assert!(frames < full.samples.len());
    }

    struct FakeBridge {
        ready: bool,
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SpeechBridge for FakeBridge {
        async fn is_ready(&self) -> bool {
            self.ready
        }

        async fn synthesize(&self, request: BridgeRequest) -> Result<Vec<u8>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(Error::Bridge("connection refused".into()))
            } else {
                Ok(request.speaker_id.into_bytes())
            }
        }
    }

    fn bridge(ready: bool, fail: bool) -> Arc<FakeBridge> {
        Arc::new(FakeBridge {
            ready,
            fail,
            calls: AtomicUsize::new(0),
        })
    }

    #[tokio::test]
    async fn ready_bridge_is_used() {
        let remote = bridge(true, false);
        let s = synth().with_bridge(remote.clone());
        let bytes = s
            .synthesize(&SynthesisRequest::new("hello").voice("emma-en"))
            .await
            .unwrap();
        assert_eq!(bytes, b"p227");
        // previews stay local
        let preview = s.preview(&SynthesisRequest::new("hello")).await.unwrap();
        assert!(preview.starts_with(b"RIFF"));
        assert_eq!(remote.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_or_idle_bridge_falls_back() {
        for (ready, fail, calls) in [(true, true, 1), (false, false, 0)] {
            let remote = bridge(ready, fail);
            let s = synth().with_bridge(remote.clone());
            let bytes = s.synthesize(&SynthesisRequest::new("hello")).await.unwrap();
            assert!(bytes.starts_with(b"RIFF"));
            assert_eq!(remote.calls.load(Ordering::SeqCst), calls);
        }
    }

    #[tokio::test]
    async fn speak_resumes_the_device() {
        let s = synth();
        let sink = CaptureSink::new();
        let device = OutputDevice::acquire(
            &Config {
                sample_rate: 16_000,
                ..Config::default()
            },
            Box::new(sink.clone()),
            ClockMode::Manual,
        );
        let handle = s
            .speak(&device, &SynthesisRequest::new("ma"))
            .await
            .unwrap();
        assert_eq!(device.state(), DeviceState::Running);
        assert!((handle.start_time() - 0.1).abs() < 1e-12);
        device.advance(16_000).unwrap();
        assert!(handle.is_finished());
        assert!(sink.samples().iter().any(|s| *s != 0.0));
    }
}
