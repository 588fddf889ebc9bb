//! Timeline placement and per-phoneme signal graphs.
//!
//! A [`Timeline`] places every symbol of an utterance back to back. Each
//! sounding event is then realized into a [`SignalGraph`]: one oscillator,
//! three band-pass formant filters in series and an amplitude envelope. A
//! graph is only a description; [`SignalGraph::instantiate`] turns it into a
//! [`PhonemeVoice`] that produces samples.

use crate::{
    acoustic::AcousticModel,
    lexicon::{Language, Symbol, Utterance},
    voice::{EffectiveParams, MIN_FREQUENCY, PhonemeParams},
};
use phonosynth_dsp::{
    Automation, BasicFilter, FORMANT_COUNT, FormantCascade, Oscillator, Waveform,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Pause length relative to one phoneme.
pub const PAUSE_RATIO: f64 = 0.3;
/// Syllable rate the per-symbol table durations were measured at.
const REFERENCE_RATE: f64 = 4.75;
/// Quality factors of the formant filters, F1 first.
pub const FORMANT_Q: [f64; FORMANT_COUNT] = [8.0, 6.0, 4.0];

const ATTACK_VOICED: f64 = 0.015;
const ATTACK_UNVOICED: f64 = 0.005;
const DECAY: f64 = 0.03;
const SUSTAIN: f64 = 0.8;
const RELEASE_VOICED: f64 = 0.08;
const RELEASE_UNVOICED: f64 = 0.04;
/// Envelope peak ceiling.
const MAX_PEAK: f64 = 0.3;
/// Level exponential envelope segments start from and return to.
const FLOOR: f64 = 0.001;
/// Time to reach [`FLOOR`] from silence.
const FIRST_STEP: f64 = 0.001;
/// Upper bound for the formant gain compensation factor.
const MAX_COMPENSATION: f64 = 4.0;

/// How long each phoneme lasts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationModel {
    /// Every phoneme lasts `1 / syllables_per_second`.
    #[default]
    Uniform,
    /// Table durations, scaled by the effective syllable rate.
    PerSymbol,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EventKind {
    Sound(PhonemeParams),
    Pause,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhonemeEvent {
    pub symbol: Symbol,
    pub kind: EventKind,
    /// seconds on the clock the timeline was built against
    pub start: f64,
    pub duration: f64,
}

impl PhonemeEvent {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    #[must_use]
    pub fn is_pause(&self) -> bool {
        matches!(self.kind, EventKind::Pause)
    }
}

/// The ordered events of one request.
#[derive(Clone, Debug, PartialEq)]
pub struct Timeline {
    pub language: Language,
    pub params: EffectiveParams,
    pub events: Vec<PhonemeEvent>,
    /// Time of the first event.
    pub origin: f64,
    /// Symbols that were missing from the acoustic tables and got the neutral profile.
    pub unsupported: usize,
}

impl Timeline {
    /// Places `utterance` starting at `origin`.
    #[must_use]
    pub fn build(
        utterance: &Utterance,
        model: &AcousticModel,
        params: &EffectiveParams,
        duration_model: DurationModel,
        origin: f64,
    ) -> Self {
        let rate = params.syllables_per_second;
        let phoneme_duration = 1.0 / rate;
        let pause_duration = PAUSE_RATIO * phoneme_duration;
        let mut cursor = origin;
        let mut unsupported = 0;
        let mut events = Vec::with_capacity(utterance.symbols.len());
        for &symbol in &utterance.symbols {
            let (kind, duration) = if symbol.is_pause() {
                (EventKind::Pause, pause_duration)
            } else {
                if !model.contains(symbol, utterance.language) {
                    unsupported += 1;
                }
                let phoneme = params.phoneme(model.lookup(symbol, utterance.language));
                let duration = match duration_model {
                    DurationModel::Uniform => phoneme_duration,
                    DurationModel::PerSymbol => {
                        phoneme.base_duration_secs * REFERENCE_RATE / rate
                    }
                };
                (EventKind::Sound(phoneme), duration)
            };
            events.push(PhonemeEvent {
                symbol,
                kind,
                start: cursor,
                duration,
            });
            cursor += duration;
        }
        debug!(
            events = events.len(),
            unsupported,
            seconds = cursor - origin,
            "built timeline"
        );
        Timeline {
            language: utterance.language,
            params: *params,
            events,
            origin,
            unsupported,
        }
    }

    /// Sum of all event durations, pauses included.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.events.iter().map(|e| e.duration).sum()
    }

    #[must_use]
    pub fn end(&self) -> f64 {
        self.events.last().map_or(self.origin, PhonemeEvent::end)
    }

    pub fn sounding(&self) -> impl Iterator<Item = &PhonemeEvent> {
        self.events.iter().filter(|e| !e.is_pause())
    }

    /// Realizes every sounding event, drawing jitter and shimmer from `rng` in event order.
    ///
    /// # Errors
    ///
    /// Fails when an envelope rejects one of its breakpoints.
    pub fn realize_all<R: Rng>(&self, rng: &mut R) -> Result<Vec<SignalGraph>, &'static str> {
        self.events
            .iter()
            .filter_map(|event| realize(event, &self.params, rng).transpose())
            .collect()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OscillatorSpec {
    pub waveform: Waveform,
    pub start_hz: f64,
    /// reached with an exponential ramp at the end of the event
    pub end_hz: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandPassSpec {
    pub centre: f64,
    pub q: f64,
}

/// Everything needed to synthesize one phoneme, on the timeline's clock.
#[derive(Clone, Debug, PartialEq)]
pub struct SignalGraph {
    pub symbol: Symbol,
    pub start: f64,
    pub duration: f64,
    pub oscillator: OscillatorSpec,
    pub filters: [BandPassSpec; FORMANT_COUNT],
    /// Gain over absolute time.
    pub envelope: Automation,
}

/// Attack, decay and release times that fit inside `duration`.
fn envelope_times(voiced: bool, duration: f64) -> (f64, f64, f64) {
    let (attack, release) = if voiced {
        (ATTACK_VOICED, RELEASE_VOICED)
    } else {
        (ATTACK_UNVOICED, RELEASE_UNVOICED)
    };
    let total = attack + DECAY + release;
    if total <= duration {
        (attack, DECAY, release)
    } else {
        let scale = duration / total;
        (attack * scale, DECAY * scale, release * scale)
    }
}

fn build_envelope(
    start: f64,
    duration: f64,
    voiced: bool,
    peak: f64,
) -> Result<Automation, &'static str> {
    let (attack, decay, release) = envelope_times(voiced, duration);
    let sustain = peak * SUSTAIN;
    let decayed = start + attack + decay;
    let end = (start + duration).max(decayed);
    let mut envelope = Automation::new(0.0);
    envelope
        .set_value_at(0.0, start)?
        .exponential_ramp_to(FLOOR, start + FIRST_STEP.min(attack))?
        .exponential_ramp_to(peak, start + attack)?
        .exponential_ramp_to(sustain, decayed)?
        .set_value_at(sustain, (end - release).max(decayed))?
        .exponential_ramp_to(FLOOR, end)?;
    Ok(envelope)
}

/// Builds the signal graph of one event. Pauses have none.
///
/// # Errors
///
/// Fails when the envelope rejects a breakpoint, e.g. for a non-finite start time.
pub fn realize<R: Rng>(
    event: &PhonemeEvent,
    voice: &EffectiveParams,
    rng: &mut R,
) -> Result<Option<SignalGraph>, &'static str> {
    let EventKind::Sound(phoneme) = event.kind else {
        return Ok(None);
    };
    let jitter = (rng.random::<f64>() - 0.5) * voice.jitter * voice.base_pitch;
    let shimmer = 1.0 + (rng.random::<f64>() - 0.5) * voice.shimmer;
    let peak = (phoneme.amplitude.min(MAX_PEAK) * shimmer).max(FLOOR);
    let graph = SignalGraph {
        symbol: event.symbol,
        start: event.start,
        duration: event.duration,
        oscillator: OscillatorSpec {
            waveform: phoneme.waveform,
            start_hz: phoneme.frequency,
            end_hz: (phoneme.frequency + jitter).max(MIN_FREQUENCY),
        },
        filters: core::array::from_fn(|i| BandPassSpec {
            centre: phoneme.formants[i],
            q: FORMANT_Q[i],
        }),
        envelope: build_envelope(event.start, event.duration, phoneme.voiced, peak)?,
    };
    trace!(
        symbol = %event.symbol,
        start = event.start,
        hz = graph.oscillator.start_hz,
        peak,
        "realized phoneme"
    );
    Ok(Some(graph))
}

impl SignalGraph {
    #[must_use]
    pub fn end(&self) -> f64 {
        self.start + self.duration
    }

    fn cascade(&self, sample_rate: usize) -> Result<FormantCascade, &'static str> {
        let mut cascade = FormantCascade::new(sample_rate);
        cascade.set(
            self.filters.map(|f| f.centre),
            self.filters.map(|f| f.q),
        )?;
        Ok(cascade)
    }

    /// Numerator and denominator of the formant cascade in the z-plane, ascending powers of `z^-1`.
    ///
    /// # Errors
    ///
    /// Fails when a filter rejects its parameters.
    pub fn transfer_function(&self, sample_rate: usize) -> Result<Vec<Vec<f64>>, &'static str> {
        self.cascade(sample_rate)?.transfer_function()
    }

    /// Gain that brings the cascade's peak response back towards unity.
    ///
    /// # Errors
    ///
    /// Fails when a filter rejects its parameters.
    pub fn formant_compensation(&self, sample_rate: usize) -> Result<f64, &'static str> {
        let peak = self.cascade(sample_rate)?.peak_gain()?;
        if peak <= 0.0 {
            return Ok(1.0);
        }
        Ok((1.0 / peak).min(MAX_COMPENSATION))
    }

    /// Builds the runnable voice. `gain` scales the whole output.
    ///
    /// # Errors
    ///
    /// Fails when a filter rejects its parameters.
    pub fn instantiate(&self, sample_rate: usize, gain: f64) -> Result<PhonemeVoice, &'static str> {
        let mut frequency = Automation::new(self.oscillator.start_hz);
        frequency
            .set_value_at(self.oscillator.start_hz, self.start)?
            .exponential_ramp_to(self.oscillator.end_hz, self.end())?;
        let rate = sample_rate as f64;
        let start_frame = (self.start * rate).ceil() as u64;
        Ok(PhonemeVoice {
            sample_rate: rate,
            oscillator: Oscillator::new(self.oscillator.waveform, sample_rate),
            cascade: self.cascade(sample_rate)?,
            frequency,
            envelope: self.envelope.clone(),
            gain,
            start_frame,
            end_frame: (self.end() * rate).ceil() as u64,
            next_frame: start_frame,
        })
    }
}

/// A phoneme being synthesized. Frames are sample indices on the graph's clock.
#[derive(Clone, Debug)]
pub struct PhonemeVoice {
    sample_rate: f64,
    oscillator: Oscillator,
    cascade: FormantCascade,
    frequency: Automation,
    envelope: Automation,
    gain: f64,
    start_frame: u64,
    end_frame: u64,
    next_frame: u64,
}

impl PhonemeVoice {
    #[must_use]
    pub fn start_frame(&self) -> u64 {
        self.start_frame
    }

    #[must_use]
    pub fn end_frame(&self) -> u64 {
        self.end_frame
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.next_frame >= self.end_frame
    }

    /// Adds this voice's samples for frames `block_start .. block_start + out.len()` into `out`.
    /// Frames must be requested in increasing order; frames already passed are skipped.
    pub fn mix_into(&mut self, block_start: u64, out: &mut [f64]) {
        let block_end = block_start + out.len() as u64;
        let from = self.next_frame.max(block_start);
        let to = self.end_frame.min(block_end);
        for frame in from..to {
            let t = frame as f64 / self.sample_rate;
            let source = self.oscillator.next_sample(self.frequency.value_at(t));
            let filtered = self.cascade.step(source);
            out[(frame - block_start) as usize] += filtered * self.envelope.value_at(t) * self.gain;
        }
        self.next_frame = self.next_frame.max(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lexicon::Lexicon,
        voice::{RuntimeModifiers, VoiceProfile},
    };
    use rand::{SeedableRng, rngs::SmallRng};

    fn timeline(text: &str, speed: f64, model: DurationModel) -> Timeline {
        let utterance = Lexicon::new().analyze(text);
        let modifiers = RuntimeModifiers {
            speed,
            ..RuntimeModifiers::default()
        };
        let params = EffectiveParams::new(&VoiceProfile::default(), &modifiers);
        Timeline::build(&utterance, &AcousticModel::new(), &params, model, 0.1)
    }

    #[test]
    fn events_are_back_to_back() {
        let t = timeline("hello world", 1.0, DurationModel::Uniform);
        assert_eq!(t.events.len(), 10);
        assert_eq!(t.events[0].start, 0.1);
        for pair in t.events.windows(2) {
            assert!((pair[1].start - pair[0].end()).abs() < 1e-12);
        }
        let phoneme = 1.0 / 4.75;
        assert!((t.events[0].duration - phoneme).abs() < 1e-12);
        assert!(t.events[4].is_pause());
        assert!((t.events[4].duration - 0.3 * phoneme).abs() < 1e-12);
        assert!((t.duration() - (8.0 + 0.6) * phoneme).abs() < 1e-9);
        assert_eq!(t.sounding().count(), 8);
        assert_eq!(t.unsupported, 0);
    }

    #[test]
    fn double_speed_halves_duration() {
        let slow = timeline("the quick brown fox", 1.0, DurationModel::Uniform);
        let fast = timeline("the quick brown fox", 2.0, DurationModel::Uniform);
        assert!((slow.duration() - 2.0 * fast.duration()).abs() < 1e-9);
    }

    #[test]
    fn per_symbol_durations_follow_table() {
        let t = timeline("so", 1.0, DurationModel::PerSymbol);
        // S is 100 ms, OW 150 ms at the reference rate
        assert!((t.events[0].duration - 0.1).abs() < 1e-12);
        assert!((t.events[1].duration - 0.15).abs() < 1e-12);
    }

    #[test]
    fn pauses_do_not_realize() {
        let t = timeline("a", 1.0, DurationModel::Uniform);
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(realize(&t.events[1], &t.params, &mut rng).unwrap().is_none());
        assert_eq!(t.realize_all(&mut rng).unwrap().len(), 1);
    }

    #[test]
    fn graph_shape() {
        let t = timeline("see", 1.0, DurationModel::Uniform);
        let mut rng = SmallRng::seed_from_u64(3);
        let graph = realize(&t.events[1], &t.params, &mut rng).unwrap().unwrap();
        assert_eq!(graph.oscillator.waveform, Waveform::Sawtooth);
        assert_eq!(graph.filters.map(|f| f.q), FORMANT_Q);
        let jitter_bound = 0.5 * t.params.jitter * t.params.base_pitch;
        assert!((graph.oscillator.end_hz - graph.oscillator.start_hz).abs() <= jitter_bound);
        assert_eq!(graph.envelope.value_at(graph.start), 0.0);
        assert!(graph.envelope.peak() <= MAX_PEAK * (1.0 + 0.5 * t.params.shimmer));
        let end = graph.envelope.value_at(graph.end());
        assert!((end - FLOOR).abs() < 1e-12);
        assert_eq!(graph.transfer_function(44_100).unwrap().len(), 2);
    }

    #[test]
    fn short_events_scale_the_envelope() {
        let (a, d, r) = envelope_times(true, 0.0625);
        assert!((a + d + r - 0.0625).abs() < 1e-12);
        assert!(a < d && d < r);
        assert_eq!(
            envelope_times(false, 1.0),
            (ATTACK_UNVOICED, DECAY, RELEASE_UNVOICED)
        );
    }

    #[test]
    fn foreign_symbols_fall_back_to_the_neutral_profile() {
        // English symbols read against the Hindi tables
        let utterance = Utterance {
            language: Language::Hindi,
            symbols: Lexicon::new().resolve("hello"),
        };
        let params = EffectiveParams::new(&VoiceProfile::default(), &RuntimeModifiers::default());
        let t = Timeline::build(
            &utterance,
            &AcousticModel::new(),
            &params,
            DurationModel::Uniform,
            0.0,
        );
        assert_eq!(t.events.len(), 5);
        assert_eq!(t.unsupported, 4);
        let graphs = t.realize_all(&mut SmallRng::seed_from_u64(11)).unwrap();
        assert_eq!(graphs.len(), 4);
        for graph in &graphs {
            assert_eq!(graph.oscillator.waveform, Waveform::Sine);
            assert!(graph.envelope.peak() > 0.0);
        }
    }

    #[test]
    fn negative_start_is_rejected() {
        let mut t = timeline("ma", 1.0, DurationModel::Uniform);
        t.events[0].start = -1.0;
        let mut rng = SmallRng::seed_from_u64(1);
        assert!(realize(&t.events[0], &t.params, &mut rng).is_err());
        assert!(t.realize_all(&mut rng).is_err());
    }

    #[test]
    fn seeded_realization_is_repeatable() {
        let t = timeline("hello world", 1.0, DurationModel::Uniform);
        let a = t.realize_all(&mut SmallRng::seed_from_u64(9)).unwrap();
        let b = t.realize_all(&mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn voice_renders_inside_its_frames() {
        let t = timeline("ma", 1.0, DurationModel::Uniform);
        let graph = t
            .realize_all(&mut SmallRng::seed_from_u64(5))
            .unwrap()
            .remove(0);
        let mut voice = graph.instantiate(8_000, 1.0).unwrap();
        assert_eq!(voice.start_frame(), 800);
        let mut out = vec![0.0; 4_000];
        voice.mix_into(0, &mut out);
        assert!(voice.is_finished());
        assert!(out[..800].iter().all(|s| *s == 0.0));
        assert!(out[800..voice.end_frame() as usize].iter().any(|s| *s != 0.0));
        assert!(out.iter().all(|s| s.abs() <= 1.0));
    }
}
