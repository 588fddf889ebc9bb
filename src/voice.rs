//! Voice presets and the merge of a voice with a phoneme's acoustic profile.

use crate::{
    acoustic::AcousticProfile,
    error::ValidationError,
    lexicon::Language,
};
use phonosynth_dsp::{FORMANT_COUNT, Waveform};
use serde::{Deserialize, Serialize};

/// Lowest oscillator frequency a phoneme may use, in Hz.
pub const MIN_FREQUENCY: f64 = 50.0;
/// Overall amplitude headroom applied before the class multiplier.
const AMPLITUDE_SCALE: f64 = 0.6;
/// Formants of the default voice; other voices shift formants relative to these.
pub const DEFAULT_FORMANTS: [f64; FORMANT_COUNT] = [550.0, 1700.0, 2600.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resonance {
    Chest,
    Head,
    Mixed,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub id: String,
    pub display_name: String,
    pub language: Language,
    pub gender: Gender,
    pub base_pitch_hz: f64,
    pub pitch_range_hz: f64,
    /// F1, F2, F3 in Hz
    pub formants: [f64; FORMANT_COUNT],
    pub speech_rate_wpm: f64,
    pub syllables_per_second: f64,
    /// `0 ..= 100`
    pub loudness: f64,
    /// `0 ..= 1`, pitch perturbation relative to the base pitch
    pub jitter: f64,
    /// `0 ..= 1`, amplitude perturbation
    pub shimmer: f64,
    pub resonance: Resonance,
}

impl Default for VoiceProfile {
    fn default() -> Self {
        VoiceProfile {
            id: "default".into(),
            display_name: "Default (low alto)".into(),
            language: Language::English,
            gender: Gender::Female,
            base_pitch_hz: 165.0,
            pitch_range_hz: 20.0,
            formants: DEFAULT_FORMANTS,
            speech_rate_wpm: 150.0,
            syllables_per_second: 4.75,
            loudness: 72.0,
            jitter: 0.006,
            shimmer: 0.035,
            resonance: Resonance::Chest,
        }
    }
}

impl VoiceProfile {
    /// # Errors
    ///
    /// Returns [`ValidationError::Profile`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fail = |reason: &str| {
            Err(ValidationError::Profile {
                id: self.id.clone(),
                reason: reason.to_owned(),
            })
        };
        if self.id.trim().is_empty() {
            return fail("id is empty");
        }
        if !(self.syllables_per_second.is_finite() && self.syllables_per_second > 0.0) {
            return fail("syllables_per_second must be > 0");
        }
        if !(self.speech_rate_wpm.is_finite() && self.speech_rate_wpm > 0.0) {
            return fail("speech_rate_wpm must be > 0");
        }
        if !(self.base_pitch_hz.is_finite() && self.base_pitch_hz > 0.0) {
            return fail("base_pitch_hz must be > 0");
        }
        if !(0.0..=100.0).contains(&self.loudness) {
            return fail("loudness must be within 0..=100");
        }
        if !(0.0..=1.0).contains(&self.jitter) || !(0.0..=1.0).contains(&self.shimmer) {
            return fail("jitter and shimmer must be within 0..=1");
        }
        if self.formants.iter().any(|f| !(f.is_finite() && *f > 0.0)) {
            return fail("formants must be > 0");
        }
        Ok(())
    }

    /// Formants relative to the default voice.
    #[must_use]
    pub fn formant_shift(&self) -> [f64; FORMANT_COUNT] {
        core::array::from_fn(|i| self.formants[i] / DEFAULT_FORMANTS[i])
    }
}

#[allow(clippy::too_many_arguments)]
fn preset(
    id: &str,
    display_name: &str,
    language: Language,
    gender: Gender,
    base_pitch_hz: f64,
    formants: [f64; FORMANT_COUNT],
    loudness: f64,
    (jitter, shimmer): (f64, f64),
    syllables_per_second: f64,
) -> VoiceProfile {
    VoiceProfile {
        id: id.into(),
        display_name: display_name.into(),
        language,
        gender,
        base_pitch_hz,
        formants,
        loudness,
        jitter,
        shimmer,
        syllables_per_second,
        ..VoiceProfile::default()
    }
}

/// Per-request adjustments on top of a voice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuntimeModifiers {
    /// `-100 ..= 100`, percent change of the base pitch
    pub pitch_offset: i32,
    /// `0.25 ..= 4.0`
    pub speed: f64,
    /// `0 ..= 100`, percent of the voice loudness
    pub volume: u8,
}

impl Default for RuntimeModifiers {
    fn default() -> Self {
        RuntimeModifiers {
            pitch_offset: 0,
            speed: 1.0,
            volume: 100,
        }
    }
}

impl RuntimeModifiers {
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first out-of-range field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(-100..=100).contains(&self.pitch_offset) {
            return Err(ValidationError::PitchOffset(self.pitch_offset));
        }
        if !(0.25..=4.0).contains(&self.speed) {
            return Err(ValidationError::Speed(self.speed));
        }
        if self.volume > 100 {
            return Err(ValidationError::Volume(self.volume));
        }
        Ok(())
    }
}

/// A voice with the runtime modifiers folded in, shared by every phoneme of a request.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveParams {
    pub language: Language,
    /// Hz, after the pitch offset
    pub base_pitch: f64,
    pub formant_shift: [f64; FORMANT_COUNT],
    /// voice rate times the speed multiplier
    pub syllables_per_second: f64,
    /// `0 ..= 100`
    pub loudness: f64,
    pub jitter: f64,
    pub shimmer: f64,
}

impl EffectiveParams {
    #[must_use]
    pub fn new(profile: &VoiceProfile, modifiers: &RuntimeModifiers) -> Self {
        EffectiveParams {
            language: profile.language,
            base_pitch: profile.base_pitch_hz * (1.0 + f64::from(modifiers.pitch_offset) / 100.0),
            formant_shift: profile.formant_shift(),
            syllables_per_second: profile.syllables_per_second * modifiers.speed,
            loudness: (profile.loudness * f64::from(modifiers.volume) / 100.0).min(100.0),
            jitter: profile.jitter,
            shimmer: profile.shimmer,
        }
    }

    /// The same parameters speaking faster by `factor`.
    #[must_use]
    pub fn with_rate_boost(mut self, factor: f64) -> Self {
        self.syllables_per_second *= factor;
        self
    }

    /// Merges this voice with one phoneme.
    #[must_use]
    pub fn phoneme(&self, base: &AcousticProfile) -> PhonemeParams {
        let traits = base.traits();
        PhonemeParams {
            waveform: traits.waveform,
            frequency: (self.base_pitch * base.pitch_ratio).max(MIN_FREQUENCY),
            formants: core::array::from_fn(|i| {
                base.formants[i] * self.formant_shift[i] * base.formant_ratio
            }),
            amplitude: (self.loudness / 100.0 * AMPLITUDE_SCALE * traits.amplitude).min(1.0),
            voiced: base.voiced,
            base_duration_secs: base.duration_ms / 1000.0,
        }
    }
}

/// Effective acoustic parameters of one phoneme spoken by one voice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhonemeParams {
    pub waveform: Waveform,
    /// nominal oscillator frequency in Hz, never below [`MIN_FREQUENCY`]
    pub frequency: f64,
    pub formants: [f64; FORMANT_COUNT],
    pub amplitude: f64,
    pub voiced: bool,
    /// duration from the acoustic table, before any rate scaling
    pub base_duration_secs: f64,
}

/// Combines a voice, a phoneme and the runtime modifiers. Pure.
#[must_use]
pub fn apply(
    profile: &VoiceProfile,
    base: &AcousticProfile,
    modifiers: &RuntimeModifiers,
) -> PhonemeParams {
    EffectiveParams::new(profile, modifiers).phoneme(base)
}

/// The set of voices a synthesizer can speak with.
#[derive(Clone, Debug)]
pub struct VoiceCatalog {
    voices: Vec<VoiceProfile>,
}

impl Default for VoiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VoiceCatalog {
    #[must_use]
    pub fn builtin() -> Self {
        use Gender::{Female, Male};
        use Language::{English, Hindi};
        let voices = vec![
            VoiceProfile::default(),
            preset(
                "sarah-en",
                "Sarah (English)",
                English,
                Female,
                185.0,
                [580.0, 1750.0, 2650.0],
                78.0,
                (0.004, 0.025),
                4.75,
            ),
            preset(
                "emma-en",
                "Emma (English)",
                English,
                Female,
                210.0,
                [620.0, 1880.0, 2800.0],
                75.0,
                (0.005, 0.030),
                4.75,
            ),
            preset(
                "david-en",
                "David (English)",
                English,
                Male,
                120.0,
                [480.0, 1350.0, 2450.0],
                80.0,
                (0.008, 0.040),
                4.75,
            ),
            preset(
                "michael-en",
                "Michael (English)",
                English,
                Male,
                135.0,
                [520.0, 1450.0, 2550.0],
                82.0,
                (0.006, 0.035),
                4.75,
            ),
            preset(
                "priya-hi",
                "प्रिया (Hindi)",
                Hindi,
                Female,
                195.0,
                [600.0, 1800.0, 2700.0],
                76.0,
                (0.005, 0.028),
                4.2,
            ),
            preset(
                "kavya-hi",
                "काव्या (Hindi)",
                Hindi,
                Female,
                175.0,
                [560.0, 1720.0, 2620.0],
                74.0,
                (0.004, 0.032),
                4.0,
            ),
            preset(
                "arjun-hi",
                "अर्जुन (Hindi)",
                Hindi,
                Male,
                115.0,
                [460.0, 1300.0, 2400.0],
                78.0,
                (0.007, 0.038),
                4.3,
            ),
            preset(
                "rohit-hi",
                "रोहित (Hindi)",
                Hindi,
                Male,
                130.0,
                [500.0, 1400.0, 2480.0],
                81.0,
                (0.009, 0.042),
                4.1,
            ),
            preset(
                "raj-hi",
                "राज (Hindi)",
                Hindi,
                Male,
                100.0,
                [440.0, 1360.0, 2080.0],
                80.0,
                (0.009, 0.040),
                4.275,
            ),
        ];
        VoiceCatalog { voices }
    }

    /// The built-in voices plus `extra`. An extra voice replaces a built-in one with the
    /// same id.
    ///
    /// # Errors
    ///
    /// Fails on the first extra voice that does not validate.
    pub fn with_profiles(
        extra: impl IntoIterator<Item = VoiceProfile>,
    ) -> Result<Self, ValidationError> {
        let mut catalog = Self::builtin();
        for profile in extra {
            profile.validate()?;
            match catalog.voices.iter_mut().find(|v| v.id == profile.id) {
                Some(existing) => *existing = profile,
                None => catalog.voices.push(profile),
            }
        }
        Ok(catalog)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&VoiceProfile> {
        self.voices.iter().find(|v| v.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &VoiceProfile> {
        self.voices.iter()
    }

    pub fn for_language(&self, language: Language) -> impl Iterator<Item = &VoiceProfile> {
        self.voices.iter().filter(move |v| v.language == language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acoustic::{AcousticModel, PhonemeClass};
    use crate::lexicon::Lexicon;

    fn vowel() -> AcousticProfile {
        let model = AcousticModel::new();
        let symbol = Lexicon::new().resolve("see")[1];
        *model.lookup(symbol, Language::English)
    }

    #[test]
    fn builtin_voices_validate() {
        let catalog = VoiceCatalog::builtin();
        assert_eq!(catalog.iter().count(), 10);
        for voice in catalog.iter() {
            voice.validate().unwrap();
        }
        assert_eq!(catalog.for_language(Language::Hindi).count(), 5);
        assert_eq!(catalog.get("david-en").unwrap().gender, Gender::Male);
        assert!(catalog.get("nobody").is_none());
    }

    #[test]
    fn default_voice_has_unit_formant_shift() {
        assert_eq!(VoiceProfile::default().formant_shift(), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn loudness_never_exceeds_100() {
        for voice in VoiceCatalog::builtin().iter() {
            for volume in [0, 50, 100] {
                let modifiers = RuntimeModifiers {
                    volume,
                    ..RuntimeModifiers::default()
                };
                let params = EffectiveParams::new(voice, &modifiers);
                assert!(params.loudness <= 100.0);
            }
        }
    }

    #[test]
    fn apply_uses_class_and_placement() {
        let voice = VoiceProfile::default();
        let params = apply(&voice, &vowel(), &RuntimeModifiers::default());
        assert_eq!(params.waveform, Waveform::Sawtooth);
        assert!((params.frequency - 165.0 * 1.15).abs() < 1e-9);
        assert!((params.formants[0] - 270.0 * 1.1).abs() < 1e-9);
        // 72 / 100 * 0.6 * 1.2
        assert!((params.amplitude - 0.5184).abs() < 1e-12);
        assert!(params.voiced);
    }

    #[test]
    fn pitch_offset_floors_at_minimum_frequency() {
        let modifiers = RuntimeModifiers {
            pitch_offset: -100,
            ..RuntimeModifiers::default()
        };
        let params = apply(&VoiceProfile::default(), &vowel(), &modifiers);
        assert_eq!(params.frequency, MIN_FREQUENCY);
    }

    #[test]
    fn modifiers_are_validated() {
        let bad = |m: RuntimeModifiers| m.validate().unwrap_err();
        let base = RuntimeModifiers::default();
        assert_eq!(
            bad(RuntimeModifiers { pitch_offset: 101, ..base }),
            ValidationError::PitchOffset(101)
        );
        assert_eq!(
            bad(RuntimeModifiers { speed: 0.1, ..base }),
            ValidationError::Speed(0.1)
        );
        assert_eq!(
            bad(RuntimeModifiers { volume: 101, ..base }),
            ValidationError::Volume(101)
        );
        assert!(base.validate().is_ok());
    }

    #[test]
    fn extra_profiles_override_builtins() {
        let mut custom = VoiceProfile::default();
        custom.id = "sarah-en".into();
        custom.base_pitch_hz = 300.0;
        let catalog = VoiceCatalog::with_profiles([custom]).unwrap();
        assert_eq!(catalog.get("sarah-en").unwrap().base_pitch_hz, 300.0);
        assert_eq!(catalog.iter().count(), 10);

        let mut broken = VoiceProfile::default();
        broken.id = "broken".into();
        broken.syllables_per_second = 0.0;
        assert!(matches!(
            VoiceCatalog::with_profiles([broken]),
            Err(ValidationError::Profile { .. })
        ));
    }

    #[test]
    fn nasal_is_softer_than_vowel() {
        let model = AcousticModel::new();
        let m = model.lookup(Lexicon::new().resolve("my")[0], Language::English);
        assert_eq!(m.class, PhonemeClass::Nasal);
        let params = apply(&VoiceProfile::default(), m, &RuntimeModifiers::default());
        assert!((params.frequency - 165.0 * 0.7).abs() < 1e-9);
    }
}
