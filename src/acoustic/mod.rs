//! Static acoustic tables: symbol to base frequency, formants, duration, voicing and amplitude.
//!
//! Every entry is classified once when the model is built, so the synthesis
//! engine never inspects symbol strings.

mod english;
mod hindi;

use crate::lexicon::{Language, Symbol};
use phonosynth_dsp::{FORMANT_COUNT, Waveform};
use std::collections::HashMap;
use tracing::warn;

/// Articulatory class of a phoneme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PhonemeClass {
    Vowel,
    Fricative,
    Stop,
    Affricate,
    Nasal,
    Liquid,
    Glide,
    Unknown,
}

/// Source shape and multipliers shared by every phoneme of a class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassTraits {
    pub waveform: Waveform,
    /// multiplies the voice amplitude
    pub amplitude: f64,
    /// multiplies the voice pitch
    pub pitch: f64,
    /// multiplies the formant frequencies
    pub formant: f64,
}

impl PhonemeClass {
    #[must_use]
    pub const fn traits(self) -> ClassTraits {
        let (waveform, amplitude, pitch, formant) = match self {
            PhonemeClass::Vowel => (Waveform::Sawtooth, 1.2, 1.0, 1.0),
            PhonemeClass::Fricative => (Waveform::Square, 0.7, 3.0, 1.5),
            PhonemeClass::Stop => (Waveform::Square, 1.0, 2.0, 1.2),
            PhonemeClass::Affricate => (Waveform::Square, 0.8, 2.5, 1.3),
            PhonemeClass::Nasal => (Waveform::Triangle, 1.1, 0.7, 0.8),
            PhonemeClass::Liquid => (Waveform::Sine, 0.9, 0.85, 0.9),
            PhonemeClass::Glide => (Waveform::Sine, 0.8, 0.9, 0.95),
            PhonemeClass::Unknown => (Waveform::Sine, 0.6, 1.0, 1.0),
        };
        ClassTraits {
            waveform,
            amplitude,
            pitch,
            formant,
        }
    }
}

/// Sibilants sit another half above the fricative pitch.
const SIBILANT_PITCH: f64 = 1.5;

/// A table row before classification.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Row {
    symbol: &'static str,
    frequency: f64,
    formants: [f64; FORMANT_COUNT],
    duration_ms: f64,
    voiced: bool,
    amplitude: f64,
}

const fn row(
    symbol: &'static str,
    frequency: f64,
    formants: [f64; FORMANT_COUNT],
    duration_ms: f64,
    voiced: bool,
    amplitude: f64,
) -> Row {
    Row {
        symbol,
        frequency,
        formants,
        duration_ms,
        voiced,
        amplitude,
    }
}

/// Acoustic description of one phoneme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcousticProfile {
    pub base_frequency: f64,
    /// F1, F2, F3 in Hz
    pub formants: [f64; FORMANT_COUNT],
    pub duration_ms: f64,
    pub voiced: bool,
    /// `0.0 ..= 1.0`
    pub amplitude: f64,
    pub class: PhonemeClass,
    /// Voice pitch multiplier: class, vowel placement and sibilance combined.
    pub pitch_ratio: f64,
    /// Formant multiplier: the vowel placement for charted vowels, the class otherwise.
    pub formant_ratio: f64,
}

impl AcousticProfile {
    /// Neutral profile substituted for symbols missing from the tables.
    pub const DEFAULT: AcousticProfile = AcousticProfile {
        base_frequency: 120.0,
        formants: [500.0, 1500.0, 2500.0],
        duration_ms: 100.0,
        voiced: false,
        amplitude: 0.5,
        class: PhonemeClass::Unknown,
        pitch_ratio: 1.0,
        formant_ratio: 1.0,
    };

    #[must_use]
    pub fn traits(&self) -> ClassTraits {
        self.class.traits()
    }

    fn classify(
        row: &Row,
        class: PhonemeClass,
        adjustment: Option<(f64, f64)>,
        sibilant: bool,
    ) -> Self {
        let traits = class.traits();
        let (fine_pitch, formant_ratio) = adjustment.unwrap_or((1.0, traits.formant));
        let sibilance = if sibilant { SIBILANT_PITCH } else { 1.0 };
        AcousticProfile {
            base_frequency: row.frequency,
            formants: row.formants,
            duration_ms: row.duration_ms,
            // the class decides for unknowns, the table for everything else
            voiced: row.voiced && class != PhonemeClass::Unknown,
            amplitude: row.amplitude,
            class,
            pitch_ratio: traits.pitch * fine_pitch * sibilance,
            formant_ratio,
        }
    }
}

/// Read-only acoustic tables for every supported language.
#[derive(Debug, Clone)]
pub struct AcousticModel {
    english: HashMap<&'static str, AcousticProfile>,
    hindi: HashMap<&'static str, AcousticProfile>,
}

impl Default for AcousticModel {
    fn default() -> Self {
        Self::new()
    }
}

impl AcousticModel {
    #[must_use]
    pub fn new() -> Self {
        let english = english::TABLE
            .iter()
            .map(|row| {
                let class = english::class_of(row.symbol);
                let profile = AcousticProfile::classify(
                    row,
                    class,
                    english::vowel_adjustment(row.symbol),
                    english::is_sibilant(row.symbol),
                );
                (row.symbol, profile)
            })
            .collect();
        let hindi = hindi::TABLE
            .iter()
            .map(|row| {
                let class = hindi::class_of(row.symbol);
                let adjustment =
                    hindi::english_vowel(row.symbol).and_then(english::vowel_adjustment);
                let profile = AcousticProfile::classify(
                    row,
                    class,
                    adjustment,
                    hindi::is_sibilant(row.symbol),
                );
                (row.symbol, profile)
            })
            .collect();
        AcousticModel { english, hindi }
    }

    fn table(&self, language: Language) -> &HashMap<&'static str, AcousticProfile> {
        match language {
            Language::English => &self.english,
            Language::Hindi => &self.hindi,
        }
    }

    #[must_use]
    pub fn get(&self, symbol: Symbol, language: Language) -> Option<&AcousticProfile> {
        self.table(language).get(symbol.as_str())
    }

    #[must_use]
    pub fn contains(&self, symbol: Symbol, language: Language) -> bool {
        self.get(symbol, language).is_some()
    }

    /// The profile of `symbol`, or [`AcousticProfile::DEFAULT`] with a warning when it is unknown.
    #[must_use]
    pub fn lookup(&self, symbol: Symbol, language: Language) -> &AcousticProfile {
        self.get(symbol, language).unwrap_or_else(|| {
            warn!(%symbol, %language, "unsupported phoneme, using the neutral profile");
            &AcousticProfile::DEFAULT
        })
    }

    /// Number of symbols known for `language`.
    #[must_use]
    pub fn len(&self, language: Language) -> usize {
        self.table(language).len()
    }
}
