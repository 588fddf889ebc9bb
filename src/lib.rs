//! Sample-free text to speech for English and Hindi.
//!
//! Text is resolved into phoneme symbols, every phoneme becomes one oscillator
//! driven through three band-pass formant filters under an amplitude envelope,
//! and the result is either mixed into a buffer and encoded as 16-bit PCM or
//! scheduled onto a live output device.
//!
//! ```text
//!  text ─► Lexicon ─► Utterance ─► Timeline ─► SignalGraph ─► PhonemeVoice
//!                         ▲            ▲                        │
//!                AcousticModel   EffectiveParams      ┌─────────┴─────────┐
//!                                (voice + modifiers)  OfflineRenderer   OutputDevice
//!                                                      │                  (real time)
//!                                                   encoder ─► WAV bytes
//! ```
//!
//! The signal primitives live in the `phonosynth-dsp` crate.

#![deny(clippy::all, clippy::pedantic, unsafe_code, rustdoc::all)]
// fine for us since loss of precision/sign is not that important,
// as long as it's the same every time.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::module_name_repetitions
)]

pub mod acoustic;
pub mod bridge;
pub mod config;
pub mod device;
pub mod encoder;
pub mod engine;
mod error;
pub mod lexicon;
pub mod render;
pub mod synthesis;
pub mod voice;

pub use config::Config;
pub use device::{
    AudioSink, CaptureSink, ClockMode, DeviceState, NullSink, OutputDevice, PlaybackHandle,
};
pub use encoder::{QualityHint, WavHeader};
pub use engine::{SynthesisRequest, Synthesizer};
pub use error::{Error, Result, ValidationError};
pub use lexicon::{Language, Lexicon, Symbol, Utterance};
pub use render::RenderedAudio;
pub use voice::{RuntimeModifiers, VoiceCatalog, VoiceProfile};

#[cfg(feature = "playback")]
pub use device::CpalSink;
