//! Signal primitives for phoneme-driven source-filter speech synthesis.
//!
//! *NOTE*: This is _not_ a text-to-speech engine.
//! It only provides the building blocks one phoneme voice is made of:
//! band-limited oscillators, band-pass formant filters and scheduled
//! parameter automation (envelopes and frequency ramps).
//!
//! ## `no_std`
//!
//! This library is `no_std` compatible when built with the `libm` feature.
//! `alloc` is required.

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(
    clippy::all,
    clippy::cargo,
    clippy::pedantic,
    unsafe_code,
    rustdoc::all
)]
// fine for us since loss of precision/sign is not that important,
// as long as it's the same every time.
#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

#[cfg(all(feature = "std", feature = "libm"))]
compile_error!("Features \"std\" and \"libm\" are mutually exclusive.");

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("Must specify a math feature: either \"std\" or \"libm\".");

extern crate alloc;

mod traits;
pub use traits::BasicFilter;
mod envelope;
pub use envelope::{Automation, Breakpoint, Segment};
mod filter;
pub use filter::{BandPass, FORMANT_COUNT, FormantCascade};
mod math;
mod noise;
pub use noise::{WhiteNoise, white_noise};
mod oscillator;
pub use oscillator::{Oscillator, Waveform};
pub mod poly_real;

#[cfg(test)]
mod lib_tests;
