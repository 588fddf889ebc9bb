//! Real polynomial arithmetic for inspecting filter chains.
//!
//! Polynomials are coefficient slices in ascending powers of `z^-1`.
//! A fraction is a `[numerator, denominator]` pair of polynomials.

use crate::math::{cos, sin, sqrt};
use alloc::{vec, vec::Vec};
use core::cmp::min;

/// Multiplies two real polynomials.
///
/// # Errors
///
/// Fails when either polynomial has no coefficients.
// fine for us because 0.0 is considered a special value (set by us)
#[allow(clippy::float_cmp)]
pub fn multiply(a1: &[f64], a2: &[f64], eps: Option<f64>) -> Result<Vec<f64>, &'static str> {
    if a1.is_empty() || a2.is_empty() {
        return Err("Zero len() arrays.");
    }
    if a1.len() == 1 && a1[0] == 0.0 || a2.len() == 1 && a2[0] == 0.0 {
        return Ok(vec![0.0]);
    }
    let n1 = a1.len() - 1;
    let n2 = a2.len() - 1;
    let mut a3 = vec![0.0; n1 + n2 + 1];
    for (i, out) in a3.iter_mut().enumerate() {
        let lo = i.saturating_sub(n2);
        let hi = min(n1, i);
        *out = (lo..=hi).map(|j| a1[j] * a2[i - j]).sum();
    }
    trim(&a3, eps)
}

/// Trims top order zero coefficients.
fn trim(a: &[f64], eps: Option<f64>) -> Result<Vec<f64>, &'static str> {
    let eps = eps.unwrap_or(0.0);
    let Some(last) = a.last() else {
        return Err("Zero length array.");
    };
    if last.abs() > eps {
        return Ok(a.to_vec());
    }
    let len = a.iter().rposition(|c| c.abs() > eps).map_or(0, |i| i + 1);
    if len == 0 {
        return Ok(vec![0.0]);
    }
    Ok(a[..len].to_vec())
}

/// Multiplies two rational fractions, as when two filters are connected in series.
///
/// # Errors
///
/// Fails when a fraction is not a `[numerator, denominator]` pair or a polynomial is empty.
pub fn multiply_fractions(
    f1: &[Vec<f64>],
    f2: &[Vec<f64>],
    eps: Option<f64>,
) -> Result<Vec<Vec<f64>>, &'static str> {
    if f1.len() != 2 || f2.len() != 2 {
        return Err("A fraction needs exactly a numerator and a denominator.");
    }
    let top = multiply(&f1[0], &f2[0], eps)?;
    let bottom = multiply(&f1[1], &f2[1], eps)?;
    Ok(vec![top, bottom])
}

/// Evaluates a polynomial in `z^-1` at `z = e^(jw)`.
/// Returns the real and imaginary parts.
fn evaluate_on_unit_circle(a: &[f64], w: f64) -> (f64, f64) {
    a.iter().enumerate().fold((0.0, 0.0), |(re, im), (k, c)| {
        let phi = w * k as f64;
        (re + c * cos(phi), im - c * sin(phi))
    })
}

/// Returns `|H(e^(jw))|` for a fraction, `w` being the normalised angular frequency
/// `2 * PI * f / sampleRate`.
///
/// # Errors
///
/// Fails when the fraction is malformed or has a pole on the unit circle at `w`.
// fine for us because an exact zero is the only thing we cannot divide by
#[allow(clippy::float_cmp)]
pub fn magnitude_response(f: &[Vec<f64>], w: f64) -> Result<f64, &'static str> {
    if f.len() != 2 {
        return Err("A fraction needs exactly a numerator and a denominator.");
    }
    let (nr, ni) = evaluate_on_unit_circle(&f[0], w);
    let (dr, di) = evaluate_on_unit_circle(&f[1], w);
    let den = sqrt(dr * dr + di * di);
    if den == 0.0 {
        return Err("Transfer function has a pole on the unit circle.");
    }
    Ok(sqrt(nr * nr + ni * ni) / den)
}
