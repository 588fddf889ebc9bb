use super::poly_real::{magnitude_response, multiply, multiply_fractions};
use super::{Automation, BandPass, BasicFilter, FormantCascade, white_noise};
use rand::{SeedableRng, rngs::SmallRng};

#[test]
fn multiply_works() {
    assert_eq!(multiply(&[1.0, 2.0], &[1.0, 3.0], None), Ok(vec![1.0, 5.0, 6.0]));
    assert_eq!(multiply(&[0.0], &[1.0, 3.0], None), Ok(vec![0.0]));
    assert_eq!(multiply(&[1.0, 1.0], &[1.0, -1.0], None), Ok(vec![1.0, 0.0, -1.0]));
    assert_eq!(multiply(&[2.0, 0.5], &[4.0, 0.0], None), Ok(vec![8.0, 2.0]));
    assert!(multiply(&[], &[1.0], None).is_err());
}

#[test]
fn multiply_fractions_works() {
    let f1 = vec![vec![1.0], vec![1.0, 0.5]];
    let f2 = vec![vec![2.0], vec![1.0, -0.5]];
    assert_eq!(
        multiply_fractions(&f1, &f2, None),
        Ok(vec![vec![2.0], vec![1.0, 0.0, -0.25]])
    );
    assert!(multiply_fractions(&f1, &[vec![1.0]], None).is_err());
}

#[test]
fn magnitude_response_works() {
    let passthrough = vec![vec![1.0], vec![1.0]];
    assert_eq!(magnitude_response(&passthrough, 0.3), Ok(1.0));
    // H(z) = 1 / (1 - 0.5 z^-1) at DC
    assert_eq!(magnitude_response(&[vec![1.0], vec![1.0, -0.5]], 0.0), Ok(2.0));
    // pole at z = 1
    assert!(magnitude_response(&[vec![1.0], vec![1.0, -1.0]], 0.0).is_err());
}

#[test]
fn band_pass_coefficients() {
    let mut bp = BandPass::new(44_100);
    assert_eq!(bp.transfer_function_coefficients(), vec![vec![1.0], vec![1.0]]);
    bp.set(1_000.0, 4.0).unwrap();
    let tf = bp.transfer_function_coefficients();
    assert_eq!(tf[0][1], 0.0);
    assert_eq!(tf[0][0], -tf[0][2]);
    assert_eq!(tf[1][0], 1.0);
}

#[test]
fn band_pass_blocks_dc() {
    let mut bp = BandPass::new(16_000);
    bp.set(800.0, 6.0).unwrap();
    let mut last = 0.0;
    for _ in 0..16_000 {
        last = bp.step(1.0);
    }
    assert!(last.abs() < 1e-9, "{last}");
    let mut fresh = BandPass::new(16_000);
    fresh.set(800.0, 6.0).unwrap();
    let first = fresh.step(1.0);
    assert!(first > 0.0 && first < 1.0);
}

#[test]
fn cascade_runs_stages_in_series() {
    let mut cascade = FormantCascade::new(16_000);
    cascade.set([500.0, 1_500.0, 2_500.0], [8.0, 6.0, 4.0]).unwrap();
    let mut stages = cascade.filters().clone();
    for n in 0..64 {
        let x = if n == 0 { 1.0 } else { 0.0 };
        let expected = stages.iter_mut().fold(x, |acc, f| f.step(acc));
        assert_eq!(cascade.step(x), expected);
    }
    assert_eq!(FormantCascade::new(16_000).step(0.75), 0.75);
}

#[test]
fn automation_envelope_shape() {
    let mut env = Automation::new(0.0);
    env.set_value_at(0.0, 0.0)
        .and_then(|a| a.set_value_at(0.3, 0.01))
        .and_then(|a| a.exponential_ramp_to(0.24, 0.04))
        .and_then(|a| a.set_value_at(0.24, 0.1))
        .and_then(|a| a.exponential_ramp_to(0.001, 0.2))
        .unwrap();
    assert_eq!(env.value_at(0.0), 0.0);
    assert_eq!(env.value_at(0.005), 0.0);
    assert_eq!(env.value_at(0.01), 0.3);
    assert_eq!(env.value_at(0.07), 0.24);
    assert_eq!(env.value_at(0.2), 0.001);
    assert_eq!(env.peak(), 0.3);
    assert_eq!(env.end_time(), 0.2);
    let mid = env.value_at(0.15);
    assert!(mid < 0.24 && mid > 0.001);
}

#[test]
fn white_noise_is_seeded_and_bounded() {
    let mut a = SmallRng::seed_from_u64(7);
    let mut b = SmallRng::seed_from_u64(7);
    for _ in 0..1_000 {
        let x = white_noise(&mut a);
        assert_eq!(x, white_noise(&mut b));
        assert!((-1.0..=1.0).contains(&x));
    }
}
