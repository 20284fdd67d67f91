//! Transform-engine validation against a naive DFT and property-based
//! round trips.

use olafft::{Complex32, Fft, RealFftPlan};
use proptest::prelude::*;

fn naive_dft(input: &[f32]) -> Vec<Complex32> {
    let n = input.len();
    (0..=n / 2)
        .map(|k| {
            let mut re = 0.0f64;
            let mut im = 0.0f64;
            for (j, &x) in input.iter().enumerate() {
                let ang = -2.0 * std::f64::consts::PI * (k * j) as f64 / n as f64;
                re += x as f64 * ang.cos();
                im += x as f64 * ang.sin();
            }
            Complex32::new(re as f32, im as f32)
        })
        .collect()
}

#[test]
fn forward_matches_naive_dft_on_tones() {
    for &n in &[8usize, 32, 128] {
        let input: Vec<f32> = (0..n)
            .map(|i| {
                let t = i as f32 / n as f32;
                (2.0 * std::f32::consts::PI * 3.0 * t).sin()
                    + 0.5 * (2.0 * std::f32::consts::PI * 7.0 * t).cos()
            })
            .collect();
        let mut plan = RealFftPlan::new(n).unwrap();
        let mut out = vec![Complex32::zero(); n / 2 + 1];
        plan.forward(&input, &mut out).unwrap();
        let reference = naive_dft(&input);
        for (k, (a, b)) in out.iter().zip(reference.iter()).enumerate() {
            assert!(
                (a.re - b.re).abs() < 1e-2 && (a.im - b.im).abs() < 1e-2,
                "n={} bin={}: ({}, {}) vs ({}, {})",
                n,
                k,
                a.re,
                a.im,
                b.re,
                b.im
            );
        }
    }
}

proptest! {
    #[test]
    fn prop_roundtrip_recovers_signal(
        len_exp in 2usize..9,
        ref signal in proptest::collection::vec(-100.0f32..100.0, 256),
    ) {
        let n = 1usize << len_exp;
        let input = &signal[..n];
        let mut fft = Fft::new(n).unwrap();
        fft.forward(input).unwrap();
        let spec: Vec<Complex32> = fft.s.to_vec();
        fft.inverse(&spec).unwrap();
        for (a, b) in input.iter().zip(fft.w.iter()) {
            prop_assert!((a - b).abs() < 1e-2, "{} vs {}", a, b);
        }
    }

    #[test]
    fn prop_real_input_bins_have_real_edges(
        ref signal in proptest::collection::vec(-10.0f32..10.0, 64),
    ) {
        let mut fft = Fft::new(64).unwrap();
        fft.forward(signal).unwrap();
        prop_assert!(fft.s[0].im.abs() < 1e-4);
        prop_assert!(fft.s[32].im.abs() < 1e-4);
    }

    #[test]
    fn prop_spectral_divide_guard_never_nan(
        re in -5.0f32..5.0,
        im in -5.0f32..5.0,
    ) {
        let mut a = olafft::Spectrum::new(4);
        for bin in a.iter_mut() {
            *bin = Complex32::new(re, im);
        }
        let b = [
            Complex32::zero(),
            Complex32::new(1.0, 0.0),
            Complex32::zero(),
            Complex32::new(0.0, 2.0),
        ];
        a.div_assign_guarded(&b);
        for bin in a.iter() {
            prop_assert!(bin.re.is_finite() && bin.im.is_finite());
        }
        // zero-divisor bins kept their value
        prop_assert_eq!(a[0], Complex32::new(re, im));
        prop_assert_eq!(a[2], Complex32::new(re, im));
    }
}
