//! Identity-processing reconstruction tests for the overlap-add engine:
//! with a COLA window stack, analysis followed immediately by
//! resynthesis reproduces the input delayed by the engine latency.

use olafft::{Ola, WindowType};

/// Drive `ola` with `input` (chunk by chunk, identity spectral
/// processing) and return the concatenated output.
fn drive(ola: &mut Ola, input: &[f32]) -> Vec<f32> {
    let c = ola.chunksize();
    assert_eq!(input.len() % c, 0);
    let mut out = vec![0.0f32; c];
    let mut collected = Vec::with_capacity(input.len());
    for chunk in input.chunks(c) {
        ola.process(chunk).unwrap();
        ola.ifft(&mut out).unwrap();
        collected.extend_from_slice(&out);
    }
    collected
}

/// Compare `output` against `input` delayed by `latency` samples,
/// treating samples before the stream start as silence.
fn assert_delayed(output: &[f32], input: &[f32], latency: usize, tol: f32) {
    for (j, &y) in output.iter().enumerate() {
        let expected = if j >= latency { input[j - latency] } else { 0.0 };
        assert!(
            (y - expected).abs() < tol,
            "sample {}: {} vs {}",
            j,
            y,
            expected
        );
    }
}

#[test]
fn hann_frame_spanning_two_chunks_reconstructs() {
    // frame == window, hop = half: the classic 50%-overlap Hann setup
    let mut ola = Ola::new(
        16,
        16,
        8,
        WindowType::Hann,
        WindowType::Rect,
        0.5,
        WindowType::Rect,
    )
    .unwrap();
    assert_eq!(ola.latency(), 8);
    let input: Vec<f32> = (0..128).map(|i| (i as f32 * 0.21).sin()).collect();
    let output = drive(&mut ola, &input);
    assert_delayed(&output, &input, 8, 1e-4);
}

#[test]
fn step_sequence_with_leading_pad() {
    // fftlen=8, wndlen=4, chunksize=2, Hann analysis; with the pad
    // leading the window the delay is fftlen - chunksize = 6 samples
    let mut ola = Ola::new(
        8,
        4,
        2,
        WindowType::Hann,
        WindowType::Rect,
        1.0,
        WindowType::Rect,
    )
    .unwrap();
    assert_eq!(ola.latency(), 6);
    let input = [1.0f32, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
    let output = drive(&mut ola, &input);
    assert_delayed(&output, &input, 6, 1e-5);
}

#[test]
fn zero_padded_frame_reconstructs() {
    // window shorter than the frame, centered pad: latency is
    // wndlen - chunksize + npad1
    let mut ola = Ola::new(
        16,
        8,
        4,
        WindowType::Hann,
        WindowType::Rect,
        0.5,
        WindowType::Rect,
    )
    .unwrap();
    assert_eq!(ola.latency(), 8);
    let input: Vec<f32> = (0..96).map(|i| ((i % 13) as f32 - 6.0) / 6.0).collect();
    let output = drive(&mut ola, &input);
    assert_delayed(&output, &input, 8, 1e-4);
}

#[test]
fn sqrt_hann_analysis_synthesis_pair_reconstructs() {
    // sqrt-Hann on both sides multiplies back to Hann, which is COLA at
    // 50% overlap
    let mut ola = Ola::new(
        16,
        16,
        8,
        WindowType::SqrtHann,
        WindowType::Rect,
        0.5,
        WindowType::SqrtHann,
    )
    .unwrap();
    let input: Vec<f32> = (0..160).map(|i| (i as f32 * 0.13).cos() * 0.5).collect();
    let output = drive(&mut ola, &input);
    assert_delayed(&output, &input, ola.latency(), 1e-4);
}

#[test]
fn unit_hop_rect_window_reconstructs() {
    // degenerate geometry: hop == window == frame, rectangular window
    let mut ola = Ola::new(
        8,
        8,
        8,
        WindowType::Rect,
        WindowType::Rect,
        0.5,
        WindowType::Rect,
    )
    .unwrap();
    assert_eq!(ola.latency(), 0);
    let input: Vec<f32> = (0..64).map(|i| (i as f32 * 0.05).sin()).collect();
    let output = drive(&mut ola, &input);
    assert_delayed(&output, &input, 0, 1e-4);
}

#[test]
fn spectral_gain_scales_output() {
    // a flat spectral gain passes through the linear pipeline
    let mut ola = Ola::new(
        16,
        16,
        8,
        WindowType::Hann,
        WindowType::Rect,
        0.5,
        WindowType::Rect,
    )
    .unwrap();
    let c = ola.chunksize();
    let input: Vec<f32> = (0..128).map(|i| (i as f32 * 0.17).sin()).collect();
    let mut out = vec![0.0f32; c];
    let mut collected = Vec::new();
    for chunk in input.chunks(c) {
        ola.process(chunk).unwrap();
        ola.spectrum_mut().scale(0.25);
        ola.ifft(&mut out).unwrap();
        collected.extend_from_slice(&out);
    }
    let latency = ola.latency();
    for (j, &y) in collected.iter().enumerate() {
        let expected = if j >= latency {
            0.25 * input[j - latency]
        } else {
            0.0
        };
        assert!((y - expected).abs() < 1e-4, "sample {}: {} vs {}", j, y, expected);
    }
}
