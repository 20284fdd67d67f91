//! Spectral gate demo: attenuate bins below a magnitude threshold.
//!
//! Run with `cargo run --example spectral_gate`. Processes a synthetic
//! tone-plus-noise signal and prints input/output peak levels.

use olafft::{Ola, WindowType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn main() {
    let fftlen = 1024;
    let chunksize = 512;
    let mut ola = Ola::new(
        fftlen,
        fftlen,
        chunksize,
        WindowType::SqrtHann,
        WindowType::Rect,
        0.5,
        WindowType::SqrtHann,
    )
    .expect("engine");

    let mut rng = StdRng::seed_from_u64(3);
    let input: Vec<f32> = (0..chunksize * 64)
        .map(|i| {
            let t = i as f32 / 48000.0;
            (2.0 * std::f32::consts::PI * 440.0 * t).sin() + 0.05 * rng.gen_range(-1.0..1.0)
        })
        .collect();

    let threshold = 4.0;
    let mut out = vec![0.0f32; chunksize];
    let mut peak_in = 0.0f32;
    let mut peak_out = 0.0f32;
    for chunk in input.chunks(chunksize) {
        ola.process(chunk).expect("process");
        for bin in ola.spectrum_mut().iter_mut() {
            if bin.abs() < threshold {
                *bin = olafft::Complex32::zero();
            }
        }
        ola.ifft(&mut out).expect("ifft");
        peak_in = chunk.iter().fold(peak_in, |m, v| m.max(v.abs()));
        peak_out = out.iter().fold(peak_out, |m, v| m.max(v.abs()));
    }
    println!("peak in: {:.3}, peak out: {:.3}", peak_in, peak_out);
}
