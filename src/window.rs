//! Window functions for framing and overlap-add reconstruction.
//!
//! All windows are periodic (DFT-even): `w[k] = f(2*pi*k/len)`, the form
//! that satisfies constant overlap-add at integer-divisor hop sizes.

use core::f32::consts::PI;

/// Window shape selector for the analysis, zero-region, and synthesis
/// stages of the framing engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowType {
    /// All ones; as a zero-region or synthesis window this disables the
    /// corresponding multiply.
    Rect,
    #[default]
    Hann,
    /// Square root of the periodic Hann window; used as a synthesis
    /// window so an analysis/synthesis pair multiplies back to Hann.
    SqrtHann,
    Hamming,
    Blackman,
}

impl WindowType {
    /// Build a window of `len` samples.
    pub fn build(self, len: usize) -> Vec<f32> {
        let mut out = vec![0.0f32; len];
        self.fill(&mut out);
        out
    }

    /// Fill `out` with the window shape.
    pub fn fill(self, out: &mut [f32]) {
        let n = out.len();
        for (k, v) in out.iter_mut().enumerate() {
            let x = 2.0 * PI * k as f32 / n as f32;
            *v = match self {
                WindowType::Rect => 1.0,
                WindowType::Hann => 0.5 - 0.5 * x.cos(),
                WindowType::SqrtHann => (0.5 - 0.5 * x.cos()).max(0.0).sqrt(),
                WindowType::Hamming => 0.54 - 0.46 * x.cos(),
                WindowType::Blackman => {
                    0.42 - 0.5 * x.cos() + 0.08 * (2.0 * x).cos()
                }
            };
        }
    }
}

/// Periodic Hann window of length `len`.
pub fn hann(len: usize) -> Vec<f32> {
    WindowType::Hann.build(len)
}

/// Square-root periodic Hann window of length `len`.
pub fn sqrt_hann(len: usize) -> Vec<f32> {
    WindowType::SqrtHann.build(len)
}

/// Periodic Hamming window of length `len`.
pub fn hamming(len: usize) -> Vec<f32> {
    WindowType::Hamming.build(len)
}

/// Periodic Blackman window of length `len`.
pub fn blackman(len: usize) -> Vec<f32> {
    WindowType::Blackman.build(len)
}

/// Rising taper of `len` samples: the first half of a `2*len` window of
/// the given shape. Used to fade in the leading zero-pad region of a
/// reconstructed frame. `Rect` yields all ones.
pub fn rising_taper(ty: WindowType, len: usize) -> Vec<f32> {
    let full = ty.build(2 * len);
    full[..len].to_vec()
}

/// Falling taper of `len` samples: the second half of a `2*len` window
/// of the given shape. Used to fade out the trailing zero-pad region of
/// a reconstructed frame. `Rect` yields all ones.
pub fn falling_taper(ty: WindowType, len: usize) -> Vec<f32> {
    let full = ty.build(2 * len);
    full[len..].to_vec()
}
