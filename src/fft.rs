//! Real FFT plans and the transform engine.
//!
//! A [`RealFftPlan`] is a reusable execution recipe bound to one
//! transform length: twiddle tables and scratch are prepared once at
//! construction and every later call runs allocation-free. The
//! real-to-complex and complex-to-real transforms are computed through a
//! half-size complex FFT with pack/unpack post-processing, so an
//! `n`-point real transform costs one `n/2`-point complex FFT.
//!
//! The raw inverse is UNNORMALIZED: it returns the input signal scaled
//! by the transform length. [`Fft::inverse`] undoes that scaling once.

use crate::chunks::{Spectrum, Wave};
use crate::num::Complex32;
use core::f32::consts::PI;

/// Errors surfaced by plan construction and the framing engines.
///
/// Degenerate numeric inputs (near-zero divisors) are not errors — they
/// are silently skipped by the buffer operations to preserve real-time
/// determinism.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FftError {
    EmptyInput,
    /// Transform lengths must be powers of two.
    NonPowerOfTwo,
    MismatchedLengths,
    /// Chunk size must be at least one sample.
    InvalidChunkSize,
    /// Frame geometry must satisfy `fftlen >= wndlen >= chunksize`.
    InvalidWindowLen,
}

impl core::fmt::Display for FftError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            FftError::EmptyInput => "empty input",
            FftError::NonPowerOfTwo => "transform length is not a power of two",
            FftError::MismatchedLengths => "buffer length mismatch",
            FftError::InvalidChunkSize => "chunk size must be at least one sample",
            FftError::InvalidWindowLen => {
                "frame geometry must satisfy fftlen >= wndlen >= chunksize"
            }
        };
        f.write_str(msg)
    }
}

impl std::error::Error for FftError {}

/// In-place radix-2 complex FFT bound to one power-of-two length.
///
/// The twiddle table holds `len/2` factors `exp(-2*pi*i*k/len)`; a
/// butterfly stage of size `s` reads it at stride `len/s`.
#[derive(Debug)]
struct CfftPlan {
    len: usize,
    twiddles: Vec<Complex32>,
}

impl CfftPlan {
    fn new(len: usize) -> Result<Self, FftError> {
        if len == 0 {
            return Err(FftError::EmptyInput);
        }
        if !len.is_power_of_two() {
            return Err(FftError::NonPowerOfTwo);
        }
        let half = len / 2;
        let mut twiddles = Vec::with_capacity(half);
        for k in 0..half {
            twiddles.push(Complex32::expi(-2.0 * PI * k as f32 / len as f32));
        }
        Ok(Self { len, twiddles })
    }

    fn bit_reverse(&self, buf: &mut [Complex32]) {
        let n = self.len;
        let mut j = 0usize;
        for i in 0..n {
            if i < j {
                buf.swap(i, j);
            }
            let mut bit = n >> 1;
            while bit != 0 && j & bit != 0 {
                j ^= bit;
                bit >>= 1;
            }
            j |= bit;
        }
    }

    /// Decimation-in-time butterflies over a bit-reversed buffer.
    /// `conj` selects the inverse (positive-exponent) kernel; no
    /// normalization is applied in either direction.
    fn transform(&self, buf: &mut [Complex32], conj: bool) {
        debug_assert_eq!(buf.len(), self.len);
        let n = self.len;
        if n < 2 {
            return;
        }
        self.bit_reverse(buf);
        let mut size = 2;
        while size <= n {
            let stride = n / size;
            let half = size / 2;
            let mut base = 0;
            while base < n {
                for k in 0..half {
                    let mut w = self.twiddles[k * stride];
                    if conj {
                        w = w.conj();
                    }
                    let u = buf[base + k];
                    let v = buf[base + k + half] * w;
                    buf[base + k] = u + v;
                    buf[base + k + half] = u - v;
                }
                base += size;
            }
            size <<= 1;
        }
    }

    fn forward(&self, buf: &mut [Complex32]) {
        self.transform(buf, false);
    }

    /// Unnormalized inverse: `inverse(forward(x)) == len * x`.
    fn inverse(&self, buf: &mut [Complex32]) {
        self.transform(buf, true);
    }
}

/// A forward/inverse real-transform pair bound to one transform length.
///
/// Construction is the only allocation-heavy step; `forward`/`inverse`
/// reuse the internal scratch and are safe to call from a real-time
/// thread. A plan serves exactly one length — changing the length means
/// building a new plan.
#[derive(Debug)]
pub struct RealFftPlan {
    fftlen: usize,
    half: usize,
    cfft: CfftPlan,
    /// Pack/unpack twiddles `exp(-pi*i*k/half)` for the real<->complex
    /// post-processing.
    pack: Vec<Complex32>,
    scratch: Vec<Complex32>,
}

impl RealFftPlan {
    /// Build a plan for an `fftlen`-point real transform. `fftlen` must
    /// be a power of two and at least 2.
    pub fn new(fftlen: usize) -> Result<Self, FftError> {
        if fftlen == 0 {
            return Err(FftError::EmptyInput);
        }
        if !fftlen.is_power_of_two() || fftlen < 2 {
            return Err(FftError::NonPowerOfTwo);
        }
        let half = fftlen / 2;
        let cfft = CfftPlan::new(half)?;
        let mut pack = Vec::with_capacity(half);
        for k in 0..half {
            pack.push(Complex32::expi(-PI * k as f32 / half as f32));
        }
        #[cfg(feature = "verbose-logging")]
        log::debug!("real fft plan: fftlen={} bins={}", fftlen, half + 1);
        Ok(Self {
            fftlen,
            half,
            cfft,
            pack,
            scratch: vec![Complex32::zero(); half],
        })
    }

    pub fn fftlen(&self) -> usize {
        self.fftlen
    }

    /// Number of spectral bins produced: `fftlen/2 + 1`.
    pub fn bins(&self) -> usize {
        self.half + 1
    }

    /// Real-to-complex transform. `input` must hold `fftlen` samples and
    /// `output` `fftlen/2 + 1` bins. Bin 0 (DC) and the last bin
    /// (Nyquist) come out with zero imaginary part.
    pub fn forward(&mut self, input: &[f32], output: &mut [Complex32]) -> Result<(), FftError> {
        let m = self.half;
        if input.len() != self.fftlen || output.len() != m + 1 {
            return Err(FftError::MismatchedLengths);
        }
        for i in 0..m {
            self.scratch[i] = Complex32::new(input[2 * i], input[2 * i + 1]);
        }
        self.cfft.forward(&mut self.scratch);
        let y0 = self.scratch[0];
        output[0] = Complex32::new(y0.re + y0.im, 0.0);
        output[m] = Complex32::new(y0.re - y0.im, 0.0);
        for k in 1..m {
            let a = self.scratch[k];
            let b = self.scratch[m - k].conj();
            let sum = a + b;
            let diff = a - b;
            let t = self.pack[k] * diff;
            // sum - i*t, halved
            output[k] = Complex32::new(sum.re + t.im, sum.im - t.re).scale(0.5);
        }
        Ok(())
    }

    /// Complex-to-real transform, UNNORMALIZED: the output equals the
    /// original signal scaled by `fftlen`. Only bins `0..=fftlen/2` are
    /// consumed and the imaginary parts of DC and Nyquist are ignored,
    /// so spectral edits that break conjugate symmetry are interpreted
    /// as the symmetric extension of those bins — they cannot leak an
    /// imaginary component into the output.
    pub fn inverse(&mut self, input: &[Complex32], output: &mut [f32]) -> Result<(), FftError> {
        let m = self.half;
        if input.len() != m + 1 || output.len() != self.fftlen {
            return Err(FftError::MismatchedLengths);
        }
        self.scratch[0] = Complex32::new(
            input[0].re + input[m].re,
            input[0].re - input[m].re,
        );
        for k in 1..m {
            let a = input[k];
            let b = input[m - k].conj();
            let sum = a + b;
            let diff = a - b;
            let t = self.pack[k].conj() * diff;
            // sum + i*t; the forward-side halving is deliberately absent
            // so the round trip is scaled by exactly fftlen
            self.scratch[k] = Complex32::new(sum.re - t.im, sum.im + t.re);
        }
        self.cfft.inverse(&mut self.scratch);
        for i in 0..m {
            output[2 * i] = self.scratch[i].re;
            output[2 * i + 1] = self.scratch[i].im;
        }
        Ok(())
    }
}

/// The transform engine: a sample/spectral buffer pair with its plan.
///
/// `forward` leaves the current frame's spectrum in [`s`](Self::s);
/// `inverse` leaves the normalized time-domain frame in [`w`](Self::w).
/// Callers read and edit those buffers directly between the two calls.
/// One engine instance belongs to one thread for its whole lifetime.
#[derive(Debug)]
pub struct Fft {
    pub w: Wave,
    pub s: Spectrum,
    plan: RealFftPlan,
}

impl Fft {
    pub fn new(fftlen: usize) -> Result<Self, FftError> {
        let plan = RealFftPlan::new(fftlen)?;
        Ok(Self {
            w: Wave::new(fftlen),
            s: Spectrum::new(Spectrum::bins_for(fftlen)),
            plan,
        })
    }

    pub fn fftlen(&self) -> usize {
        self.plan.fftlen()
    }

    /// Number of bins in [`s`](Self::s).
    pub fn bins(&self) -> usize {
        self.plan.bins()
    }

    /// Copy `src` into the internal sample buffer (truncating to the
    /// shorter length) and run the forward transform; the result is in
    /// [`s`](Self::s).
    pub fn forward(&mut self, src: &[f32]) -> Result<(), FftError> {
        self.w.copy_from(src);
        self.plan.forward(&self.w, &mut self.s)
    }

    /// Copy `src` into the internal spectral buffer (truncating to the
    /// shorter length), run the inverse transform, and divide by
    /// `fftlen` to undo the unnormalized inverse convention; the result
    /// is in [`w`](Self::w).
    pub fn inverse(&mut self, src: &[Complex32]) -> Result<(), FftError> {
        self.s.copy_from(src);
        self.plan.inverse(&self.s, &mut self.w)?;
        self.w.scale_inv(self.plan.fftlen() as f32);
        Ok(())
    }

    /// Re-run the inverse transform from the current contents of
    /// [`s`](Self::s) (after in-place spectral edits).
    pub fn inverse_in_place(&mut self) -> Result<(), FftError> {
        self.plan.inverse(&self.s, &mut self.w)?;
        self.w.scale_inv(self.plan.fftlen() as f32);
        Ok(())
    }
}
