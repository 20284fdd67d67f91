//! Spectral-freeze sustain effect.
//!
//! Each frame's magnitude spectrum feeds a leaky accumulator and is
//! resynthesized with uniformly random phase, which freezes the timbre
//! while discarding transients. Reconstruction is deliberately
//! non-invertible (the phase is replaced), so the window stack does not
//! need to satisfy COLA. A time-domain envelope follower then restores
//! the input's level contour, and a ramped wet/dry mix blends the
//! frozen signal with the dry input.

use crate::chunks::Wave;
use crate::fft::FftError;
use crate::num::Complex32;
use crate::ola::Ola;
use crate::window::WindowType;
use core::f32::consts::TAU;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Streaming sustain processor over chunks of `wlen` samples.
pub struct Sustain {
    ola: Ola,
    /// Leaky magnitude accumulator, one value per bin.
    absspec: Wave,
    srate: f64,
    chunksize: usize,
    /// Sustain time constant in seconds; larger values freeze longer.
    tau_sustain: f32,
    /// Envelope-follower time constant in seconds.
    tau_envelope: f32,
    wet: f32,
    current_wet: f32,
    delta_wet: f32,
    t_apply: u32,
    lin: f64,
    lout: f64,
    rng: StdRng,
}

impl Sustain {
    /// Build a sustain processor for chunks of `wlen` samples at
    /// sampling rate `srate`. The spectral frame spans two chunks with a
    /// Hann analysis window and a sqrt-Hann synthesis window.
    pub fn new(wlen: usize, srate: f64) -> Result<Self, FftError> {
        Self::with_rng(wlen, srate, StdRng::from_entropy())
    }

    /// As [`new`](Self::new) but with a caller-provided phase RNG, for
    /// deterministic output.
    pub fn with_rng(wlen: usize, srate: f64, rng: StdRng) -> Result<Self, FftError> {
        let ola = Ola::new(
            2 * wlen,
            2 * wlen,
            wlen,
            WindowType::Hann,
            WindowType::Rect,
            0.5,
            WindowType::SqrtHann,
        )?;
        let nbins = ola.spectrum().len();
        Ok(Self {
            ola,
            absspec: Wave::new(nbins),
            srate,
            chunksize: wlen,
            tau_sustain: 20.0,
            tau_envelope: 1.0,
            wet: 1.0,
            current_wet: 0.0,
            delta_wet: 0.0,
            t_apply: 0,
            lin: 0.0,
            lout: 0.0,
            rng,
        })
    }

    pub fn chunksize(&self) -> usize {
        self.chunksize
    }

    /// Pipeline delay in samples, from the OLA engine.
    pub fn latency(&self) -> usize {
        self.ola.latency()
    }

    pub fn set_tau_sustain(&mut self, tau: f32) {
        self.tau_sustain = tau;
    }

    pub fn set_tau_envelope(&mut self, tau: f32) {
        self.tau_envelope = tau;
    }

    /// Set the wet/dry target applied by the next [`set_wet_apply`]
    /// ramp (1.0 = fully frozen signal).
    pub fn set_wet(&mut self, wet: f32) {
        self.wet = wet;
    }

    /// Start a linear ramp from the current mix to the wet target over
    /// `t` seconds; a negative `t` freezes the current mix.
    pub fn set_wet_apply(&mut self, t: f32) {
        self.delta_wet = 0.0;
        self.t_apply = 0;
        if t >= 0.0 {
            let tau = ((self.srate * t as f64) as i64).max(1) as u32;
            self.delta_wet = (self.wet - self.current_wet) / tau as f32;
            self.t_apply = tau;
        }
    }

    /// Process one chunk of input into one chunk of output. Both slices
    /// must hold exactly `chunksize` samples.
    pub fn process(&mut self, input: &[f32], output: &mut [f32]) -> Result<(), FftError> {
        if input.len() != self.chunksize || output.len() != self.chunksize {
            return Err(FftError::MismatchedLengths);
        }
        self.ola.process(input)?;

        // per-frame magnitude accumulation with phase replacement
        let sus_c1 = if self.tau_sustain > 0.0 {
            (-1.0 / (self.tau_sustain as f64 * self.srate / self.chunksize as f64)).exp() as f32
        } else {
            0.0
        };
        let sus_c2 = 1.0 - sus_c1;
        let spec = self.ola.spectrum_mut();
        spec.scale(sus_c2);
        self.absspec.scale(sus_c1);
        for (bin, acc) in spec.iter_mut().zip(self.absspec.iter_mut()) {
            *acc += bin.abs();
            let phi: f32 = self.rng.gen_range(0.0..TAU);
            *bin = Complex32::expi(phi).scale(*acc);
        }
        self.ola.ifft(output)?;

        // envelope reconstruction and ramped wet/dry mix
        let env_c1 = if self.tau_envelope > 0.0 {
            (-1.0 / (self.tau_envelope as f64 * self.srate)).exp()
        } else {
            0.0
        };
        let env_c2 = 1.0 - env_c1;
        for (o, i) in output.iter_mut().zip(input.iter()) {
            self.lin = env_c1 * self.lin + env_c2 * (*i as f64) * (*i as f64);
            self.lout = env_c1 * self.lout + env_c2 * (*o as f64) * (*o as f64);
            if self.lout > 0.0 {
                *o *= (self.lin / self.lout).sqrt() as f32;
            }
            if self.t_apply > 0 {
                self.t_apply -= 1;
                self.current_wet += self.delta_wet;
            }
            *o = self.current_wet * *o + (1.0 - self.current_wet) * *i;
        }
        Ok(())
    }
}
