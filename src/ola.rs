//! Overlap-add resynthesis on top of the streaming STFT.
//!
//! The analysis path is inherited from [`Stft`]; the inverse path runs
//! the inverse transform on the (possibly edited) spectrum, tapers the
//! zero-pad edges, applies an optional synthesis window, accumulates
//! into a running output buffer, and emits one chunk per call.
//!
//! Exact reconstruction requires the combined analysis/synthesis window
//! stack to satisfy constant overlap-add (COLA) at the chosen hop size.
//! That is NOT validated here: several spectral effects (the sustain
//! freeze among them) intentionally use non-COLA combinations, so the
//! obligation rests with the caller.

use crate::chunks::{Spectrum, Wave};
use crate::fft::FftError;
use crate::stft::Stft;
use crate::window::{falling_taper, rising_taper, WindowType};

/// Streaming overlap-add engine.
///
/// Call [`process`](Ola::process) with each input chunk, edit the
/// spectrum in place, then call [`ifft`](Ola::ifft) to pull one chunk of
/// reconstructed audio. Identity processing reproduces the input delayed
/// by [`latency`](Ola::latency) samples once the startup transient has
/// passed.
pub struct Ola {
    stft: Stft,
    /// Rising taper over the leading zero-pad region.
    zwnd1: Wave,
    /// Falling taper over the trailing zero-pad region.
    zwnd2: Wave,
    /// Synthesis window over the whole frame; `None` for `Rect`, which
    /// skips the multiply entirely.
    post: Option<Wave>,
    /// Running overlap-add accumulator, `fftlen` samples.
    acc: Wave,
}

impl Ola {
    /// Build an overlap-add engine.
    ///
    /// * `wnd` - analysis window over the `wndlen` history
    /// * `zerownd` - taper shape for the zero-pad edges of the
    ///   reconstructed frame (`Rect` disables the taper)
    /// * `pad_pos` - fraction of the zero-pad placed before the windowed
    ///   segment, as in [`Stft::with_pad`]
    /// * `postwnd` - synthesis window over the whole frame (`Rect`
    ///   disables the multiply)
    pub fn new(
        fftlen: usize,
        wndlen: usize,
        chunksize: usize,
        wnd: WindowType,
        zerownd: WindowType,
        pad_pos: f32,
        postwnd: WindowType,
    ) -> Result<Self, FftError> {
        let stft = Stft::with_pad(fftlen, wndlen, chunksize, wnd, pad_pos)?;
        let zwnd1 = Wave::from_slice(&rising_taper(zerownd, stft.npad1()));
        let zwnd2 = Wave::from_slice(&falling_taper(zerownd, stft.npad2()));
        let post = match postwnd {
            WindowType::Rect => None,
            ty => {
                let mut w = Wave::new(fftlen);
                ty.fill(&mut w);
                Some(w)
            }
        };
        Ok(Self {
            stft,
            zwnd1,
            zwnd2,
            post,
            acc: Wave::new(fftlen),
        })
    }

    /// Fixed pipeline delay of the identity analysis/resynthesis path:
    /// `wndlen - chunksize + npad1` samples.
    pub fn latency(&self) -> usize {
        self.stft.wndlen() - self.stft.chunksize() + self.stft.npad1()
    }

    pub fn chunksize(&self) -> usize {
        self.stft.chunksize()
    }

    /// Analysis half of the pipeline; see [`Stft::process`].
    pub fn process(&mut self, chunk: &[f32]) -> Result<(), FftError> {
        self.stft.process(chunk)
    }

    /// Spectrum of the most recently analyzed frame.
    pub fn spectrum(&self) -> &Spectrum {
        self.stft.spectrum()
    }

    pub fn spectrum_mut(&mut self) -> &mut Spectrum {
        self.stft.spectrum_mut()
    }

    /// The underlying framing engine.
    pub fn stft(&self) -> &Stft {
        &self.stft
    }

    /// Resynthesize one chunk from the current spectrum: inverse
    /// transform, zero-region tapers, synthesis window, overlap-add,
    /// emit the oldest `chunksize` accumulator samples, then advance the
    /// accumulator and zero-fill its tail.
    pub fn ifft(&mut self, out: &mut [f32]) -> Result<(), FftError> {
        let c = self.stft.chunksize();
        if out.len() != c {
            return Err(FftError::MismatchedLengths);
        }
        self.stft.fft.inverse_in_place()?;
        let fftlen = self.stft.fftlen();
        let p1 = self.stft.npad1();
        let p2 = self.stft.npad2();
        let frame = &mut self.stft.fft.w;
        for k in 0..p1 {
            frame[k] *= self.zwnd1[k];
        }
        for k in 0..p2 {
            frame[fftlen - p2 + k] *= self.zwnd2[k];
        }
        if let Some(post) = &self.post {
            frame.mul_assign(post);
        }
        self.acc.add_assign(frame);
        out.copy_from_slice(&self.acc[..c]);
        self.acc.copy_within(c.., 0);
        let tail = fftlen - c;
        self.acc[tail..].fill(0.0);
        Ok(())
    }
}
