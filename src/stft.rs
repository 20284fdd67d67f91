//! Streaming short-time Fourier transform over fixed-size chunks.
//!
//! One [`Stft`] instance is fed from a real-time callback: each
//! [`process`](Stft::process) call shifts the newest chunk into a
//! `wndlen`-sample history FIFO, applies the analysis window, zero-pads
//! to the transform length, and runs the forward transform. The frame's
//! spectrum is then available through [`spectrum`](Stft::spectrum) for
//! in-place processing before resynthesis.

use crate::chunks::{Spectrum, Wave};
use crate::fft::{Fft, FftError};
use crate::window::WindowType;

/// Streaming analysis engine: history FIFO, analysis window, zero-pad,
/// forward transform.
///
/// Geometry is fixed at construction: `fftlen >= wndlen >= chunksize`,
/// with `fftlen` a power of two. The first `wndlen/chunksize - 1` calls
/// operate on a partially zero history (startup transient); this is not
/// an error state.
#[derive(Debug)]
pub struct Stft {
    pub fft: Fft,
    fftlen: usize,
    wndlen: usize,
    chunksize: usize,
    /// Zero-pad samples before the windowed segment in the frame.
    npad1: usize,
    history: Wave,
    frame: Wave,
    window: Wave,
}

impl Stft {
    /// Build an engine with the zero-padding split evenly around the
    /// windowed segment.
    pub fn new(
        fftlen: usize,
        wndlen: usize,
        chunksize: usize,
        wnd: WindowType,
    ) -> Result<Self, FftError> {
        Self::with_pad(fftlen, wndlen, chunksize, wnd, 0.5)
    }

    /// Build an engine with an explicit pad position. `pad_pos` is the
    /// fraction of the `fftlen - wndlen` zero-pad placed BEFORE the
    /// windowed segment: 0.0 puts the window at the start of the frame,
    /// 1.0 at the end.
    pub fn with_pad(
        fftlen: usize,
        wndlen: usize,
        chunksize: usize,
        wnd: WindowType,
        pad_pos: f32,
    ) -> Result<Self, FftError> {
        if chunksize == 0 {
            return Err(FftError::InvalidChunkSize);
        }
        if wndlen < chunksize || fftlen < wndlen {
            return Err(FftError::InvalidWindowLen);
        }
        let fft = Fft::new(fftlen)?;
        let npad1 = (pad_pos.clamp(0.0, 1.0) * (fftlen - wndlen) as f32).round() as usize;
        let mut window = Wave::new(wndlen);
        wnd.fill(&mut window);
        #[cfg(feature = "verbose-logging")]
        log::debug!(
            "stft: fftlen={} wndlen={} chunksize={} npad1={}",
            fftlen,
            wndlen,
            chunksize,
            npad1
        );
        Ok(Self {
            fft,
            fftlen,
            wndlen,
            chunksize,
            npad1,
            history: Wave::new(wndlen),
            frame: Wave::new(fftlen),
            window,
        })
    }

    pub fn fftlen(&self) -> usize {
        self.fftlen
    }

    pub fn wndlen(&self) -> usize {
        self.wndlen
    }

    pub fn chunksize(&self) -> usize {
        self.chunksize
    }

    /// Zero-pad samples preceding the windowed segment.
    pub fn npad1(&self) -> usize {
        self.npad1
    }

    /// Zero-pad samples following the windowed segment.
    pub fn npad2(&self) -> usize {
        self.fftlen - self.wndlen - self.npad1
    }

    /// The most recent `wndlen` input samples, oldest first.
    pub fn history(&self) -> &[f32] {
        &self.history
    }

    /// The analysis window.
    pub fn window(&self) -> &[f32] {
        &self.window
    }

    /// Spectrum of the most recently processed frame.
    pub fn spectrum(&self) -> &Spectrum {
        &self.fft.s
    }

    pub fn spectrum_mut(&mut self) -> &mut Spectrum {
        &mut self.fft.s
    }

    /// Ingest one chunk: drop the oldest `chunksize` history samples,
    /// append `chunk`, window and zero-pad into the frame, and run the
    /// forward transform. The result is left in the engine's spectrum.
    pub fn process(&mut self, chunk: &[f32]) -> Result<(), FftError> {
        if chunk.len() != self.chunksize {
            return Err(FftError::MismatchedLengths);
        }
        let w = self.wndlen;
        let c = self.chunksize;
        self.history.copy_within(c.., 0);
        self.history[w - c..].copy_from_slice(chunk);
        for k in 0..w {
            self.frame[self.npad1 + k] = self.window[k] * self.history[k];
        }
        self.fft.forward(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::num::Complex32;

    #[test]
    fn test_geometry_validation() {
        assert_eq!(
            Stft::new(8, 4, 0, WindowType::Rect).unwrap_err(),
            FftError::InvalidChunkSize
        );
        assert_eq!(
            Stft::new(8, 2, 4, WindowType::Rect).unwrap_err(),
            FftError::InvalidWindowLen
        );
        assert_eq!(
            Stft::new(4, 8, 2, WindowType::Rect).unwrap_err(),
            FftError::InvalidWindowLen
        );
        assert_eq!(
            Stft::new(12, 8, 4, WindowType::Rect).unwrap_err(),
            FftError::NonPowerOfTwo
        );
        assert!(Stft::new(8, 8, 8, WindowType::Rect).is_ok());
    }

    #[test]
    fn test_history_fifo_order() {
        let mut stft = Stft::new(8, 8, 2, WindowType::Rect).unwrap();
        let mut fed = Vec::new();
        for k in 0..6 {
            let chunk = [2.0 * k as f32, 2.0 * k as f32 + 1.0];
            fed.extend_from_slice(&chunk);
            stft.process(&chunk).unwrap();
        }
        // history holds the last 8 samples fed, in order
        assert_eq!(stft.history(), &fed[fed.len() - 8..]);
    }

    #[test]
    fn test_chunk_length_mismatch() {
        let mut stft = Stft::new(8, 4, 2, WindowType::Hann).unwrap();
        assert_eq!(
            stft.process(&[0.0; 3]).unwrap_err(),
            FftError::MismatchedLengths
        );
    }

    #[test]
    fn test_pad_split() {
        let centered = Stft::new(16, 8, 4, WindowType::Hann).unwrap();
        assert_eq!(centered.npad1(), 4);
        assert_eq!(centered.npad2(), 4);
        let leading = Stft::with_pad(16, 8, 4, WindowType::Hann, 1.0).unwrap();
        assert_eq!(leading.npad1(), 8);
        assert_eq!(leading.npad2(), 0);
    }

    #[test]
    fn test_rect_window_frame_spectrum() {
        // rect window, full-length history of ones: DC bin equals wndlen
        let mut stft = Stft::with_pad(16, 8, 4, WindowType::Rect, 0.0).unwrap();
        stft.process(&[1.0; 4]).unwrap();
        stft.process(&[1.0; 4]).unwrap();
        let dc: Complex32 = stft.spectrum()[0];
        assert!((dc.re - 8.0).abs() < 1e-4);
        assert!(dc.im.abs() < 1e-5);
    }

    #[test]
    fn test_startup_transient_is_zero_padded() {
        let mut stft = Stft::new(8, 8, 2, WindowType::Rect).unwrap();
        stft.process(&[1.0, 1.0]).unwrap();
        assert_eq!(&stft.history()[..6], &[0.0; 6]);
        assert_eq!(&stft.history()[6..], &[1.0, 1.0]);
    }
}
