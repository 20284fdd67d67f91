//! # olafft - streaming STFT / overlap-add framing for real-time audio
//!
//! A single-channel spectral framing pipeline for chunk-driven audio
//! processing: a real-time callback feeds fixed-size chunks into a
//! windowed, zero-padded analysis frame ([`Stft`]), application code
//! edits the spectrum in place, and the overlap-add engine ([`Ola`])
//! resynthesizes one chunk of output per call with a fixed, known
//! latency. Small companion utilities (unit delay, attack-release
//! filter, a spectral-freeze sustain effect) round out the toolkit.
//!
//! All buffers and transform plans are sized once at construction; the
//! per-chunk path performs no allocation, no locking, and no I/O. One
//! engine instance belongs to one thread (normally the audio callback)
//! for its whole lifetime — snapshotting spectra to other threads is
//! the caller's business.
//!
//! ## Example
//!
//! ```
//! use olafft::{Ola, WindowType};
//!
//! // frame of 16 samples, Hann window over all of it, hop of 8
//! let mut ola = Ola::new(
//!     16, 16, 8,
//!     WindowType::Hann, WindowType::Rect, 0.5, WindowType::Rect,
//! ).unwrap();
//! let mut out = [0.0f32; 8];
//! for chunk in [[1.0f32; 8], [0.5; 8], [0.0; 8]] {
//!     ola.process(&chunk).unwrap();
//!     // ... edit ola.spectrum_mut() here ...
//!     ola.ifft(&mut out).unwrap();
//! }
//! ```
//!
//! ## Cargo features
//!
//! - `verbose-logging`: emit `log` records at construction boundaries
//!   (plan and engine geometry).

/// Single-precision complex arithmetic.
pub mod num;

/// Fixed-length sample and spectral buffers.
pub mod chunks;

/// Window functions and zero-region tapers.
pub mod window;

/// Real FFT plans and the transform engine.
pub mod fft;

/// Streaming short-time Fourier transform.
pub mod stft;

/// Overlap-add resynthesis.
pub mod ola;

/// Unit delay and attack-release filter.
pub mod filter;

/// Spectral-freeze sustain effect.
pub mod sustain;

pub use chunks::{Spectrum, Wave};
pub use fft::{Fft, FftError, RealFftPlan};
pub use filter::{ArFilter, Delay1};
pub use num::Complex32;
pub use ola::Ola;
pub use stft::Stft;
pub use sustain::Sustain;
pub use window::WindowType;
