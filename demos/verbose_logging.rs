//! Demonstrates enabling construction-time logging.
//!
//! Run with
//! `cargo run --example verbose_logging --features verbose-logging`.

use olafft::{Stft, WindowType};

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .init();

    let mut stft = Stft::new(512, 256, 128, WindowType::Hann).expect("engine");
    stft.process(&[0.0; 128]).expect("process");
    println!("bins: {}", stft.spectrum().len());
}
