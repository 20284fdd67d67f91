//! Offline sustain demo: freeze a WAV file's spectrum.
//!
//! Run with `cargo run --example sustain_wav -- in.wav out.wav`.
//! The first channel is processed in chunks of 1024 samples with a
//! 20-second sustain time constant and a fully wet mix.

use olafft::Sustain;

const WLEN: usize = 1024;

fn main() {
    let mut args = std::env::args().skip(1);
    let infile = args.next().expect("usage: sustain_wav <in.wav> <out.wav>");
    let outfile = args.next().expect("usage: sustain_wav <in.wav> <out.wav>");

    let mut reader = hound::WavReader::open(&infile).expect("open input");
    let spec = reader.spec();
    let channels = spec.channels as usize;
    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .step_by(channels)
            .map(|s| s.unwrap())
            .collect(),
        hound::SampleFormat::Int => {
            let norm = 1.0 / (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .step_by(channels)
                .map(|s| s.unwrap() as f32 * norm)
                .collect()
        }
    };

    let mut sustain = Sustain::new(WLEN, spec.sample_rate as f64).expect("engine");
    sustain.set_wet(1.0);
    sustain.set_wet_apply(0.0);

    let out_spec = hound::WavSpec {
        channels: 1,
        sample_rate: spec.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(&outfile, out_spec).expect("create output");

    let mut out = vec![0.0f32; WLEN];
    for chunk in samples.chunks(WLEN) {
        let mut padded = chunk.to_vec();
        padded.resize(WLEN, 0.0);
        sustain.process(&padded, &mut out).expect("process");
        for &v in &out {
            writer.write_sample(v).expect("write");
        }
    }
    writer.finalize().expect("finalize");
    eprintln!(
        "wrote {} ({} samples, latency {} samples)",
        outfile,
        samples.len(),
        sustain.latency()
    );
}
