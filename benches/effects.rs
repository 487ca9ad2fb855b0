//! Benchmarks for the effect chain and the PCM codec.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use wavedit::audio::{decode, encode};
use wavedit::{AudioBuffer, BitDepth, Effect, FadeCurve};

fn random_buffer(seconds: usize, bit_depth: BitDepth) -> AudioBuffer {
    let mut rng = rand::thread_rng();
    let len = seconds * 44100;
    let channels = (0..2).map(|_| (0..len).map(|_| rng.gen_range(-1.0..1.0)).collect()).collect();
    AudioBuffer::from_channels(44100, bit_depth, channels).unwrap()
}

fn bench_effects(c: &mut Criterion) {
    let mut group = c.benchmark_group("effects");
    let buffer = random_buffer(5, BitDepth::Sixteen);
    group.throughput(Throughput::Elements(buffer.samples().len() as u64));

    let effects = [
        Effect::Gain { volume_db: -3.0 },
        Effect::Reverse,
        Effect::Reverb,
        Effect::Compressor { threshold_db: -12.0, ratio: 4.0, downward: true },
        Effect::Distortion { drive: 0.6, blend: 0.5, volume: 1.0 },
        Effect::FadeOut { time: 2.0, curve: FadeCurve::Logarithmic },
        Effect::Rotate { rate: 0.5 },
        Effect::Tremolo { freq: 5.0, dry: 0.5, wet: 0.5 },
    ];

    for effect in &effects {
        group.bench_with_input(BenchmarkId::from_parameter(effect.name()), effect, |b, effect| {
            b.iter_batched(
                || buffer.clone(),
                |mut buffer| effect.apply(black_box(&mut buffer)),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for bit_depth in [BitDepth::Eight, BitDepth::Sixteen, BitDepth::TwentyFour, BitDepth::ThirtyTwo] {
        let buffer = random_buffer(2, bit_depth);
        let bytes = encode(&buffer).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));

        group.bench_with_input(BenchmarkId::new("encode", bit_depth.bits()), &buffer, |b, buffer| {
            b.iter(|| encode(black_box(buffer)))
        });
        group.bench_with_input(BenchmarkId::new("decode", bit_depth.bits()), &bytes, |b, bytes| {
            b.iter(|| decode(black_box(bytes)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_effects, bench_codec);
criterion_main!(benches);
