use criterion::{criterion_group, criterion_main, Criterion};
use conceal_core::engine::NoopObserver;
use conceal_core::{CancellationToken, EmbeddingEngine, PcmAudio, PcmSpec, PixelChannelStream};

pub fn image_encoding(c: &mut Criterion) {
    c.bench_function("Image Encoding", |b| {
        let carrier = PixelChannelStream::from_raw(512, 512, vec![0x5a; 512 * 512 * 3])
            .expect("Carrier image is not valid.");
        let audio = PcmAudio::new(
            PcmSpec {
                sample_rate: 16_000,
                channels: 1,
                valid_bits: 16,
            },
            (0..16_000).map(|i| (i % 2_000) - 1_000).collect(),
        )
        .expect("Audio is not valid.");
        let engine = EmbeddingEngine::default();

        b.iter(|| {
            engine
                .run(
                    carrier.clone(),
                    &audio,
                    &CancellationToken::new(),
                    &mut NoopObserver,
                )
                .expect("Cannot conceal audio");
        })
    });
}

criterion_group!(benches, image_encoding);
criterion_main!(benches);
