use criterion::{criterion_group, criterion_main, Criterion};
use conceal_core::engine::NoopObserver;
use conceal_core::{
    CancellationToken, EmbeddingEngine, ExtractionEngine, PcmAudio, PcmSpec, PixelChannelStream,
};

pub fn image_decoding(c: &mut Criterion) {
    c.bench_function("Image Decoding", |b| {
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
        let secret = EmbeddingEngine::default()
            .run(carrier, &audio, &CancellationToken::new(), &mut NoopObserver)
            .expect("Cannot conceal audio");
        let engine = ExtractionEngine::default();

        b.iter(|| {
            engine.extract(&secret).expect("Failed to extract audio");
        })
    });
}

criterion_group!(benches, image_decoding);
criterion_main!(benches);
