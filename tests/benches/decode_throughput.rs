use criterion::{black_box, criterion_group, criterion_main, Criterion};

use decoder_core::code_table;
use decoder_core::test_utils::keying_simulator::KeyingSimulator;
use decoder_core::{classify, DecoderConfig, Duration, SymbolSequence};

fn bench_classify(c: &mut Criterion) {
    let config = DecoderConfig::default();
    c.bench_function("classify", |b| {
        b.iter(|| {
            for ms in (0..1000u64).step_by(7) {
                black_box(classify(Duration::from_millis(black_box(ms)), &config));
            }
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let patterns: Vec<SymbolSequence> = ["....", ".", ".-..", "---", "----.", "..--..--"]
        .iter()
        .filter_map(|p| SymbolSequence::parse(p))
        .collect();
    c.bench_function("code_table_decode", |b| {
        b.iter(|| {
            for pattern in &patterns {
                black_box(code_table::decode(black_box(pattern)));
            }
        })
    });
}

fn bench_session(c: &mut Criterion) {
    c.bench_function("session_key_paris", |b| {
        b.iter(|| {
            let mut sim = KeyingSimulator::new(DecoderConfig::default());
            sim.key_text("PARIS");
            black_box(sim.session.text().len())
        })
    });
}

criterion_group!(benches, bench_classify, bench_lookup, bench_session);
criterion_main!(benches);
