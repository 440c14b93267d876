use criterion::{Criterion, criterion_group, criterion_main};
use memora_core::*;
use std::hint::black_box;

fn bench_targets(c: &mut Criterion) {
    let mut group = c.benchmark_group("targets");

    for level in [1, 8, 30] {
        let grid = grid_size_for_level(level);
        let count = target_count(level, grid);
        group.bench_function(format!("level_{}", level), |b| {
            let mut generator = RandomTargetGenerator::new(0x5eed);
            b.iter(|| black_box(generator.generate(black_box(grid), black_box(count))));
        });
    }

    group.finish();
}

fn bench_round(c: &mut Criterion) {
    c.bench_function("round/start_and_win", |b| {
        let mut engine = PlayEngine::new(EngineConfig::default(), 0x5eed);
        let reveal = EngineConfig::default().timings.reveal_duration(true);
        b.iter(|| {
            engine.start_new_game();
            engine.advance(reveal);
            let targets: Vec<_> = engine.targets().iter().copied().collect();
            for cell in targets {
                let _ = engine.select_square(cell);
            }
            black_box(engine.state())
        });
    });
}

criterion_group!(benches, bench_targets, bench_round);
criterion_main!(benches);
