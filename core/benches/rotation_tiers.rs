use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use cubesweeper_core::*;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const SIZES: [Coord; 3] = [3, 9, 20];

fn bench_rotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("rotate");
    for size in SIZES {
        let mines = GameConfig::new(size, 0).unwrap().total_cells() / 5;
        let config = GameConfig::new(size, mines).unwrap();
        let mut engine = CubeEngine::new(config, 1).unwrap();
        let start = engine.board().cell_at([0, 1, 1], Direction::NegX).unwrap();
        engine.reveal(start).unwrap();

        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut rng = SmallRng::seed_from_u64(7);
            b.iter(|| {
                let slice = Slice::random(&mut rng, size);
                // finished games reject rotations
                black_box(engine.rotate(slice).ok())
            });
        });
    }
    group.finish();
}

fn bench_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    for size in SIZES {
        let board = Board::build(size).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &board, |b, board| {
            b.iter(|| {
                board
                    .ids()
                    .map(|id| board.neighbors(black_box(id)).len())
                    .sum::<usize>()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_rotate, bench_neighbors);
criterion_main!(benches);
