use criterion::{criterion_group, criterion_main, Criterion};
use grid_maze::{
    solver::{astar::AstarSolver, bfs::BfsSolver, dfs::DfsSolver},
    GeneratorStrategy, GridSolver, MazeGenerator, MazeGrid,
};
use std::hint::black_box;

const SIZES: [usize; 2] = [101, 301];

fn maze_set(size: usize) -> Vec<(GeneratorStrategy, MazeGrid)> {
    let mut generator = MazeGenerator::new(Some(0));
    GeneratorStrategy::ALL
        .into_iter()
        .map(|strategy| (strategy, generator.generate(size, size, strategy).unwrap()))
        .collect()
}

fn generation_bench(c: &mut Criterion) {
    for size in SIZES {
        for strategy in GeneratorStrategy::ALL {
            let mut generator = MazeGenerator::new(Some(0));
            c.bench_function(format!("generate {strategy} {size}x{size}").as_str(), |b| {
                b.iter(|| black_box(generator.generate(size, size, strategy)))
            });
        }
    }
}

fn bench_solver<S: GridSolver>(c: &mut Criterion, solver_name: &str, solver: S) {
    for size in SIZES {
        for (strategy, maze) in maze_set(size) {
            c.bench_function(
                format!("{solver_name}, {strategy} {size}x{size}").as_str(),
                |b| b.iter(|| black_box(solver.explore(&maze, maze.start(), maze.end()))),
            );
        }
    }
}

fn solver_bench(c: &mut Criterion) {
    bench_solver(c, "BFS", BfsSolver);
    bench_solver(c, "DFS", DfsSolver);
    bench_solver(c, "Astar", AstarSolver::new());
}

criterion_group!(benches, generation_bench, solver_bench);
criterion_main!(benches);
