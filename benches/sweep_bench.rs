//! Benchmark of a full solver step on a mapped grid.
//!
//! Run with: `cargo bench --bench sweep_bench`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use fvwave::{
    Acoustics2D, BoundaryCondition, Grid2D, Limiter, MappedAcousticsRiemann, SideBoundaries,
    Solution, Solver2D, State2D, WavyMapping,
};
use fvwave::types::Bounds2D;

fn pulse_solution(n: usize) -> Solution {
    let grid = Grid2D::new(Bounds2D::unit_square(), n, n, 2);
    let mapping = WavyMapping::new(0.05);
    let mut state = State2D::with_geometry(&grid, &mapping, 3).unwrap();
    state.set_param("rho", 1.0);
    state.set_param("bulk", 4.0);
    state.fill_q(&grid, &mapping, 0, |x, y| {
        let r2 = (x - 0.5).powi(2) + (y - 0.5).powi(2);
        (-80.0 * r2).exp()
    });
    Solution::new(state, grid)
}

fn bench_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("solver_step");
    let eq = Acoustics2D::new(1.0, 4.0).unwrap();

    for n in [32usize, 64, 128] {
        let solver = Solver2D::new(Box::new(MappedAcousticsRiemann::new(eq)))
            .with_order(2)
            .with_limiter(Limiter::MC)
            .with_boundary_conditions(SideBoundaries::uniform(BoundaryCondition::Extrapolation));
        let solution = pulse_solution(n);
        // Keep CFL around 0.5 at every size.
        let dt = 0.25 / n as f64;

        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter_batched(
                || solution.clone(),
                |mut sol| solver.step(&mut sol, dt).unwrap(),
                criterion::BatchSize::LargeInput,
            )
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
