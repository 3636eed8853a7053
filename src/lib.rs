//! # fvwave
//!
//! A finite-volume wave-propagation library for hyperbolic PDEs on mapped
//! (curvilinear) grids.
//!
//! The crate provides the building blocks of a wave-propagation solver:
//! - Reference grids and coordinate mappings (identity, annulus, wavy)
//! - Per-face geometric factors (normals, length ratios, cell capacities)
//! - States with conserved fields, auxiliary geometry, and problem parameters
//! - Riemann solvers (Cartesian and mapped-grid acoustics, advection)
//! - Ghost-cell boundary conditions (extrapolation, periodic, solid wall)
//! - A dimension-split second-order update with wave limiters
//! - A controller producing equally-spaced output frames
//!
//! # Example
//!
//! ```
//! use fvwave::{
//!     Acoustics2D, BoundaryCondition, Grid2D, HyperbolicSystem, IdentityMapping,
//!     Limiter, MappedAcousticsRiemann, SideBoundaries, Solution, Solver2D, State2D,
//! };
//! use fvwave::types::Bounds2D;
//!
//! let grid = Grid2D::new(Bounds2D::unit_square(), 20, 20, 2);
//! let mapping = IdentityMapping;
//! let mut state = State2D::with_geometry(&grid, &mapping, 3).unwrap();
//! state.set_param("rho", 1.0);
//! state.set_param("bulk", 4.0);
//!
//! let acoustics = Acoustics2D::from_state(&state).unwrap();
//! state.fill_q(&grid, &mapping, 0, |x, y| {
//!     let r2 = (x - 0.5).powi(2) + (y - 0.5).powi(2);
//!     (-80.0 * r2).exp()
//! });
//!
//! let solver = Solver2D::new(Box::new(MappedAcousticsRiemann::new(acoustics)))
//!     .with_order(2)
//!     .with_limiter(Limiter::MC)
//!     .with_dt_initial(acoustics.stable_dt(&[0.0; 3], grid.dx.min(grid.dy), 0.9))
//!     .with_boundary_conditions(SideBoundaries::uniform(BoundaryCondition::Extrapolation));
//!
//! let mut solution = Solution::new(state, grid);
//! solver.evolve_to_time(&mut solution, 0.1).unwrap();
//! assert!(solution.t > 0.0);
//! ```

pub mod boundary;
pub mod controller;
pub mod equations;
pub mod error;
pub mod grid;
pub mod io;
pub mod riemann;
pub mod solver;
pub mod state;
pub mod types;

// Re-export main types for convenience
pub use boundary::{BoundaryCondition, fill_ghost_cells};
pub use controller::{Controller, RunSummary};
pub use equations::{Acoustics2D, Advection2D, HyperbolicSystem};
pub use error::Error;
pub use grid::{
    AnnulusMapping, Grid2D, GridMapping, IdentityMapping, MappedMetrics, WavyMapping,
};
pub use riemann::{
    AcousticsRiemann, AdvectionRiemann, BoxedRiemannSolver, MappedAcousticsRiemann,
    MappedAdvectionRiemann, RiemannSolution, RiemannSolver2D, SweepDirection,
};
pub use solver::{EvolveStats, Limiter, Solver2D, StepResult};
pub use state::{Solution, State2D};
pub use types::{Bounds2D, SideBoundaries};
