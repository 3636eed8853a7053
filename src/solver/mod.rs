//! The wave-propagation solver: sweeps, limiters, CFL control.

mod limiters;
mod solver2d;
mod sweep;

pub use limiters::Limiter;
pub use solver2d::{EvolveStats, Solver2D, SolverError, StepResult};
