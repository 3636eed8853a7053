//! Hyperbolic system descriptions.
//!
//! An equation object carries the PDE coefficients and answers the
//! questions the solver layer asks of it: how many conserved components,
//! how many wave families a Riemann solve produces, which components form
//! a velocity vector, and how fast the fastest wave moves.

mod acoustics;
mod advection;

use thiserror::Error;

pub use acoustics::Acoustics2D;
pub use advection::Advection2D;

/// Errors raised when building an equation from problem data.
#[derive(Debug, Error)]
pub enum EquationError {
    /// A required problem parameter is absent.
    #[error("missing problem parameter `{0}`")]
    MissingParameter(&'static str),

    /// A parameter has a non-physical value.
    #[error("problem parameter `{name}` must be positive, got {value}")]
    NonPositiveParameter { name: &'static str, value: f64 },
}

/// A two-dimensional hyperbolic system of conservation laws.
pub trait HyperbolicSystem: Clone + Send + Sync {
    /// Number of conserved components.
    fn num_eqn(&self) -> usize;

    /// Number of wave families a Riemann solve produces.
    fn num_waves(&self) -> usize;

    /// Names of the conserved components, for output headers and logs.
    fn variable_names(&self) -> &'static [&'static str];

    /// Indices of the (x, y) velocity-like components, if the system has
    /// them. Used by wall boundary conditions to reflect the normal
    /// component.
    fn velocity_components(&self) -> Option<(usize, usize)> {
        None
    }

    /// Largest absolute characteristic speed for the given state.
    fn max_wave_speed(&self, q: &[f64]) -> f64;

    /// CFL-stable time-step estimate for a reference spacing `dref`.
    ///
    /// A starting point for the adaptive loop, not a guarantee: mapped
    /// grids compress cells, so the solver still measures the real CFL
    /// per step and rejects what overshoots.
    fn stable_dt(&self, q: &[f64], dref: f64, cfl: f64) -> f64 {
        cfl * dref / self.max_wave_speed(q)
    }
}
