//! Crate-level error type.
//!
//! Each subsystem defines its own error enum next to the code that raises
//! it; this module composes them for callers that drive a whole run.

use thiserror::Error;

use crate::equations::EquationError;
use crate::grid::GeometryError;
use crate::io::OutputError;
use crate::solver::SolverError;

/// Any error the crate can produce.
#[derive(Debug, Error)]
pub enum Error {
    /// Grid mapping produced invalid geometry.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Equation coefficients missing or invalid.
    #[error(transparent)]
    Equation(#[from] EquationError),

    /// Solver configuration or time stepping failed.
    #[error(transparent)]
    Solver(#[from] SolverError),

    /// Frame output failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}
