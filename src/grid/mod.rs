//! Reference grids, coordinate mappings, and mapped-grid geometry.
//!
//! A [`Grid2D`] is always a uniform cell-centered grid over a rectangular
//! *reference* domain. Curved physical domains come from a [`GridMapping`]
//! that sends reference coordinates to physical ones; [`MappedMetrics`]
//! turns a mapping into the per-face geometric factors (unit normals,
//! edge-length ratios, cell capacities) the mapped Riemann solvers and the
//! finite-volume update consume.

mod grid2d;
mod mapping;
mod metrics;

pub use grid2d::Grid2D;
pub use mapping::{AnnulusMapping, GridMapping, IdentityMapping, WavyMapping};
pub use metrics::{GeometryError, MappedMetrics};
