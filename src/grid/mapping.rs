//! Coordinate mappings from reference to physical space.

/// A mapping from reference (computational) coordinates to physical
/// coordinates.
///
/// Implementations must be orientation-preserving over the grid they are
/// used with: the mapped cell corners must enclose a positive area. That
/// is checked when [`crate::grid::MappedMetrics`] is computed, not here.
pub trait GridMapping: Send + Sync {
    /// Map a reference point `(xi, eta)` to physical `(x, y)`.
    fn map(&self, xi: f64, eta: f64) -> (f64, f64);

    /// Human-readable name for logging.
    fn name(&self) -> &'static str {
        "mapping"
    }
}

/// The identity mapping: physical coordinates equal reference coordinates.
///
/// Under this mapping every face normal is an axis unit vector and every
/// length and area ratio is exactly 1, so the mapped solvers degenerate to
/// their Cartesian counterparts.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdentityMapping;

impl GridMapping for IdentityMapping {
    #[inline]
    fn map(&self, xi: f64, eta: f64) -> (f64, f64) {
        (xi, eta)
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// Polar mapping of a rectangle onto an annulus.
///
/// The reference x-coordinate is the radius and the reference y-coordinate
/// is the angle in radians, so the natural reference domain is
/// `[r_inner, r_outer] × [0, 2π]`. Periodic boundary conditions in y close
/// the ring.
#[derive(Clone, Copy, Debug)]
pub struct AnnulusMapping;

impl GridMapping for AnnulusMapping {
    #[inline]
    fn map(&self, xi: f64, eta: f64) -> (f64, f64) {
        (xi * eta.cos(), xi * eta.sin())
    }

    fn name(&self) -> &'static str {
        "annulus"
    }
}

/// Sinusoidal perturbation of the unit square.
///
/// ```text
/// x = xi  + A sin(2π xi) sin(2π eta)
/// y = eta + A sin(2π xi) sin(2π eta)
/// ```
///
/// Exercises genuinely non-axis-aligned metrics while keeping the domain
/// boundary fixed, so the same boundary conditions apply as on the
/// unmapped square. The Jacobian stays positive for amplitudes below
/// roughly 0.1.
#[derive(Clone, Copy, Debug)]
pub struct WavyMapping {
    /// Perturbation amplitude
    pub amplitude: f64,
}

impl WavyMapping {
    /// Create a wavy mapping with the given amplitude.
    pub fn new(amplitude: f64) -> Self {
        Self { amplitude }
    }
}

impl GridMapping for WavyMapping {
    #[inline]
    fn map(&self, xi: f64, eta: f64) -> (f64, f64) {
        use std::f64::consts::TAU;
        let bump = self.amplitude * (TAU * xi).sin() * (TAU * eta).sin();
        (xi + bump, eta + bump)
    }

    fn name(&self) -> &'static str {
        "wavy"
    }
}
