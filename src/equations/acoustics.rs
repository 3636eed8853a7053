//! Linear acoustics in two dimensions.
//!
//! The system evolves `q = (p, u, v)`: pressure perturbation and the two
//! velocity components, with density `ρ` and bulk modulus `K` as
//! coefficients:
//!
//! ```text
//! p_t + K (u_x + v_y) = 0
//! u_t + p_x / ρ       = 0
//! v_t + p_y / ρ       = 0
//! ```
//!
//! Sound speed `c = sqrt(K/ρ)` and impedance `Z = ρc` are what the
//! Riemann solver actually consumes.

use crate::state::State2D;

use super::{EquationError, HyperbolicSystem};

/// 2D linear acoustics with uniform density and bulk modulus.
#[derive(Clone, Copy, Debug)]
pub struct Acoustics2D {
    /// Density ρ
    pub rho: f64,
    /// Bulk modulus K
    pub bulk: f64,
}

impl Acoustics2D {
    /// Component index of pressure.
    pub const PRESSURE: usize = 0;
    /// Component index of x-velocity.
    pub const XVELOCITY: usize = 1;
    /// Component index of y-velocity.
    pub const YVELOCITY: usize = 2;

    /// Create an acoustics system from density and bulk modulus.
    ///
    /// # Errors
    ///
    /// Both coefficients must be positive.
    pub fn new(rho: f64, bulk: f64) -> Result<Self, EquationError> {
        if !(rho > 0.0) {
            return Err(EquationError::NonPositiveParameter {
                name: "rho",
                value: rho,
            });
        }
        if !(bulk > 0.0) {
            return Err(EquationError::NonPositiveParameter {
                name: "bulk",
                value: bulk,
            });
        }
        Ok(Self { rho, bulk })
    }

    /// Read `"rho"` and `"bulk"` from a state's problem data.
    pub fn from_state(state: &State2D) -> Result<Self, EquationError> {
        let rho = state
            .param("rho")
            .ok_or(EquationError::MissingParameter("rho"))?;
        let bulk = state
            .param("bulk")
            .ok_or(EquationError::MissingParameter("bulk"))?;
        Self::new(rho, bulk)
    }

    /// Sound speed c = sqrt(K / ρ).
    #[inline]
    pub fn sound_speed(&self) -> f64 {
        (self.bulk / self.rho).sqrt()
    }

    /// Acoustic impedance Z = ρc = sqrt(Kρ).
    #[inline]
    pub fn impedance(&self) -> f64 {
        (self.bulk * self.rho).sqrt()
    }
}

impl HyperbolicSystem for Acoustics2D {
    fn num_eqn(&self) -> usize {
        3
    }

    fn num_waves(&self) -> usize {
        2
    }

    fn variable_names(&self) -> &'static [&'static str] {
        &["p", "u", "v"]
    }

    fn velocity_components(&self) -> Option<(usize, usize)> {
        Some((Self::XVELOCITY, Self::YVELOCITY))
    }

    fn max_wave_speed(&self, _q: &[f64]) -> f64 {
        self.sound_speed()
    }
}
