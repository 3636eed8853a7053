//! Upwind advection Riemann solvers, Cartesian and mapped.

use crate::equations::Advection2D;

use super::{RiemannSolution, RiemannSolver2D, SweepDirection};

#[inline]
fn upwind_solve(q_l: &[f64], q_r: &[f64], speed: f64) -> RiemannSolution {
    let mut sol = RiemannSolution::new(1);
    sol.add_wave(&[q_r[0] - q_l[0]], speed);
    sol
}

/// Single-wave upwind solver for the color equation on an unmapped grid.
#[derive(Clone, Copy, Debug)]
pub struct AdvectionRiemann {
    u: f64,
    v: f64,
}

impl AdvectionRiemann {
    /// Build from an advection equation.
    pub fn new(equation: Advection2D) -> Self {
        Self {
            u: equation.u,
            v: equation.v,
        }
    }
}

impl RiemannSolver2D for AdvectionRiemann {
    fn solve(
        &self,
        dir: SweepDirection,
        q_l: &[f64],
        q_r: &[f64],
        _aux_l: &[f64],
        _aux_r: &[f64],
    ) -> RiemannSolution {
        let speed = match dir {
            SweepDirection::X => self.u,
            SweepDirection::Y => self.v,
        };
        upwind_solve(q_l, q_r, speed)
    }

    fn num_eqn(&self) -> usize {
        1
    }

    fn num_waves(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "advection"
    }
}

/// Single-wave upwind solver on a mapped grid.
///
/// The wave speed is the advection velocity projected onto the face
/// normal, scaled by the face length ratio.
#[derive(Clone, Copy, Debug)]
pub struct MappedAdvectionRiemann {
    u: f64,
    v: f64,
}

impl MappedAdvectionRiemann {
    /// Build from an advection equation.
    pub fn new(equation: Advection2D) -> Self {
        Self {
            u: equation.u,
            v: equation.v,
        }
    }
}

impl RiemannSolver2D for MappedAdvectionRiemann {
    fn solve(
        &self,
        dir: SweepDirection,
        q_l: &[f64],
        q_r: &[f64],
        _aux_l: &[f64],
        aux_r: &[f64],
    ) -> RiemannSolution {
        let (alpha, beta) = dir.face_normal(aux_r);
        let ratio = dir.face_ratio(aux_r);
        let speed = (alpha * self.u + beta * self.v) * ratio;
        upwind_solve(q_l, q_r, speed)
    }

    fn num_eqn(&self) -> usize {
        1
    }

    fn num_waves(&self) -> usize {
        1
    }

    fn name(&self) -> &'static str {
        "mapped_advection"
    }

    fn uses_mapped_geometry(&self) -> bool {
        true
    }
}
