//! The 2D solver: configuration, dimension-split stepping, CFL control.

use log::{debug, warn};
use thiserror::Error;

use crate::boundary::{BoundaryCondition, fill_ghost_cells};
use crate::riemann::{BoxedRiemannSolver, SweepDirection};
use crate::state::{NUM_GEOMETRY_AUX, Solution};
use crate::types::SideBoundaries;

use super::sweep::sweep_line;
use super::Limiter;

// =============================================================================
// Errors
// =============================================================================

/// Solver configuration and time-stepping errors.
#[derive(Debug, Error)]
pub enum SolverError {
    /// Spatial order outside {1, 2}.
    #[error("spatial order must be 1 or 2, got {0}")]
    InvalidOrder(usize),

    /// CFL targets out of range.
    #[error("cfl_desired ({desired}) must be positive and at most cfl_max ({max})")]
    InvalidCflTargets { desired: f64, max: f64 },

    /// A periodic edge without its partner.
    #[error("periodic boundaries must be paired across the {0} edges")]
    UnpairedPeriodic(&'static str),

    /// State component count does not match the Riemann solver.
    #[error("riemann solver `{name}` expects {expected} components, state has {actual}")]
    ComponentMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Mapped solver on a state without geometry aux slots.
    #[error(
        "riemann solver `{name}` reads mapped geometry: state has {actual} aux components, \
         the convention needs {needed}"
    )]
    MissingGeometryAux {
        name: &'static str,
        needed: usize,
        actual: usize,
    },

    /// Second-order stencil does not fit in the ghost ring.
    #[error("second-order updates need at least 2 ghost cells, grid has {0}")]
    NotEnoughGhostCells(usize),

    /// Repeated step rejection drove dt below the floor.
    #[error("time step collapsed to {dt:.3e} (floor {floor:.3e}) at t = {t:.6}")]
    TimeStepCollapse { dt: f64, floor: f64, t: f64 },

    /// Step budget exhausted before the target time.
    #[error("exceeded {max} steps before reaching t = {t_end}")]
    MaxStepsExceeded { max: usize, t_end: f64 },
}

// =============================================================================
// Results
// =============================================================================

/// Outcome of a single step.
#[derive(Clone, Copy, Debug)]
pub struct StepResult {
    /// Largest CFL number observed across both sweeps
    pub cfl: f64,
}

/// Accumulated statistics of an `evolve_to_time` call.
#[derive(Clone, Copy, Debug)]
pub struct EvolveStats {
    /// Accepted steps taken
    pub steps: usize,
    /// Smallest accepted dt
    pub dt_min: f64,
    /// Largest accepted dt
    pub dt_max: f64,
    /// Largest CFL number among accepted steps
    pub cfl_max: f64,
}

impl Default for EvolveStats {
    fn default() -> Self {
        Self {
            steps: 0,
            dt_min: f64::INFINITY,
            dt_max: 0.0,
            cfl_max: 0.0,
        }
    }
}

impl EvolveStats {
    fn record(&mut self, dt: f64, cfl: f64) {
        self.steps += 1;
        self.dt_min = self.dt_min.min(dt);
        self.dt_max = self.dt_max.max(dt);
        self.cfl_max = self.cfl_max.max(cfl);
    }

    /// Fold another run's statistics into this one.
    pub fn merge(&mut self, other: &EvolveStats) {
        self.steps += other.steps;
        self.dt_min = self.dt_min.min(other.dt_min);
        self.dt_max = self.dt_max.max(other.dt_max);
        self.cfl_max = self.cfl_max.max(other.cfl_max);
    }
}

// =============================================================================
// Solver
// =============================================================================

/// Dimension-split wave-propagation solver.
///
/// Configured with a Riemann solver, per-edge boundary conditions, a
/// spatial order with limiter, and CFL targets. [`Solver2D::step`] takes
/// one step of a given size; [`Solver2D::evolve_to_time`] runs an
/// adaptive-dt loop that rejects steps whose measured CFL exceeds
/// `cfl_max` and lands exactly on the target time.
pub struct Solver2D {
    riemann: BoxedRiemannSolver,
    order: usize,
    limiter: Limiter,
    bcs: SideBoundaries<BoundaryCondition>,
    cfl_desired: f64,
    cfl_max: f64,
    dt_initial: f64,
    dt_min: f64,
    max_steps: usize,
}

impl Solver2D {
    /// Create a solver with default configuration: second order with the
    /// MC limiter, extrapolation on every edge, CFL targets 0.9 / 1.0.
    pub fn new(riemann: BoxedRiemannSolver) -> Self {
        Self {
            riemann,
            order: 2,
            limiter: Limiter::MC,
            bcs: SideBoundaries::uniform(BoundaryCondition::Extrapolation),
            cfl_desired: 0.9,
            cfl_max: 1.0,
            dt_initial: 0.01,
            dt_min: 1e-12,
            max_steps: 10_000,
        }
    }

    /// Set the spatial order (1 or 2; validated at step time).
    pub fn with_order(mut self, order: usize) -> Self {
        self.order = order;
        self
    }

    /// Set the wave limiter used by second-order corrections.
    pub fn with_limiter(mut self, limiter: Limiter) -> Self {
        self.limiter = limiter;
        self
    }

    /// Assign boundary conditions per edge.
    pub fn with_boundary_conditions(mut self, bcs: SideBoundaries<BoundaryCondition>) -> Self {
        self.bcs = bcs;
        self
    }

    /// Set the desired and maximum CFL numbers.
    pub fn with_cfl(mut self, desired: f64, max: f64) -> Self {
        self.cfl_desired = desired;
        self.cfl_max = max;
        self
    }

    /// Set the dt the adaptive loop starts from.
    pub fn with_dt_initial(mut self, dt: f64) -> Self {
        self.dt_initial = dt;
        self
    }

    /// Set the dt floor below which the adaptive loop gives up.
    pub fn with_dt_min(mut self, dt_min: f64) -> Self {
        self.dt_min = dt_min;
        self
    }

    /// Set the step budget per `evolve_to_time` call.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The configured Riemann solver.
    pub fn riemann(&self) -> &dyn crate::riemann::RiemannSolver2D {
        self.riemann.as_ref()
    }

    /// The configured boundary conditions.
    pub fn boundary_conditions(&self) -> &SideBoundaries<BoundaryCondition> {
        &self.bcs
    }

    /// Check this configuration against a concrete solution.
    pub fn validate(&self, solution: &Solution) -> Result<(), SolverError> {
        if !(self.order == 1 || self.order == 2) {
            return Err(SolverError::InvalidOrder(self.order));
        }
        if !(self.cfl_desired > 0.0 && self.cfl_desired <= self.cfl_max) {
            return Err(SolverError::InvalidCflTargets {
                desired: self.cfl_desired,
                max: self.cfl_max,
            });
        }
        let (w, e) = self.bcs.x_pair();
        if (w == BoundaryCondition::Periodic) != (e == BoundaryCondition::Periodic) {
            return Err(SolverError::UnpairedPeriodic("west/east"));
        }
        let (s, n) = self.bcs.y_pair();
        if (s == BoundaryCondition::Periodic) != (n == BoundaryCondition::Periodic) {
            return Err(SolverError::UnpairedPeriodic("south/north"));
        }
        if self.riemann.num_eqn() != solution.state.num_eqn {
            return Err(SolverError::ComponentMismatch {
                name: self.riemann.name(),
                expected: self.riemann.num_eqn(),
                actual: solution.state.num_eqn,
            });
        }
        if self.riemann.uses_mapped_geometry() && solution.state.num_aux < NUM_GEOMETRY_AUX {
            return Err(SolverError::MissingGeometryAux {
                name: self.riemann.name(),
                needed: NUM_GEOMETRY_AUX,
                actual: solution.state.num_aux,
            });
        }
        if self.order == 2 && solution.grid.num_ghost < 2 {
            return Err(SolverError::NotEnoughGhostCells(solution.grid.num_ghost));
        }
        Ok(())
    }

    /// Take one step of size `dt`, advancing `solution.t`.
    ///
    /// The step is applied unconditionally; the returned CFL number tells
    /// the caller whether it was stable. [`Solver2D::evolve_to_time`] uses
    /// that to reject and retry oversized steps.
    pub fn step(&self, solution: &mut Solution, dt: f64) -> Result<StepResult, SolverError> {
        self.validate(solution)?;
        Ok(self.step_unchecked(solution, dt))
    }

    fn step_unchecked(&self, solution: &mut Solution, dt: f64) -> StepResult {
        let velocity = self.riemann.velocity_components();

        fill_ghost_cells(&mut solution.state, &solution.grid, &self.bcs, velocity);
        let cfl_x = self.sweep_x(solution, dt);

        fill_ghost_cells(&mut solution.state, &solution.grid, &self.bcs, velocity);
        let cfl_y = self.sweep_y(solution, dt);

        solution.t += dt;
        StepResult {
            cfl: cfl_x.max(cfl_y),
        }
    }

    /// Advance the solution to `t_end` with adaptive time steps.
    pub fn evolve_to_time(
        &self,
        solution: &mut Solution,
        t_end: f64,
    ) -> Result<EvolveStats, SolverError> {
        self.validate(solution)?;

        let mut stats = EvolveStats::default();
        let time_eps = 1e-12 * t_end.abs().max(1.0);
        let mut dt = self.dt_initial;

        while t_end - solution.t > time_eps {
            if stats.steps >= self.max_steps {
                return Err(SolverError::MaxStepsExceeded {
                    max: self.max_steps,
                    t_end,
                });
            }

            dt = dt.min(t_end - solution.t);
            let t_before = solution.t;
            let q_backup = solution.state.q_slice().to_vec();

            let result = self.step_unchecked(solution, dt);

            if result.cfl > self.cfl_max {
                // Reject: restore the state and retry with a smaller dt.
                solution.state.q_slice_mut().copy_from_slice(&q_backup);
                solution.t = t_before;
                let dt_retry = dt * self.cfl_desired / result.cfl;
                warn!(
                    "rejecting step at t = {:.6}: cfl {:.3} > {:.3}, dt {:.3e} -> {:.3e}",
                    t_before, result.cfl, self.cfl_max, dt, dt_retry
                );
                if dt_retry < self.dt_min {
                    return Err(SolverError::TimeStepCollapse {
                        dt: dt_retry,
                        floor: self.dt_min,
                        t: t_before,
                    });
                }
                dt = dt_retry;
                continue;
            }

            stats.record(dt, result.cfl);
            debug!(
                "step {} to t = {:.6}: dt = {:.3e}, cfl = {:.3}",
                stats.steps, solution.t, dt, result.cfl
            );

            // Aim the next step at the desired CFL.
            if result.cfl > 1e-12 {
                dt *= self.cfl_desired / result.cfl;
            } else {
                dt *= 2.0;
            }
        }

        Ok(stats)
    }

    fn sweep_x(&self, solution: &mut Solution, dt: f64) -> f64 {
        let grid = &solution.grid;
        let (num_eqn, num_aux) = (solution.state.num_eqn, solution.state.num_aux);
        let (tx, g, dx) = (grid.total_mx(), grid.num_ghost, grid.dx);
        let iy = grid.iy_range();
        let row_len = tx * num_eqn;
        let aux_row_len = tx * num_aux;
        let (q, aux) = solution.state.q_aux_mut();

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            q.par_chunks_mut(row_len)
                .enumerate()
                .filter(|(j, _)| iy.contains(j))
                .map(|(j, q_row)| {
                    let aux_row = &aux[j * aux_row_len..(j + 1) * aux_row_len];
                    sweep_line(
                        q_row,
                        aux_row,
                        tx,
                        num_eqn,
                        num_aux,
                        g,
                        SweepDirection::X,
                        dx,
                        dt,
                        self.riemann.as_ref(),
                        self.limiter,
                        self.order,
                    )
                })
                .reduce(|| 0.0, f64::max)
        }

        #[cfg(not(feature = "parallel"))]
        {
            let mut cfl = 0.0_f64;
            for j in iy {
                let q_row = &mut q[j * row_len..(j + 1) * row_len];
                let aux_row = &aux[j * aux_row_len..(j + 1) * aux_row_len];
                cfl = cfl.max(sweep_line(
                    q_row,
                    aux_row,
                    tx,
                    num_eqn,
                    num_aux,
                    g,
                    SweepDirection::X,
                    dx,
                    dt,
                    self.riemann.as_ref(),
                    self.limiter,
                    self.order,
                ));
            }
            cfl
        }
    }

    fn sweep_y(&self, solution: &mut Solution, dt: f64) -> f64 {
        let grid = &solution.grid;
        let (num_eqn, num_aux) = (solution.state.num_eqn, solution.state.num_aux);
        let (tx, ty, g, dy) = (grid.total_mx(), grid.total_my(), grid.num_ghost, grid.dy);
        let ix = grid.ix_range();
        let (q, aux) = solution.state.q_aux_mut();

        let gather = |q_ro: &[f64], i: usize| {
            let mut q_col = vec![0.0; ty * num_eqn];
            let mut aux_col = vec![0.0; ty * num_aux];
            for j in 0..ty {
                let cell = j * tx + i;
                q_col[j * num_eqn..(j + 1) * num_eqn]
                    .copy_from_slice(&q_ro[cell * num_eqn..(cell + 1) * num_eqn]);
                aux_col[j * num_aux..(j + 1) * num_aux]
                    .copy_from_slice(&aux[cell * num_aux..(cell + 1) * num_aux]);
            }
            (q_col, aux_col)
        };

        let run = |q_col: &mut [f64], aux_col: &[f64]| {
            sweep_line(
                q_col,
                aux_col,
                ty,
                num_eqn,
                num_aux,
                g,
                SweepDirection::Y,
                dy,
                dt,
                self.riemann.as_ref(),
                self.limiter,
                self.order,
            )
        };

        #[cfg(feature = "parallel")]
        let columns: Vec<(usize, Vec<f64>, f64)> = {
            use rayon::prelude::*;
            let q_ro: &[f64] = q;
            ix.into_par_iter()
                .map(|i| {
                    let (mut q_col, aux_col) = gather(q_ro, i);
                    let cfl = run(&mut q_col, &aux_col);
                    (i, q_col, cfl)
                })
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let columns: Vec<(usize, Vec<f64>, f64)> = {
            let q_ro: &[f64] = q;
            ix.map(|i| {
                let (mut q_col, aux_col) = gather(q_ro, i);
                let cfl = run(&mut q_col, &aux_col);
                (i, q_col, cfl)
            })
            .collect()
        };

        let mut cfl_max = 0.0_f64;
        for (i, q_col, cfl) in columns {
            for j in 0..ty {
                let cell = j * tx + i;
                q[cell * num_eqn..(cell + 1) * num_eqn]
                    .copy_from_slice(&q_col[j * num_eqn..(j + 1) * num_eqn]);
            }
            cfl_max = cfl_max.max(cfl);
        }
        cfl_max
    }
}
