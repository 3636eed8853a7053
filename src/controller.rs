//! Run orchestration: output times, frames, summary statistics.

use std::path::PathBuf;
use std::time::Instant;

use log::info;

use crate::error::Error;
use crate::io::write_frame;
use crate::solver::{EvolveStats, Solver2D};
use crate::state::Solution;

// =============================================================================
// Run summary
// =============================================================================

/// Statistics of a completed controller run.
#[derive(Clone, Debug)]
pub struct RunSummary {
    /// Frames produced, counting frame 0
    pub frames: usize,
    /// Final simulation time reached
    pub final_time: f64,
    /// Total accepted steps across all frame intervals
    pub steps: usize,
    /// Smallest accepted dt
    pub dt_min: f64,
    /// Largest accepted dt
    pub dt_max: f64,
    /// Largest CFL number among accepted steps
    pub cfl_max: f64,
    /// Total wall-clock time in seconds
    pub wall_time: f64,
}

// =============================================================================
// Controller
// =============================================================================

/// Drives a solver from the initial solution to `tfinal`, producing
/// `num_output_times` equally-spaced output frames plus frame 0.
///
/// Frames are written through [`crate::io::write_frame`] when an output
/// directory is set, and retained in memory as cloned [`Solution`]s when
/// `keep_copy` is enabled. Frame times are strictly increasing.
pub struct Controller {
    solver: Solver2D,
    solution: Solution,
    outdir: Option<PathBuf>,
    keep_copy: bool,
    num_output_times: usize,
    tfinal: f64,
    frames: Vec<Solution>,
}

impl Controller {
    /// Create a controller with defaults: 10 output times, `tfinal` 1.0,
    /// no output directory, no in-memory frames.
    pub fn new(solver: Solver2D, solution: Solution) -> Self {
        Self {
            solver,
            solution,
            outdir: None,
            keep_copy: false,
            num_output_times: 10,
            tfinal: 1.0,
            frames: Vec::new(),
        }
    }

    /// Write frames into `dir`.
    pub fn with_outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = Some(dir.into());
        self
    }

    /// Keep a cloned `Solution` per frame in memory.
    pub fn keep_copy(mut self, keep: bool) -> Self {
        self.keep_copy = keep;
        self
    }

    /// Number of output times after frame 0.
    pub fn with_num_output_times(mut self, n: usize) -> Self {
        self.num_output_times = n;
        self
    }

    /// Final simulation time.
    pub fn with_tfinal(mut self, tfinal: f64) -> Self {
        self.tfinal = tfinal;
        self
    }

    /// The current solution.
    pub fn solution(&self) -> &Solution {
        &self.solution
    }

    /// In-memory frames (empty unless `keep_copy` is set).
    pub fn frames(&self) -> &[Solution] {
        &self.frames
    }

    /// Run the simulation, producing every frame.
    pub fn run(&mut self) -> Result<RunSummary, Error> {
        let start = Instant::now();
        let t0 = self.solution.t;

        info!(
            "run: riemann `{}`, t = {:.6} -> {:.6}, {} output times",
            self.solver.riemann().name(),
            t0,
            self.tfinal,
            self.num_output_times
        );

        self.emit_frame(0)?;
        let mut stats = EvolveStats::default();

        for frame in 1..=self.num_output_times {
            let fraction = frame as f64 / self.num_output_times as f64;
            let t_target = t0 + (self.tfinal - t0) * fraction;

            let interval = self.solver.evolve_to_time(&mut self.solution, t_target)?;
            stats.merge(&interval);

            info!(
                "frame {} at t = {:.6} ({} steps, cfl_max {:.3})",
                frame, self.solution.t, interval.steps, interval.cfl_max
            );
            self.emit_frame(frame)?;
        }

        Ok(RunSummary {
            frames: self.num_output_times + 1,
            final_time: self.solution.t,
            steps: stats.steps,
            dt_min: stats.dt_min,
            dt_max: stats.dt_max,
            cfl_max: stats.cfl_max,
            wall_time: start.elapsed().as_secs_f64(),
        })
    }

    fn emit_frame(&mut self, index: usize) -> Result<(), Error> {
        if let Some(dir) = &self.outdir {
            write_frame(dir, index, &self.solution)?;
        }
        if self.keep_copy {
            self.frames.push(self.solution.clone());
        }
        Ok(())
    }
}
