//! A state paired with its grid and a simulation time.

use crate::grid::Grid2D;

use super::State2D;

/// One state on one grid at one time.
///
/// This is the unit the solver advances and the controller snapshots:
/// output frames are cloned `Solution`s.
#[derive(Clone, Debug)]
pub struct Solution {
    /// The evolved state
    pub state: State2D,
    /// The grid the state lives on
    pub grid: Grid2D,
    /// Current simulation time
    pub t: f64,
}

impl Solution {
    /// Create a solution at time zero.
    pub fn new(state: State2D, grid: Grid2D) -> Self {
        Self::at_time(state, grid, 0.0)
    }

    /// Create a solution at a given time.
    pub fn at_time(state: State2D, grid: Grid2D, t: f64) -> Self {
        debug_assert_eq!(state.total_mx(), grid.total_mx());
        debug_assert_eq!(state.total_my(), grid.total_my());
        Self { state, grid, t }
    }
}
