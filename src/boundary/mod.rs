//! Ghost-cell boundary conditions.
//!
//! Before every sweep the solver fills the ghost ring of the state from
//! the boundary conditions assigned per edge:
//!
//! - `Extrapolation`: zero-order outflow, ghost cells copy the nearest
//!   interior cell.
//! - `Periodic`: ghost cells copy the interior cells at the opposite edge.
//!   Periodic edges must come in pairs (west with east, south with north);
//!   the solver validates that at configuration time.
//! - `Wall`: solid wall. Ghost cells mirror the interior and the velocity
//!   is reflected about the boundary-face normal, so the normal component
//!   reverses and the tangential component is preserved. On mapped grids
//!   the normal comes from the stored face geometry, which makes the same
//!   code correct on curved walls.
//!
//! Aux ghosts are not touched here: geometry is filled once at setup from
//! the mapping itself.
//!
//! Fill order is x edges first, then y edges over the full (ghost
//! included) width, so corner ghosts end up consistent for any
//! combination of conditions.

use std::fmt;

use crate::grid::Grid2D;
use crate::state::{AUX_XFACE_NX, AUX_XFACE_NY, AUX_YFACE_NX, AUX_YFACE_NY, NUM_GEOMETRY_AUX};
use crate::state::State2D;
use crate::types::SideBoundaries;

/// Boundary condition applied at one domain edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryCondition {
    /// Zero-order extrapolation (outflow)
    #[default]
    Extrapolation,
    /// Wrap around to the opposite edge
    Periodic,
    /// Solid wall: reflect the normal velocity component
    Wall,
}

impl fmt::Display for BoundaryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryCondition::Extrapolation => "extrapolation",
            BoundaryCondition::Periodic => "periodic",
            BoundaryCondition::Wall => "wall",
        };
        f.write_str(name)
    }
}

/// Fill the ghost ring of `state` from the per-edge conditions.
///
/// `velocity` names the (x, y) velocity component indices for wall
/// reflection; systems without velocities pass `None` and walls fall back
/// to plain mirroring.
pub fn fill_ghost_cells(
    state: &mut State2D,
    grid: &Grid2D,
    bcs: &SideBoundaries<BoundaryCondition>,
    velocity: Option<(usize, usize)>,
) {
    let g = grid.num_ghost;
    let (mx, my) = (grid.mx, grid.my);
    let (tx, ty) = (state.total_mx(), state.total_my());

    let mapped = state.num_aux >= NUM_GEOMETRY_AUX;

    // --- x edges, every row ---
    for j in 0..ty {
        for k in 0..g {
            // West edge.
            let i_ghost = g - 1 - k;
            match bcs.west {
                BoundaryCondition::Extrapolation => copy_cell(state, g, j, i_ghost, j),
                BoundaryCondition::Periodic => copy_cell(state, i_ghost + mx, j, i_ghost, j),
                BoundaryCondition::Wall => {
                    copy_cell(state, g + k, j, i_ghost, j);
                    let n = if mapped {
                        (state.aux(AUX_XFACE_NX, g, j), state.aux(AUX_XFACE_NY, g, j))
                    } else {
                        (1.0, 0.0)
                    };
                    reflect_velocity(state, i_ghost, j, n, velocity);
                }
            }

            // East edge.
            let i_ghost = g + mx + k;
            match bcs.east {
                BoundaryCondition::Extrapolation => copy_cell(state, g + mx - 1, j, i_ghost, j),
                BoundaryCondition::Periodic => copy_cell(state, i_ghost - mx, j, i_ghost, j),
                BoundaryCondition::Wall => {
                    copy_cell(state, g + mx - 1 - k, j, i_ghost, j);
                    let n = if mapped {
                        (
                            state.aux(AUX_XFACE_NX, g + mx, j),
                            state.aux(AUX_XFACE_NY, g + mx, j),
                        )
                    } else {
                        (1.0, 0.0)
                    };
                    reflect_velocity(state, i_ghost, j, n, velocity);
                }
            }
        }
    }

    // --- y edges, every column (corners pick up the filled x ghosts) ---
    for i in 0..tx {
        for k in 0..g {
            // South edge.
            let j_ghost = g - 1 - k;
            match bcs.south {
                BoundaryCondition::Extrapolation => copy_cell(state, i, g, i, j_ghost),
                BoundaryCondition::Periodic => copy_cell(state, i, j_ghost + my, i, j_ghost),
                BoundaryCondition::Wall => {
                    copy_cell(state, i, g + k, i, j_ghost);
                    let n = if mapped {
                        (state.aux(AUX_YFACE_NX, i, g), state.aux(AUX_YFACE_NY, i, g))
                    } else {
                        (0.0, 1.0)
                    };
                    reflect_velocity(state, i, j_ghost, n, velocity);
                }
            }

            // North edge.
            let j_ghost = g + my + k;
            match bcs.north {
                BoundaryCondition::Extrapolation => copy_cell(state, i, g + my - 1, i, j_ghost),
                BoundaryCondition::Periodic => copy_cell(state, i, j_ghost - my, i, j_ghost),
                BoundaryCondition::Wall => {
                    copy_cell(state, i, g + my - 1 - k, i, j_ghost);
                    let n = if mapped {
                        (
                            state.aux(AUX_YFACE_NX, i, g + my),
                            state.aux(AUX_YFACE_NY, i, g + my),
                        )
                    } else {
                        (0.0, 1.0)
                    };
                    reflect_velocity(state, i, j_ghost, n, velocity);
                }
            }
        }
    }
}

#[inline]
fn copy_cell(state: &mut State2D, i_src: usize, j_src: usize, i_dst: usize, j_dst: usize) {
    for m in 0..state.num_eqn {
        let v = state.q(m, i_src, j_src);
        state.set_q(m, i_dst, j_dst, v);
    }
}

/// Reflect the cell's velocity vector about the face normal `n`:
/// `v <- v - 2 (v·n) n`.
#[inline]
fn reflect_velocity(
    state: &mut State2D,
    i: usize,
    j: usize,
    n: (f64, f64),
    velocity: Option<(usize, usize)>,
) {
    let Some((iu, iv)) = velocity else {
        return;
    };
    let u = state.q(iu, i, j);
    let v = state.q(iv, i, j);
    let vn = u * n.0 + v * n.1;
    state.set_q(iu, i, j, u - 2.0 * vn * n.0);
    state.set_q(iv, i, j, v - 2.0 * vn * n.1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::IdentityMapping;
    use crate::types::Bounds2D;

    const TOL: f64 = 1e-14;

    /// 4x3 interior, 2 ghost cells, q = single field numbered by column.
    fn setup() -> (Grid2D, State2D) {
        let grid = Grid2D::new(Bounds2D::unit_square(), 4, 3, 2);
        let mut state = State2D::new(&grid, 1);
        for (i, j) in grid.interior_cells() {
            state.set_q(0, i, j, (10 * i + j) as f64);
        }
        (grid, state)
    }

    #[test]
    fn test_extrapolation_copies_edge_cell() {
        let (grid, mut state) = setup();
        fill_ghost_cells(
            &mut state,
            &grid,
            &SideBoundaries::uniform(BoundaryCondition::Extrapolation),
            None,
        );
        // West ghosts copy column i=2.
        assert_eq!(state.q(0, 0, 3), state.q(0, 2, 3));
        assert_eq!(state.q(0, 1, 3), state.q(0, 2, 3));
        // East ghosts copy column i=5.
        assert_eq!(state.q(0, 7, 3), state.q(0, 5, 3));
        // North ghosts copy row j=4.
        assert_eq!(state.q(0, 3, 6), state.q(0, 3, 4));
    }

    #[test]
    fn test_periodic_wraps() {
        let (grid, mut state) = setup();
        fill_ghost_cells(
            &mut state,
            &grid,
            &SideBoundaries::uniform(BoundaryCondition::Periodic),
            None,
        );
        // West ghost column 1 mirrors interior column 1 + mx = 5.
        assert_eq!(state.q(0, 1, 3), state.q(0, 5, 3));
        // East ghost column 6 mirrors interior column 2.
        assert_eq!(state.q(0, 6, 3), state.q(0, 2, 3));
        // South ghost row 1 mirrors interior row 4.
        assert_eq!(state.q(0, 3, 1), state.q(0, 3, 4));
        // Corner ghost (1, 1) ends up equal to interior (5, 4).
        assert_eq!(state.q(0, 1, 1), state.q(0, 5, 4));
    }

    #[test]
    fn test_wall_reflects_normal_velocity() {
        let grid = Grid2D::new(Bounds2D::unit_square(), 4, 3, 2);
        let mut state = State2D::new(&grid, 3);
        for (i, j) in grid.interior_cells() {
            state.set_q(0, i, j, 5.0);
            state.set_q(1, i, j, 1.0);
            state.set_q(2, i, j, 2.0);
        }

        fill_ghost_cells(
            &mut state,
            &grid,
            &SideBoundaries::new(
                BoundaryCondition::Wall,
                BoundaryCondition::Extrapolation,
                BoundaryCondition::Extrapolation,
                BoundaryCondition::Extrapolation,
            ),
            Some((1, 2)),
        );

        // At the west wall, u flips and v is preserved.
        assert!((state.q(0, 1, 3) - 5.0).abs() < TOL);
        assert!((state.q(1, 1, 3) + 1.0).abs() < TOL);
        assert!((state.q(2, 1, 3) - 2.0).abs() < TOL);
    }

    #[test]
    fn test_mapped_wall_uses_stored_normal() {
        // Identity geometry but with the west-face normals overwritten to
        // point along (0, 1): the "wall" then reflects v instead of u.
        let grid = Grid2D::new(Bounds2D::unit_square(), 4, 3, 2);
        let mut state = State2D::with_geometry(&grid, &IdentityMapping, 3).unwrap();
        for j in 0..state.total_my() {
            state.set_aux(AUX_XFACE_NX, 2, j, 0.0);
            state.set_aux(AUX_XFACE_NY, 2, j, 1.0);
        }
        for (i, j) in grid.interior_cells() {
            state.set_q(1, i, j, 1.0);
            state.set_q(2, i, j, 2.0);
        }

        fill_ghost_cells(
            &mut state,
            &grid,
            &SideBoundaries::new(
                BoundaryCondition::Wall,
                BoundaryCondition::Extrapolation,
                BoundaryCondition::Extrapolation,
                BoundaryCondition::Extrapolation,
            ),
            Some((1, 2)),
        );

        assert!((state.q(1, 1, 3) - 1.0).abs() < TOL);
        assert!((state.q(2, 1, 3) + 2.0).abs() < TOL);
    }
}
