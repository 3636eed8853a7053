//! Per-face geometric factors for mapped grids.
//!
//! For every cell (ghosts included) the metrics store, computed from the
//! mapped cell corners:
//!
//! - the unit outward normal of the LEFT face (the face shared with cell
//!   `i-1`), oriented in the +x sweep direction;
//! - the unit outward normal of the BOTTOM face (shared with cell `j-1`),
//!   oriented in the +y sweep direction;
//! - the length ratio of each of those faces: physical edge length divided
//!   by reference edge length;
//! - the cell capacity: physical cell area divided by reference cell area.
//!
//! The mapped Riemann solvers rotate velocities with the normals and scale
//! wave speeds with the length ratios; the finite-volume update divides
//! each cell's net fluctuation by its capacity so conservation holds on
//! the physical cells.

use thiserror::Error;

use super::{Grid2D, GridMapping};

/// Errors raised while computing mapped-grid geometry.
#[derive(Debug, Error)]
pub enum GeometryError {
    /// The mapping folded a cell over (non-positive signed area).
    #[error("mapping produced non-positive cell area {area:.3e} at cell ({i}, {j})")]
    NonPositiveArea { i: usize, j: usize, area: f64 },

    /// The mapping collapsed a face to zero length.
    #[error("mapping produced a degenerate face at cell ({i}, {j})")]
    DegenerateFace { i: usize, j: usize },
}

/// Geometric factors of a mapped grid, one entry per cell.
#[derive(Clone, Debug)]
pub struct MappedMetrics {
    total_mx: usize,
    total_my: usize,
    xface_normal: Vec<(f64, f64)>,
    xface_ratio: Vec<f64>,
    yface_normal: Vec<(f64, f64)>,
    yface_ratio: Vec<f64>,
    capacity: Vec<f64>,
}

impl MappedMetrics {
    /// Compute metrics for every cell of `grid` under `mapping`.
    ///
    /// Fails if the mapping reverses orientation anywhere on the grid
    /// (including the ghost ring) or collapses a face.
    pub fn compute(grid: &Grid2D, mapping: &dyn GridMapping) -> Result<Self, GeometryError> {
        let total_mx = grid.total_mx();
        let total_my = grid.total_my();
        let n = total_mx * total_my;

        let mut xface_normal = vec![(0.0, 0.0); n];
        let mut xface_ratio = vec![0.0; n];
        let mut yface_normal = vec![(0.0, 0.0); n];
        let mut yface_ratio = vec![0.0; n];
        let mut capacity = vec![0.0; n];

        let ref_area = grid.dx * grid.dy;

        for j in 0..total_my {
            for i in 0..total_mx {
                let p00 = mapping.map(grid.xi_node(i), grid.eta_node(j));
                let p10 = mapping.map(grid.xi_node(i + 1), grid.eta_node(j));
                let p01 = mapping.map(grid.xi_node(i), grid.eta_node(j + 1));
                let p11 = mapping.map(grid.xi_node(i + 1), grid.eta_node(j + 1));

                let idx = grid.cell_index(i, j);

                // Left face runs from p00 to p01; its outward normal points
                // in the +x sweep direction.
                let (ex, ey) = (p01.0 - p00.0, p01.1 - p00.1);
                let len = ex.hypot(ey);
                if !(len > 0.0) {
                    return Err(GeometryError::DegenerateFace { i, j });
                }
                xface_normal[idx] = (ey / len, -ex / len);
                xface_ratio[idx] = len / grid.dy;

                // Bottom face runs from p00 to p10; outward normal points
                // in the +y sweep direction.
                let (ex, ey) = (p10.0 - p00.0, p10.1 - p00.1);
                let len = ex.hypot(ey);
                if !(len > 0.0) {
                    return Err(GeometryError::DegenerateFace { i, j });
                }
                yface_normal[idx] = (-ey / len, ex / len);
                yface_ratio[idx] = len / grid.dx;

                // Signed area of the quad p00 -> p10 -> p11 -> p01.
                let area = 0.5
                    * ((p00.0 * p10.1 - p10.0 * p00.1)
                        + (p10.0 * p11.1 - p11.0 * p10.1)
                        + (p11.0 * p01.1 - p01.0 * p11.1)
                        + (p01.0 * p00.1 - p00.0 * p01.1));
                if !(area > 0.0) {
                    return Err(GeometryError::NonPositiveArea { i, j, area });
                }
                capacity[idx] = area / ref_area;
            }
        }

        Ok(Self {
            total_mx,
            total_my,
            xface_normal,
            xface_ratio,
            yface_normal,
            yface_ratio,
            capacity,
        })
    }

    /// Unit outward normal of the left face of cell `(i, j)`.
    #[inline]
    pub fn xface_normal(&self, i: usize, j: usize) -> (f64, f64) {
        self.xface_normal[self.idx(i, j)]
    }

    /// Length ratio of the left face of cell `(i, j)`.
    #[inline]
    pub fn xface_ratio(&self, i: usize, j: usize) -> f64 {
        self.xface_ratio[self.idx(i, j)]
    }

    /// Unit outward normal of the bottom face of cell `(i, j)`.
    #[inline]
    pub fn yface_normal(&self, i: usize, j: usize) -> (f64, f64) {
        self.yface_normal[self.idx(i, j)]
    }

    /// Length ratio of the bottom face of cell `(i, j)`.
    #[inline]
    pub fn yface_ratio(&self, i: usize, j: usize) -> f64 {
        self.yface_ratio[self.idx(i, j)]
    }

    /// Capacity (area ratio) of cell `(i, j)`. Always positive.
    #[inline]
    pub fn capacity(&self, i: usize, j: usize) -> f64 {
        self.capacity[self.idx(i, j)]
    }

    #[inline]
    fn idx(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.total_mx && j < self.total_my);
        j * self.total_mx + i
    }
}
