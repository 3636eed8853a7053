//! Field storage over a grid: conserved quantities plus auxiliary data.

use std::collections::HashMap;

use crate::grid::{GeometryError, Grid2D, GridMapping, MappedMetrics};

// =============================================================================
// Auxiliary index convention
// =============================================================================
//
// Geometric metadata lives in fixed aux slots so Riemann solvers and the
// update loop can read it without a schema object. The convention:

/// Aux slot: x-component of the left-face unit normal.
pub const AUX_XFACE_NX: usize = 0;
/// Aux slot: y-component of the left-face unit normal.
pub const AUX_XFACE_NY: usize = 1;
/// Aux slot: left-face length ratio (physical / reference).
pub const AUX_XFACE_RATIO: usize = 2;
/// Aux slot: x-component of the bottom-face unit normal.
pub const AUX_YFACE_NX: usize = 3;
/// Aux slot: y-component of the bottom-face unit normal.
pub const AUX_YFACE_NY: usize = 4;
/// Aux slot: bottom-face length ratio (physical / reference).
pub const AUX_YFACE_RATIO: usize = 5;
/// Aux slot: cell capacity (physical area / reference area).
pub const AUX_CAPACITY: usize = 6;
/// Number of aux components the geometry convention occupies.
pub const NUM_GEOMETRY_AUX: usize = 7;

// =============================================================================
// State
// =============================================================================

/// Conserved fields `q`, auxiliary fields `aux`, and scalar problem
/// parameters over one grid.
///
/// Storage is cell-major: all components of one cell are adjacent, cells
/// ordered row-major with `i` fastest (the same linear ordering as
/// [`Grid2D::cell_index`]). Ghost cells are stored like interior cells.
///
/// `aux` carries spatially varying coefficients and geometric metadata in
/// the fixed slots above; `problem_data` carries scalar PDE coefficients
/// (for acoustics: `"rho"` and `"bulk"`).
#[derive(Clone, Debug)]
pub struct State2D {
    /// Number of conserved components per cell
    pub num_eqn: usize,
    /// Number of auxiliary components per cell
    pub num_aux: usize,
    total_mx: usize,
    total_my: usize,
    q: Vec<f64>,
    aux: Vec<f64>,
    problem_data: HashMap<String, f64>,
}

impl State2D {
    /// Create a zero-initialized state with no auxiliary fields.
    pub fn new(grid: &Grid2D, num_eqn: usize) -> Self {
        Self::with_aux(grid, num_eqn, 0)
    }

    /// Create a zero-initialized state with `num_aux` auxiliary fields.
    pub fn with_aux(grid: &Grid2D, num_eqn: usize, num_aux: usize) -> Self {
        assert!(num_eqn > 0, "state needs at least one conserved field");
        let n = grid.num_cells();
        Self {
            num_eqn,
            num_aux,
            total_mx: grid.total_mx(),
            total_my: grid.total_my(),
            q: vec![0.0; n * num_eqn],
            aux: vec![0.0; n * num_aux],
            problem_data: HashMap::new(),
        }
    }

    /// Create a state whose aux array carries the mapped-grid geometry of
    /// `mapping` in the fixed slots, for every cell including ghosts.
    ///
    /// Ghost geometry comes from evaluating the mapping beyond the
    /// reference bounds, which is valid for the mappings shipped here
    /// (they extend smoothly).
    pub fn with_geometry(
        grid: &Grid2D,
        mapping: &dyn GridMapping,
        num_eqn: usize,
    ) -> Result<Self, GeometryError> {
        let metrics = MappedMetrics::compute(grid, mapping)?;
        let mut state = Self::with_aux(grid, num_eqn, NUM_GEOMETRY_AUX);
        state.load_geometry(&metrics);
        Ok(state)
    }

    /// Copy precomputed metrics into the geometry aux slots.
    pub fn load_geometry(&mut self, metrics: &MappedMetrics) {
        assert!(
            self.num_aux >= NUM_GEOMETRY_AUX,
            "state has {} aux components; geometry needs {}",
            self.num_aux,
            NUM_GEOMETRY_AUX
        );
        for j in 0..self.total_my {
            for i in 0..self.total_mx {
                let (nx, ny) = metrics.xface_normal(i, j);
                self.set_aux(AUX_XFACE_NX, i, j, nx);
                self.set_aux(AUX_XFACE_NY, i, j, ny);
                self.set_aux(AUX_XFACE_RATIO, i, j, metrics.xface_ratio(i, j));
                let (nx, ny) = metrics.yface_normal(i, j);
                self.set_aux(AUX_YFACE_NX, i, j, nx);
                self.set_aux(AUX_YFACE_NY, i, j, ny);
                self.set_aux(AUX_YFACE_RATIO, i, j, metrics.yface_ratio(i, j));
                self.set_aux(AUX_CAPACITY, i, j, metrics.capacity(i, j));
            }
        }
    }

    /// Total cell count in x, ghosts included.
    #[inline]
    pub fn total_mx(&self) -> usize {
        self.total_mx
    }

    /// Total cell count in y, ghosts included.
    #[inline]
    pub fn total_my(&self) -> usize {
        self.total_my
    }

    #[inline]
    fn cell(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.total_mx && j < self.total_my);
        j * self.total_mx + i
    }

    /// Conserved component `m` of cell `(i, j)`.
    #[inline]
    pub fn q(&self, m: usize, i: usize, j: usize) -> f64 {
        self.q[self.cell(i, j) * self.num_eqn + m]
    }

    /// Set conserved component `m` of cell `(i, j)`.
    #[inline]
    pub fn set_q(&mut self, m: usize, i: usize, j: usize, value: f64) {
        let idx = self.cell(i, j) * self.num_eqn + m;
        self.q[idx] = value;
    }

    /// Auxiliary component `a` of cell `(i, j)`.
    #[inline]
    pub fn aux(&self, a: usize, i: usize, j: usize) -> f64 {
        self.aux[self.cell(i, j) * self.num_aux + a]
    }

    /// Set auxiliary component `a` of cell `(i, j)`.
    #[inline]
    pub fn set_aux(&mut self, a: usize, i: usize, j: usize, value: f64) {
        let idx = self.cell(i, j) * self.num_aux + a;
        self.aux[idx] = value;
    }

    /// Capacity of cell `(i, j)`: the geometry slot if present, else 1.
    #[inline]
    pub fn capacity(&self, i: usize, j: usize) -> f64 {
        if self.num_aux > AUX_CAPACITY {
            self.aux(AUX_CAPACITY, i, j)
        } else {
            1.0
        }
    }

    /// Raw conserved storage, cell-major.
    #[inline]
    pub fn q_slice(&self) -> &[f64] {
        &self.q
    }

    /// Mutable raw conserved storage, cell-major.
    #[inline]
    pub fn q_slice_mut(&mut self) -> &mut [f64] {
        &mut self.q
    }

    /// Raw auxiliary storage, cell-major.
    #[inline]
    pub fn aux_slice(&self) -> &[f64] {
        &self.aux
    }

    /// Split borrow for the sweep kernels: mutable `q`, shared `aux`.
    #[inline]
    pub fn q_aux_mut(&mut self) -> (&mut [f64], &[f64]) {
        (&mut self.q, &self.aux)
    }

    /// Fill conserved component `m` of every interior cell from a function
    /// of the *physical* cell-center coordinates.
    pub fn fill_q<F>(&mut self, grid: &Grid2D, mapping: &dyn GridMapping, m: usize, f: F)
    where
        F: Fn(f64, f64) -> f64,
    {
        for (i, j) in grid.interior_cells() {
            let (x, y) = mapping.map(grid.xi_center(i), grid.eta_center(j));
            self.set_q(m, i, j, f(x, y));
        }
    }

    /// Set a scalar problem parameter (PDE coefficient).
    pub fn set_param(&mut self, name: &str, value: f64) {
        self.problem_data.insert(name.to_string(), value);
    }

    /// Look up a scalar problem parameter.
    pub fn param(&self, name: &str) -> Option<f64> {
        self.problem_data.get(name).copied()
    }

    /// Sum of component `m` over interior cells, weighted by capacity.
    ///
    /// On a mapped grid this is the physical-domain integral of `q_m`
    /// divided by the reference cell area, so it is the quantity the
    /// finite-volume update conserves exactly in the absence of boundary
    /// fluxes.
    pub fn capacity_weighted_sum(&self, grid: &Grid2D, m: usize) -> f64 {
        grid.interior_cells()
            .map(|(i, j)| self.capacity(i, j) * self.q(m, i, j))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::IdentityMapping;
    use crate::types::Bounds2D;

    fn grid() -> Grid2D {
        Grid2D::new(Bounds2D::unit_square(), 4, 3, 2)
    }

    #[test]
    fn test_q_round_trip() {
        let g = grid();
        let mut s = State2D::new(&g, 3);
        s.set_q(1, 2, 3, 7.5);
        assert_eq!(s.q(1, 2, 3), 7.5);
        assert_eq!(s.q(0, 2, 3), 0.0);
        assert_eq!(s.q(2, 2, 3), 0.0);
    }

    #[test]
    fn test_geometry_slots() {
        let g = grid();
        let s = State2D::with_geometry(&g, &IdentityMapping, 3).unwrap();
        assert_eq!(s.num_aux, NUM_GEOMETRY_AUX);
        assert_eq!(s.aux(AUX_XFACE_NX, 3, 3), 1.0);
        assert_eq!(s.aux(AUX_XFACE_NY, 3, 3), 0.0);
        assert_eq!(s.aux(AUX_YFACE_NY, 3, 3), 1.0);
        assert_eq!(s.aux(AUX_XFACE_RATIO, 3, 3), 1.0);
        assert_eq!(s.capacity(3, 3), 1.0);
    }

    #[test]
    fn test_capacity_defaults_to_one_without_aux() {
        let g = grid();
        let s = State2D::new(&g, 1);
        assert_eq!(s.capacity(0, 0), 1.0);
    }

    #[test]
    fn test_fill_q_interior_only() {
        let g = grid();
        let mut s = State2D::new(&g, 1);
        s.fill_q(&g, &IdentityMapping, 0, |_, _| 1.0);
        // Interior cells set, ghost cells untouched.
        assert_eq!(s.q(0, 2, 2), 1.0);
        assert_eq!(s.q(0, 0, 0), 0.0);
        let total: f64 = (0..s.total_my())
            .flat_map(|j| (0..s.total_mx()).map(move |i| (i, j)))
            .map(|(i, j)| s.q(0, i, j))
            .sum();
        assert_eq!(total, 12.0);
    }

    #[test]
    fn test_problem_data() {
        let g = grid();
        let mut s = State2D::new(&g, 1);
        s.set_param("rho", 1.2);
        assert_eq!(s.param("rho"), Some(1.2));
        assert_eq!(s.param("bulk"), None);
    }
}
