//! Acoustics Riemann solvers, Cartesian and mapped.

use crate::equations::{Acoustics2D, HyperbolicSystem};

use super::{RiemannSolution, RiemannSolver2D, SweepDirection};

/// Shared two-wave acoustics kernel.
///
/// Works in the frame of the face normal `(α, β)`:
///
/// 1. project each side's velocity onto the normal,
/// 2. form the jumps in pressure and normal velocity,
/// 3. split them into two wave strengths using the per-side impedances,
/// 4. rebuild the waves in x/y components via `(α, β)`,
/// 5. scale both speeds by the face length ratio.
///
/// With the axis normal and ratio 1 this is exactly the unmapped 1-D
/// solver, which is what the Cartesian wrapper passes.
#[inline]
fn acoustics_face_solve(
    q_l: &[f64],
    q_r: &[f64],
    normal: (f64, f64),
    ratio: f64,
    z_l: f64,
    z_r: f64,
    c_l: f64,
    c_r: f64,
) -> RiemannSolution {
    let (alpha, beta) = normal;

    let un_l = alpha * q_l[1] + beta * q_l[2];
    let un_r = alpha * q_r[1] + beta * q_r[2];

    let dp = q_r[0] - q_l[0];
    let dun = un_r - un_l;

    let denom = z_l + z_r;
    let a1 = (-dp + z_r * dun) / denom;
    let a2 = (dp + z_l * dun) / denom;

    let mut sol = RiemannSolution::new(3);
    sol.add_wave(&[-a1 * z_l, a1 * alpha, a1 * beta], -c_l * ratio);
    sol.add_wave(&[a2 * z_r, a2 * alpha, a2 * beta], c_r * ratio);
    sol
}

// =============================================================================
// Cartesian solver
// =============================================================================

/// Two-wave acoustics solver on an unmapped grid.
#[derive(Clone, Copy, Debug)]
pub struct AcousticsRiemann {
    equation: Acoustics2D,
    z: f64,
    c: f64,
}

impl AcousticsRiemann {
    /// Build from an acoustics equation, caching impedance and speed.
    pub fn new(equation: Acoustics2D) -> Self {
        Self {
            equation,
            z: equation.impedance(),
            c: equation.sound_speed(),
        }
    }
}

impl RiemannSolver2D for AcousticsRiemann {
    fn solve(
        &self,
        dir: SweepDirection,
        q_l: &[f64],
        q_r: &[f64],
        _aux_l: &[f64],
        _aux_r: &[f64],
    ) -> RiemannSolution {
        acoustics_face_solve(q_l, q_r, dir.axis_normal(), 1.0, self.z, self.z, self.c, self.c)
    }

    fn num_eqn(&self) -> usize {
        3
    }

    fn num_waves(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "acoustics"
    }

    fn velocity_components(&self) -> Option<(usize, usize)> {
        self.equation.velocity_components()
    }
}

// =============================================================================
// Mapped solver
// =============================================================================

/// Two-wave acoustics solver on a mapped grid.
///
/// Reads the face unit normal and length ratio from the right cell's aux
/// slots, rotates the velocity components into the face frame, solves the
/// same 1-D problem as [`AcousticsRiemann`], and rotates the result back.
#[derive(Clone, Copy, Debug)]
pub struct MappedAcousticsRiemann {
    equation: Acoustics2D,
    z: f64,
    c: f64,
}

impl MappedAcousticsRiemann {
    /// Build from an acoustics equation, caching impedance and speed.
    pub fn new(equation: Acoustics2D) -> Self {
        Self {
            equation,
            z: equation.impedance(),
            c: equation.sound_speed(),
        }
    }
}

impl RiemannSolver2D for MappedAcousticsRiemann {
    fn solve(
        &self,
        dir: SweepDirection,
        q_l: &[f64],
        q_r: &[f64],
        _aux_l: &[f64],
        aux_r: &[f64],
    ) -> RiemannSolution {
        let normal = dir.face_normal(aux_r);
        let ratio = dir.face_ratio(aux_r);
        acoustics_face_solve(q_l, q_r, normal, ratio, self.z, self.z, self.c, self.c)
    }

    fn num_eqn(&self) -> usize {
        3
    }

    fn num_waves(&self) -> usize {
        2
    }

    fn name(&self) -> &'static str {
        "mapped_acoustics"
    }

    fn uses_mapped_geometry(&self) -> bool {
        true
    }

    fn velocity_components(&self) -> Option<(usize, usize)> {
        self.equation.velocity_components()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::NUM_GEOMETRY_AUX;

    const TOL: f64 = 1e-14;

    fn equation() -> Acoustics2D {
        Acoustics2D::new(1.0, 4.0).unwrap() // c = 2, Z = 2
    }

    /// Aux slice describing a face rotated by `theta` with length `ratio`.
    fn rotated_aux(theta: f64, ratio: f64) -> [f64; NUM_GEOMETRY_AUX] {
        let (s, c) = theta.sin_cos();
        // x-face normal (c, s); y-face normal (-s, c); capacity 1.
        [c, s, ratio, -s, c, ratio, 1.0]
    }

    #[test]
    fn test_pressure_jump_splits_symmetrically() {
        let rs = AcousticsRiemann::new(equation());
        let q_l = [1.0, 0.0, 0.0];
        let q_r = [3.0, 0.0, 0.0];

        let sol = rs.solve(SweepDirection::X, &q_l, &q_r, &[], &[]);
        assert_eq!(sol.num_waves(), 2);
        assert!((sol.speed(0) + 2.0).abs() < TOL);
        assert!((sol.speed(1) - 2.0).abs() < TOL);
        // Pure pressure jump: equal strengths, opposite normal velocities.
        assert!((sol.wave(0)[0] - 1.0).abs() < TOL);
        assert!((sol.wave(1)[0] - 1.0).abs() < TOL);
        assert!((sol.wave(0)[1] + sol.wave(1)[1]).abs() > 0.0);
    }

    #[test]
    fn test_waves_sum_to_propagating_jump() {
        let rs = AcousticsRiemann::new(equation());
        let q_l = [1.0, 0.3, -0.2];
        let q_r = [2.5, -0.1, 0.4];

        let sol = rs.solve(SweepDirection::X, &q_l, &q_r, &[], &[]);

        // The two waves carry the full pressure jump and the normal
        // component of the velocity jump; the tangential jump is a
        // stationary feature acoustics does not propagate.
        let dp = q_r[0] - q_l[0];
        let dun = q_r[1] - q_l[1];
        let sum: Vec<f64> = (0..3).map(|m| sol.wave(0)[m] + sol.wave(1)[m]).collect();
        assert!((sum[0] - dp).abs() < TOL);
        assert!((sum[1] - dun).abs() < TOL);
        assert!(sum[2].abs() < TOL);
    }

    #[test]
    fn test_fluctuations_sum_to_flux_jump() {
        // For linear acoustics amdq + apdq = A Δq with A the normal flux
        // Jacobian: rows (K du_n, dp/ρ · α, dp/ρ · β).
        let eq = equation();
        let rs = AcousticsRiemann::new(eq);
        let q_l = [1.0, 0.3, -0.2];
        let q_r = [2.5, -0.1, 0.4];

        let sol = rs.solve(SweepDirection::X, &q_l, &q_r, &[], &[]);

        let dp = q_r[0] - q_l[0];
        let dun = q_r[1] - q_l[1];
        let expected = [eq.bulk * dun, dp / eq.rho, 0.0];
        for m in 0..3 {
            let total = sol.amdq()[m] + sol.apdq()[m];
            assert!(
                (total - expected[m]).abs() < TOL,
                "component {m}: {total} vs {expected:?}"
            );
        }
    }

    #[test]
    fn test_mapped_identity_matches_cartesian() {
        let cart = AcousticsRiemann::new(equation());
        let mapped = MappedAcousticsRiemann::new(equation());
        let aux = rotated_aux(0.0, 1.0);

        let q_l = [1.0, 0.3, -0.2];
        let q_r = [2.5, -0.1, 0.4];

        for dir in [SweepDirection::X, SweepDirection::Y] {
            let a = cart.solve(dir, &q_l, &q_r, &[], &[]);
            let b = mapped.solve(dir, &q_l, &q_r, &aux, &aux);
            for p in 0..2 {
                assert_eq!(a.speed(p), b.speed(p));
                assert_eq!(a.wave(p), b.wave(p));
            }
            assert_eq!(a.amdq(), b.amdq());
            assert_eq!(a.apdq(), b.apdq());
        }
    }

    #[test]
    fn test_mapped_speeds_scale_with_ratio() {
        let mapped = MappedAcousticsRiemann::new(equation());
        let q_l = [1.0, 0.0, 0.0];
        let q_r = [2.0, 0.0, 0.0];

        let sol_unit = mapped.solve(SweepDirection::X, &q_l, &q_r, &[], &rotated_aux(0.0, 1.0));
        let sol_half = mapped.solve(SweepDirection::X, &q_l, &q_r, &[], &rotated_aux(0.0, 0.5));

        for p in 0..2 {
            assert!((sol_half.speed(p) - 0.5 * sol_unit.speed(p)).abs() < TOL);
            // Wave strengths are unaffected by the ratio.
            assert_eq!(sol_half.wave(p), sol_unit.wave(p));
        }
    }

    #[test]
    fn test_rotation_invariance() {
        // Rotating both the states' velocity vectors and the face normal
        // by the same angle must leave wave strengths and speeds alone.
        let mapped = MappedAcousticsRiemann::new(equation());
        let theta = 0.7_f64;
        let (s, c) = theta.sin_cos();

        let q_l = [1.0, 0.3, -0.2];
        let q_r = [2.5, -0.1, 0.4];
        let rot = |q: &[f64; 3]| [q[0], c * q[1] - s * q[2], s * q[1] + c * q[2]];
        let q_l_rot = rot(&q_l);
        let q_r_rot = rot(&q_r);

        let base = mapped.solve(SweepDirection::X, &q_l, &q_r, &[], &rotated_aux(0.0, 1.0));
        let turned = mapped.solve(
            SweepDirection::X,
            &q_l_rot,
            &q_r_rot,
            &[],
            &rotated_aux(theta, 1.0),
        );

        for p in 0..2 {
            assert!((base.speed(p) - turned.speed(p)).abs() < TOL);
            // Pressure components agree; velocity components are the
            // rotations of the unrotated waves.
            assert!((base.wave(p)[0] - turned.wave(p)[0]).abs() < TOL);
            let w = [base.wave(p)[0], base.wave(p)[1], base.wave(p)[2]];
            let w_rot = rot(&w);
            assert!((turned.wave(p)[1] - w_rot[1]).abs() < TOL);
            assert!((turned.wave(p)[2] - w_rot[2]).abs() < TOL);
        }
    }
}
