//! One-dimensional wave-propagation sweep.
//!
//! Both grid directions funnel through the same kernel: the solver hands
//! it one contiguous line of cells (a grid row, or a gathered column), the
//! line's aux data, and the sweep direction, and the kernel applies the
//! first-order fluctuations and the limited second-order corrections in
//! place.
//!
//! Face `i` separates cells `i-1` and `i`. The update for a line of `n`
//! cells with ghost width `g`:
//!
//! ```text
//! q[i-1] -= dt/(κ[i-1] Δref) · A⁻Δq(i)
//! q[i]   -= dt/(κ[i]   Δref) · A⁺Δq(i)
//! q[i]   -= dt/(κ[i]   Δref) · (F̃(i+1) - F̃(i))     (order 2)
//! ```
//!
//! with κ the cell capacity and F̃ the limited correction flux. All face
//! problems are solved against the pre-update line, then applied.

use crate::riemann::{MAX_COMPONENTS, RiemannSolution, RiemannSolver2D, SweepDirection};
use crate::state::{AUX_CAPACITY, NUM_GEOMETRY_AUX};

use super::Limiter;

/// Advance one line of cells by `dt`. Returns the largest CFL number any
/// wave implied on this line.
#[allow(clippy::too_many_arguments)]
pub(crate) fn sweep_line(
    q: &mut [f64],
    aux: &[f64],
    n: usize,
    num_eqn: usize,
    num_aux: usize,
    num_ghost: usize,
    dir: SweepDirection,
    dref: f64,
    dt: f64,
    rs: &dyn RiemannSolver2D,
    limiter: Limiter,
    order: usize,
) -> f64 {
    debug_assert_eq!(q.len(), n * num_eqn);
    debug_assert_eq!(aux.len(), n * num_aux);

    let g = num_ghost;
    debug_assert!(n > 2 * g);

    // Per-cell dt / (capacity * dref).
    let has_capacity = num_aux >= NUM_GEOMETRY_AUX;
    let dtdx: Vec<f64> = (0..n)
        .map(|c| {
            let capa = if has_capacity {
                aux[c * num_aux + AUX_CAPACITY]
            } else {
                1.0
            };
            dt / (capa * dref)
        })
        .collect();

    // Solve every face against the pre-update line. Order 2 needs one
    // extra face on each end for the upwind limiting ratio.
    let (face_lo, face_hi) = if order >= 2 {
        (g - 1, n - g + 1)
    } else {
        (g, n - g)
    };
    let solutions: Vec<RiemannSolution> = (face_lo..=face_hi)
        .map(|i| {
            let q_l = &q[(i - 1) * num_eqn..i * num_eqn];
            let q_r = &q[i * num_eqn..(i + 1) * num_eqn];
            let aux_l = &aux[(i - 1) * num_aux..i * num_aux];
            let aux_r = &aux[i * num_aux..(i + 1) * num_aux];
            rs.solve(dir, q_l, q_r, aux_l, aux_r)
        })
        .collect();
    let sol = |i: usize| &solutions[i - face_lo];

    // CFL over the faces that touch interior cells.
    let mut cfl = 0.0_f64;
    for i in g..=n - g {
        let s = sol(i);
        for p in 0..s.num_waves() {
            let speed = s.speed(p);
            cfl = cfl.max(speed * dtdx[i]).max(-speed * dtdx[i - 1]);
        }
    }

    // First-order fluctuations.
    for i in g..=n - g {
        let s = sol(i);
        for m in 0..num_eqn {
            q[(i - 1) * num_eqn + m] -= dtdx[i - 1] * s.amdq()[m];
            q[i * num_eqn + m] -= dtdx[i] * s.apdq()[m];
        }
    }

    // Limited second-order corrections.
    if order >= 2 {
        let mut fcorr = vec![[0.0_f64; MAX_COMPONENTS]; n - 2 * g + 1];
        for i in g..=n - g {
            let s = sol(i);
            let dtdx_ave = 0.5 * (dtdx[i - 1] + dtdx[i]);
            for p in 0..s.num_waves() {
                let speed = s.speed(p);
                if speed == 0.0 {
                    continue;
                }
                let wave = s.wave(p);
                let dot: f64 = wave.iter().map(|w| w * w).sum();
                if dot == 0.0 {
                    continue;
                }
                let upwind = if speed > 0.0 { sol(i - 1) } else { sol(i + 1) };
                let cross: f64 = upwind
                    .wave(p)
                    .iter()
                    .zip(wave)
                    .map(|(a, b)| a * b)
                    .sum();
                let phi = limiter.phi(cross / dot);
                let factor = 0.5 * speed.abs() * (1.0 - speed.abs() * dtdx_ave) * phi;
                for m in 0..num_eqn {
                    fcorr[i - g][m] += factor * wave[m];
                }
            }
        }
        for c in g..n - g {
            for m in 0..num_eqn {
                q[c * num_eqn + m] -= dtdx[c] * (fcorr[c + 1 - g][m] - fcorr[c - g][m]);
            }
        }
    }

    cfl
}
