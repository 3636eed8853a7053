//! End-to-end controller runs: frame production on disk and in memory.

use std::fs;
use std::path::PathBuf;

use fvwave::io::{frame_file_name, read_frame};
use fvwave::{
    Acoustics2D, AnnulusMapping, BoundaryCondition, Controller, Grid2D, MappedAcousticsRiemann,
    SideBoundaries, Solution, Solver2D, State2D,
};
use fvwave::types::Bounds2D;
use std::f64::consts::TAU;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("fvwave_ctrl_{}_{}", tag, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

fn annulus_controller() -> Controller {
    let grid = Grid2D::new(Bounds2D::new(1.0, 2.0, 0.0, TAU), 10, 40, 2);
    let mut state = State2D::with_geometry(&grid, &AnnulusMapping, 3).unwrap();
    state.set_param("rho", 1.0);
    state.set_param("bulk", 2.0);
    let eq = Acoustics2D::from_state(&state).unwrap();
    state.fill_q(&grid, &AnnulusMapping, 0, |x, y| {
        let r2 = (x - 1.5).powi(2) + y.powi(2);
        (-40.0 * r2).exp()
    });

    let solver = Solver2D::new(Box::new(MappedAcousticsRiemann::new(eq)))
        .with_boundary_conditions(SideBoundaries::new(
            BoundaryCondition::Wall,
            BoundaryCondition::Wall,
            BoundaryCondition::Periodic,
            BoundaryCondition::Periodic,
        ));

    Controller::new(solver, Solution::new(state, grid))
}

#[test]
fn run_writes_all_frames_with_increasing_times() {
    let dir = temp_dir("frames");
    let mut ctrl = annulus_controller()
        .with_outdir(&dir)
        .with_num_output_times(5)
        .with_tfinal(0.25);

    let summary = ctrl.run().unwrap();
    assert_eq!(summary.frames, 6);
    assert!(summary.steps > 0);
    assert!(summary.cfl_max <= 1.0 + 1e-12);
    assert!((summary.final_time - 0.25).abs() < 1e-10);

    let mut last_time = f64::NEG_INFINITY;
    for index in 0..6 {
        let frame = read_frame(&dir.join(frame_file_name(index))).unwrap();
        assert_eq!((frame.mx, frame.my, frame.num_eqn), (10, 40, 3));
        assert!(frame.time > last_time, "frame {index} time not increasing");
        last_time = frame.time;
    }
    assert!((last_time - 0.25).abs() < 1e-10);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn frame_zero_is_the_initial_state() {
    let dir = temp_dir("frame0");
    let mut ctrl = annulus_controller()
        .with_outdir(&dir)
        .with_num_output_times(1)
        .with_tfinal(0.05);

    // Capture the initial interior values before the run mutates them.
    let initial: Vec<f64> = {
        let sol = ctrl.solution();
        sol.grid
            .interior_cells()
            .map(|(i, j)| sol.state.q(0, i, j))
            .collect()
    };

    ctrl.run().unwrap();

    let frame = read_frame(&dir.join(frame_file_name(0))).unwrap();
    assert_eq!(frame.time, 0.0);
    let mut k = 0;
    for j in 0..frame.my {
        for i in 0..frame.mx {
            assert_eq!(frame.q(0, i, j), initial[k], "cell ({i}, {j})");
            k += 1;
        }
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn kept_frames_match_written_frames() {
    let dir = temp_dir("keep");
    let mut ctrl = annulus_controller()
        .with_outdir(&dir)
        .keep_copy(true)
        .with_num_output_times(3)
        .with_tfinal(0.12);

    ctrl.run().unwrap();
    assert_eq!(ctrl.frames().len(), 4);

    for (index, kept) in ctrl.frames().iter().enumerate() {
        let written = read_frame(&dir.join(frame_file_name(index))).unwrap();
        assert_eq!(written.time, kept.t);
        let g = kept.grid.num_ghost;
        for j in 0..written.my {
            for i in 0..written.mx {
                assert_eq!(written.q(0, i, j), kept.state.q(0, i + g, j + g));
            }
        }
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn memory_only_run_needs_no_directory() {
    let mut ctrl = annulus_controller()
        .keep_copy(true)
        .with_num_output_times(2)
        .with_tfinal(0.1);

    let summary = ctrl.run().unwrap();
    assert_eq!(summary.frames, 3);
    assert_eq!(ctrl.frames().len(), 3);
    assert!(summary.wall_time >= 0.0);
}
