//! Solution state: conserved fields, auxiliary geometry, problem data.

mod solution;
mod state2d;

pub use solution::Solution;
pub use state2d::{
    AUX_CAPACITY, AUX_XFACE_NX, AUX_XFACE_NY, AUX_XFACE_RATIO, AUX_YFACE_NX, AUX_YFACE_NY,
    AUX_YFACE_RATIO, NUM_GEOMETRY_AUX, State2D,
};
