//! Frame output.

mod ascii;

pub use ascii::{Frame, OutputError, frame_file_name, read_frame, write_frame};
