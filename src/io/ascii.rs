//! Plain-text frame format.
//!
//! One file per output time, `frame_NNNN.txt`, self-describing:
//!
//! ```text
//! # fvwave frame
//! # time 0.125
//! # mx 20
//! # my 20
//! # num_eqn 3
//! # xlower 0 xupper 1 ylower 0 yupper 1
//! # cells row-major, i fastest; one cell per line, num_eqn columns
//! 1.25e-3 0e0 0e0
//! ...
//! ```
//!
//! Values are written with `{:e}`, which round-trips f64 exactly. Only
//! interior cells are written; ghost values are reconstructed from the
//! boundary conditions on the next run, not persisted.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::state::Solution;

/// Error type for frame output and parsing.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error during file operations.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed header line.
    #[error("malformed frame header: {0}")]
    Header(String),

    /// Malformed data row.
    #[error("malformed frame data at line {line}: {msg}")]
    Data { line: usize, msg: String },
}

/// File name of frame `index`: `frame_0007.txt`.
pub fn frame_file_name(index: usize) -> String {
    format!("frame_{:04}.txt", index)
}

/// Write one solution snapshot as frame `index` under `dir`.
///
/// Creates `dir` if needed and returns the path written.
pub fn write_frame(dir: &Path, index: usize, solution: &Solution) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(frame_file_name(index));
    let file = File::create(&path)?;
    let mut w = BufWriter::new(file);

    let grid = &solution.grid;
    let state = &solution.state;
    let (xl, xu, yl, yu) = grid.bounds.as_tuple();

    writeln!(w, "# fvwave frame")?;
    writeln!(w, "# time {:e}", solution.t)?;
    writeln!(w, "# mx {}", grid.mx)?;
    writeln!(w, "# my {}", grid.my)?;
    writeln!(w, "# num_eqn {}", state.num_eqn)?;
    writeln!(w, "# xlower {:e} xupper {:e} ylower {:e} yupper {:e}", xl, xu, yl, yu)?;
    writeln!(
        w,
        "# cells row-major, i fastest; one cell per line, num_eqn columns"
    )?;

    for (i, j) in grid.interior_cells() {
        for m in 0..state.num_eqn {
            if m > 0 {
                write!(w, " ")?;
            }
            write!(w, "{:e}", state.q(m, i, j))?;
        }
        writeln!(w)?;
    }

    w.flush()?;
    Ok(path)
}

/// A frame read back from disk: interior cells only, no grid object.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Simulation time of the frame
    pub time: f64,
    /// Interior cell count in x
    pub mx: usize,
    /// Interior cell count in y
    pub my: usize,
    /// Conserved components per cell
    pub num_eqn: usize,
    data: Vec<f64>,
}

impl Frame {
    /// Component `m` of interior cell `(i, j)` (0-based, no ghosts).
    pub fn q(&self, m: usize, i: usize, j: usize) -> f64 {
        debug_assert!(i < self.mx && j < self.my && m < self.num_eqn);
        self.data[(j * self.mx + i) * self.num_eqn + m]
    }
}

/// Read a frame file written by [`write_frame`].
pub fn read_frame(path: &Path) -> Result<Frame, OutputError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut time = None;
    let mut mx = None;
    let mut my = None;
    let mut num_eqn = None;
    let mut data = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix('#') {
            let mut words = rest.split_whitespace();
            match words.next() {
                Some("time") => time = Some(parse_header_value(words.next(), "time")?),
                Some("mx") => mx = Some(parse_header_value::<usize>(words.next(), "mx")?),
                Some("my") => my = Some(parse_header_value::<usize>(words.next(), "my")?),
                Some("num_eqn") => {
                    num_eqn = Some(parse_header_value::<usize>(words.next(), "num_eqn")?)
                }
                _ => {} // title, bounds, column description
            }
            continue;
        }
        for word in line.split_whitespace() {
            let value = word.parse::<f64>().map_err(|e| OutputError::Data {
                line: line_no + 1,
                msg: format!("bad value `{}`: {}", word, e),
            })?;
            data.push(value);
        }
    }

    let time = time.ok_or_else(|| OutputError::Header("missing `time`".into()))?;
    let mx = mx.ok_or_else(|| OutputError::Header("missing `mx`".into()))?;
    let my = my.ok_or_else(|| OutputError::Header("missing `my`".into()))?;
    let num_eqn = num_eqn.ok_or_else(|| OutputError::Header("missing `num_eqn`".into()))?;

    let expected = mx * my * num_eqn;
    if data.len() != expected {
        return Err(OutputError::Header(format!(
            "expected {} values for {}x{}x{}, found {}",
            expected,
            mx,
            my,
            num_eqn,
            data.len()
        )));
    }

    Ok(Frame {
        time,
        mx,
        my,
        num_eqn,
        data,
    })
}

fn parse_header_value<T: std::str::FromStr>(
    word: Option<&str>,
    key: &str,
) -> Result<T, OutputError>
where
    T::Err: std::fmt::Display,
{
    let word = word.ok_or_else(|| OutputError::Header(format!("`{}` has no value", key)))?;
    word.parse()
        .map_err(|e| OutputError::Header(format!("bad `{}` value `{}`: {}", key, word, e)))
}
