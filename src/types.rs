// src/types.rs
use std::fmt;

use serde::Serialize;

// Table shape: channels x samples per channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Dims {
    pub rows: usize,
    pub cols: usize,
}

impl Dims {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Number of segments each channel yields once interpolated.
    pub fn segments_per_channel(&self) -> usize {
        self.cols.saturating_sub(1)
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}x{})", self.rows, self.cols)
    }
}
