use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}, column {column}: '{token}' is not a number")]
    Parse {
        line: usize,
        column: usize,
        token: String,
    },
    #[error("line {line}: expected {expected} columns, found {found}")]
    MissingColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("line {line}: expected {expected} columns, found {found}")]
    ExtraColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("window size {window} is invalid for a sequence of length {len}")]
    InvalidWindow { window: usize, len: usize },
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
    #[error("least-squares system for channel {channel} is singular")]
    SingularFit { channel: usize },
    #[error("channel count mismatch: expected {expected}, got {actual}")]
    ChannelMismatch { expected: usize, actual: usize },
    #[error("channel {channel} has {actual} samples, expected {expected}")]
    LengthMismatch {
        channel: usize,
        expected: usize,
        actual: usize,
    },
    #[error("need at least {required} samples per channel, found {found}")]
    TooFewSamples { required: usize, found: usize },
}
impl SeriesError {
    /// True for every failure raised while turning text into samples.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            SeriesError::Parse { .. }
                | SeriesError::MissingColumns { .. }
                | SeriesError::ExtraColumns { .. }
        )
    }
}
