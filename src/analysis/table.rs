use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use log::debug;
use crate::analysis::SeriesError;
use crate::types::Dims;
/// Fixed-arity set of equally long channels, stored channel-major.
#[derive(Clone, Debug, PartialEq)]
pub struct ChannelTable {
    per_channel: Vec<Vec<f64>>, // channel -> samples
}
impl ChannelTable {
    pub fn new(channel_count: usize) -> Result<Self, SeriesError> {
        if channel_count == 0 {
            return Err(SeriesError::InvalidParameter(
                "channel count must be at least one",
            ));
        }
        Ok(Self {
            per_channel: vec![Vec::new(); channel_count],
        })
    }
    /// Builds a table from already separated channels, checking the equal-length invariant.
    pub fn from_channels(channels: Vec<Vec<f64>>) -> Result<Self, SeriesError> {
        if channels.is_empty() {
            return Err(SeriesError::InvalidParameter(
                "channel count must be at least one",
            ));
        }
        let expected = channels[0].len();
        if let Some((channel, samples)) = channels
            .iter()
            .enumerate()
            .find(|(_, samples)| samples.len() != expected)
        {
            return Err(SeriesError::LengthMismatch {
                channel,
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            per_channel: channels,
        })
    }
    /// Parses a whitespace-delimited sample file with one row per line.
    ///
    /// The handle is closed when the reader drops, on success and on error alike.
    pub fn from_file(path: impl AsRef<Path>, channel_count: usize) -> Result<Self, SeriesError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| SeriesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::parse(BufReader::new(file), channel_count, path)?;
        debug!("parsed {} as {}", path.display(), table.dimensions());
        Ok(table)
    }
    pub fn from_reader<R: BufRead>(reader: R, channel_count: usize) -> Result<Self, SeriesError> {
        Self::parse(reader, channel_count, Path::new("<reader>"))
    }
    fn parse<R: BufRead>(
        mut reader: R,
        channel_count: usize,
        origin: &Path,
    ) -> Result<Self, SeriesError> {
        let mut table = Self::new(channel_count)?;
        let mut row = Vec::with_capacity(channel_count);
        let mut buf = Vec::new();
        let mut line_no = 0;
        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| SeriesError::Io {
                    path: origin.to_path_buf(),
                    source,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;
            // Tokens are split on ASCII whitespace before decoding, so bytes that
            // are not UTF-8 surface as a bad token on this line.
            let tokens: Vec<&[u8]> = buf
                .split(u8::is_ascii_whitespace)
                .filter(|token| !token.is_empty())
                .collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() > channel_count {
                return Err(SeriesError::ExtraColumns {
                    line: line_no,
                    expected: channel_count,
                    found: tokens.len(),
                });
            }
            row.clear();
            for (column, token) in tokens.iter().enumerate() {
                let value = parse_sample(token).ok_or_else(|| SeriesError::Parse {
                    line: line_no,
                    column: column + 1,
                    token: String::from_utf8_lossy(token).into_owned(),
                })?;
                row.push(value);
            }
            if row.len() < channel_count {
                return Err(SeriesError::MissingColumns {
                    line: line_no,
                    expected: channel_count,
                    found: row.len(),
                });
            }
            table.push_row(&row)?;
        }
        Ok(table)
    }
    /// Appends one sample to every channel, in column order.
    pub fn push_row(&mut self, row: &[f64]) -> Result<(), SeriesError> {
        if row.len() != self.per_channel.len() {
            return Err(SeriesError::ChannelMismatch {
                expected: self.per_channel.len(),
                actual: row.len(),
            });
        }
        for (channel, &sample) in self.per_channel.iter_mut().zip(row) {
            channel.push(sample);
        }
        Ok(())
    }
    /// Samples of channel `index`. Panics when `index >= channel_count()`.
    pub fn channel(&self, index: usize) -> &[f64] {
        &self.per_channel[index]
    }
    pub fn get(&self, index: usize) -> Option<&[f64]> {
        self.per_channel.get(index).map(Vec::as_slice)
    }
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        self.per_channel.iter().map(Vec::as_slice)
    }
    pub fn channel_count(&self) -> usize {
        self.per_channel.len()
    }
    pub fn len(&self) -> usize {
        self.per_channel.first().map(Vec::len).unwrap_or(0)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn dimensions(&self) -> Dims {
        Dims::new(self.channel_count(), self.len())
    }
    /// Checks that every channel holds at least `required` samples.
    pub fn require_samples(&self, required: usize) -> Result<(), SeriesError> {
        let found = self.len();
        if found < required {
            return Err(SeriesError::TooFewSamples { required, found });
        }
        Ok(())
    }
    /// At least two samples are needed to form one segment.
    pub fn validate_for_segments(&self) -> Result<(), SeriesError> {
        self.require_samples(2)
    }
}
/// Decimal sample; `nan`, `inf` and friends are rejected.
fn parse_sample(token: &[u8]) -> Option<f64> {
    std::str::from_utf8(token)
        .ok()?
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}
