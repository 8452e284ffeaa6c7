use serde::Serialize;
use crate::analysis::window::adjacent_pairs;
use crate::analysis::{ChannelTable, SeriesError};
/// One linear piece `y = slope * t + intercept` between two adjacent samples.
///
/// `t` is absolute time from the first sample, so segment `index` spans
/// `[index * period, (index + 1) * period]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SegmentDescriptor {
    pub slope: f64,
    pub intercept: f64,
    pub index: usize,
}
impl SegmentDescriptor {
    pub fn evaluate(&self, t: f64) -> f64 {
        self.slope * t + self.intercept
    }
}
/// Piecewise-linear segments for every channel, in channel order.
pub fn interpolate(
    table: &ChannelTable,
    time_period: f64,
) -> Result<Vec<Vec<SegmentDescriptor>>, SeriesError> {
    check_period(time_period)?;
    table.validate_for_segments()?;
    table
        .iter()
        .map(|channel| interpolate_channel(channel, time_period))
        .collect()
}
pub fn interpolate_channel(
    values: &[f64],
    time_period: f64,
) -> Result<Vec<SegmentDescriptor>, SeriesError> {
    check_period(time_period)?;
    let slopes = adjacent_pairs(values, |y0, y1| (y1 - y0) / time_period)?;
    Ok(slopes
        .into_iter()
        .zip(values)
        .enumerate()
        .map(|(index, (slope, &y0))| SegmentDescriptor {
            slope,
            intercept: y0 - slope * time_period * index as f64,
            index,
        })
        .collect())
}
pub(crate) fn check_period(time_period: f64) -> Result<(), SeriesError> {
    if !(time_period.is_finite() && time_period > 0.0) {
        return Err(SeriesError::InvalidParameter(
            "time period must be a positive, finite number",
        ));
    }
    Ok(())
}
