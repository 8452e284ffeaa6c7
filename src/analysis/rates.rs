//! Finite-difference rate of change per channel.
//!
//! `rate[i] = (y[i + w] - y[i]) / (w * period)` for a window of `w` samples,
//! i.e. the slope of the chord spanning `w` sampling periods.
use crate::analysis::interpolate::check_period;
use crate::analysis::window::pairwise_window;
use crate::analysis::{ChannelTable, SeriesError};
pub fn channel_rates(
    values: &[f64],
    time_period: f64,
    window: usize,
) -> Result<Vec<f64>, SeriesError> {
    check_period(time_period)?;
    let span = window as f64 * time_period;
    pairwise_window(values, window, |y0, y1| (y1 - y0) / span)
}
pub fn rates(
    table: &ChannelTable,
    time_period: f64,
    window: usize,
) -> Result<Vec<Vec<f64>>, SeriesError> {
    table
        .iter()
        .map(|channel| channel_rates(channel, time_period, window))
        .collect()
}
