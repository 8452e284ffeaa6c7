use ndarray::Array1;
use serde::Serialize;
use crate::analysis::interpolate::check_period;
use crate::analysis::{ChannelTable, SeriesError};
/// Global first-order fit `y = c0 + c1 * t` over a whole channel.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LinearFit {
    /// Intercept.
    pub c0: f64,
    /// Slope.
    pub c1: f64,
}
impl LinearFit {
    pub fn evaluate(&self, t: f64) -> f64 {
        self.c0 + self.c1 * t
    }
    /// Sum of squared vertical residuals against samples taken every `time_period`.
    pub fn residual_sum_of_squares(&self, values: &[f64], time_period: f64) -> f64 {
        values
            .iter()
            .enumerate()
            .map(|(i, &y)| {
                let r = y - self.evaluate(i as f64 * time_period);
                r * r
            })
            .sum()
    }
}
/// Ordinary least squares for every channel, in channel order.
pub fn fit(table: &ChannelTable, time_period: f64) -> Result<Vec<LinearFit>, SeriesError> {
    check_period(time_period)?;
    table.require_samples(1)?;
    table
        .iter()
        .enumerate()
        .map(|(channel, values)| fit_channel(channel, values, time_period))
        .collect()
}
/// Closed-form normal equations with `t_i = i * time_period`.
///
/// With `alpha = sum(t)`, `beta = sum(t^2)`, `c = sum(y)`, `d = sum(y * t)` and
/// `k` samples, `c1 = (k d - c alpha) / (k beta - alpha^2)` and
/// `c0 = c / k - (alpha / k) c1`. The sums are taken over the sample index and
/// the period divided out of the slope afterwards, which gives the same line
/// without `beta` overflowing for long periods. `channel` only labels a
/// [`SeriesError::SingularFit`].
pub fn fit_channel(
    channel: usize,
    values: &[f64],
    time_period: f64,
) -> Result<LinearFit, SeriesError> {
    check_period(time_period)?;
    if values.is_empty() {
        return Err(SeriesError::TooFewSamples {
            required: 1,
            found: 0,
        });
    }
    let k = values.len() as f64;
    let i = Array1::from_iter((0..values.len()).map(|i| i as f64));
    let y = Array1::from_vec(values.to_vec());
    let alpha = i.sum();
    let beta = i.dot(&i);
    let c = y.sum();
    let d = y.dot(&i);
    let denom = k * beta - alpha * alpha;
    if !denom.is_finite() || denom.abs() <= f64::EPSILON * (k * beta).abs() {
        return Err(SeriesError::SingularFit { channel });
    }
    let slope_per_sample = (k * d - c * alpha) / denom;
    let c0 = c / k - (alpha / k) * slope_per_sample;
    Ok(LinearFit {
        c0,
        c1: slope_per_sample / time_period,
    })
}
