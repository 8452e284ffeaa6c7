use crate::analysis::SeriesError;
/// Applies `op` to every pair of samples `window` positions apart.
///
/// `output[i] = op(data[i], data[i + window])`, so the result has
/// `data.len() - window` entries. Requires `1 <= window < data.len()`.
pub fn pairwise_window<T, F>(data: &[f64], window: usize, mut op: F) -> Result<Vec<T>, SeriesError>
where
    F: FnMut(f64, f64) -> T,
{
    if window == 0 || window >= data.len() {
        return Err(SeriesError::InvalidWindow {
            window,
            len: data.len(),
        });
    }
    Ok(data
        .iter()
        .zip(&data[window..])
        .map(|(&a, &b)| op(a, b))
        .collect())
}
/// Adjacent-pair form of [`pairwise_window`].
pub fn adjacent_pairs<T, F>(data: &[f64], op: F) -> Result<Vec<T>, SeriesError>
where
    F: FnMut(f64, f64) -> T,
{
    pairwise_window(data, 1, op)
}
