use log::{debug, info};
use serde::Serialize;
use crate::analysis::interpolate::{check_period, interpolate, SegmentDescriptor};
use crate::analysis::least_squares::{fit, LinearFit};
use crate::analysis::rates::rates;
use crate::analysis::source::TableSource;
use crate::analysis::SeriesError;
use crate::config::AnalysisConfig;
use crate::types::Dims;
/// Everything derived from one table; plain data for writers to consume.
#[derive(Clone, Debug, Serialize)]
pub struct AnalysisReport {
    pub dims: Dims,
    pub time_period: f64,
    pub segments: Vec<Vec<SegmentDescriptor>>, // channel -> segments
    pub fits: Vec<LinearFit>,                  // channel -> global fit
    pub rate_window: usize,
    pub rates: Vec<Vec<f64>>, // channel -> windowed rates
}
/// Loads a table once and feeds it to every analysis.
pub struct AnalysisPipeline<S: TableSource> {
    source: S,
    time_period: f64,
    rate_window: usize,
}
impl<S: TableSource> AnalysisPipeline<S> {
    pub fn new(source: S, config: &AnalysisConfig) -> Self {
        Self {
            source,
            time_period: config.time_period,
            rate_window: config.rate_window,
        }
    }
    pub fn run(&mut self) -> Result<AnalysisReport, SeriesError> {
        check_period(self.time_period)?;
        if self.rate_window == 0 {
            return Err(SeriesError::InvalidParameter(
                "rate window must be at least one sample",
            ));
        }
        info!("loading {}", self.source.describe());
        let table = self.source.load()?;
        let dims = table.dimensions();
        info!("loaded {dims} (channels x samples)");
        let segments = interpolate(&table, self.time_period)?;
        debug!(
            "interpolated {} segments per channel",
            dims.segments_per_channel()
        );
        let fits = fit(&table, self.time_period)?;
        for (channel, line) in fits.iter().enumerate() {
            debug!("channel {channel}: y = {:.4} + {:.4} t", line.c0, line.c1);
        }
        let rates = rates(&table, self.time_period, self.rate_window)?;
        Ok(AnalysisReport {
            dims,
            time_period: self.time_period,
            segments,
            fits,
            rate_window: self.rate_window,
            rates,
        })
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::source::{FileSource, ManualSource};
    use crate::analysis::ChannelTable;
    use std::io::Write;
    use tempfile::NamedTempFile;
    fn config(time_period: f64) -> AnalysisConfig {
        AnalysisConfig {
            time_period,
            ..AnalysisConfig::default()
        }
    }
    #[test]
    fn pipeline_derives_segments_fits_and_rates() {
        let table = ChannelTable::from_channels(vec![vec![0.0, 30.0, 60.0]]).unwrap();
        let mut pipeline = AnalysisPipeline::new(ManualSource::new(table), &config(30.0));
        let report = pipeline.run().unwrap();
        assert_eq!(report.dims, Dims::new(1, 3));
        assert_eq!(report.segments[0].len(), 2);
        assert!(report.segments[0]
            .iter()
            .all(|s| (s.slope - 1.0).abs() < 1e-12 && s.intercept.abs() < 1e-12));
        assert!((report.fits[0].c1 - 1.0).abs() < 1e-12);
        assert!(report.fits[0].c0.abs() < 1e-12);
        assert_eq!(report.rates, vec![vec![1.0, 1.0]]);
    }
    #[test]
    fn parse_failure_stops_before_any_computation() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1 2 3 4").unwrap();
        writeln!(file, "1 2 x 4").unwrap();
        let mut pipeline = AnalysisPipeline::new(FileSource::new(file.path(), 4), &config(30.0));
        let err = pipeline.run().unwrap_err();
        assert!(err.is_parse());
    }
    #[test]
    fn invalid_period_is_rejected_before_loading() {
        let mut pipeline = AnalysisPipeline::new(
            FileSource::new("does/not/exist.txt", 4),
            &config(0.0),
        );
        assert!(matches!(
            pipeline.run(),
            Err(SeriesError::InvalidParameter(_))
        ));
    }
    #[test]
    fn report_serializes_to_json() {
        let table = ChannelTable::from_channels(vec![vec![1.0, 2.0], vec![2.0, 3.0]]).unwrap();
        let report = AnalysisPipeline::new(ManualSource::new(table), &config(1.0))
            .run()
            .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["dims"]["rows"], 2);
        assert_eq!(json["segments"][1][0]["index"], 0);
        assert_eq!(json["fits"].as_array().unwrap().len(), 2);
    }
}
