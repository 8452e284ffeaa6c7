use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{info, warn};
use tempfile::NamedTempFile;

use crate::analysis::{AnalysisReport, LinearFit, SegmentDescriptor};

/// `Data/sensors.txt`, 2 -> `Data/sensors-core-2.txt`.
///
/// With `output_dir` set, the file lands there instead of next to the input.
pub fn core_filename(input: &Path, index: usize, output_dir: Option<&Path>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "channels".to_owned());
    let name = match input.extension() {
        Some(ext) => format!("{stem}-core-{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}-core-{index}"),
    };
    let parent = output_dir
        .or_else(|| input.parent())
        .unwrap_or_else(|| Path::new(""));
    parent.join(name)
}

fn format_line(start: f64, end: f64, intercept: f64, slope: f64, kind: &str) -> String {
    format!("{start:>8.0} <= x <= {end:>8.0} ; y = {intercept:>12.4} +{slope:>12.4} x ; {kind}")
}

pub fn format_segment_line(segment: &SegmentDescriptor, time_period: f64) -> String {
    let start = segment.index as f64 * time_period;
    format_line(
        start,
        start + time_period,
        segment.intercept,
        segment.slope,
        "interpolation",
    )
}

/// Global fit line covering `[0, (samples - 1) * time_period]`.
pub fn format_fit_line(fit: &LinearFit, time_period: f64, samples: usize) -> String {
    let end = samples.saturating_sub(1) as f64 * time_period;
    format_line(0.0, end, fit.c0, fit.c1, "least-squares")
}

/// Writes one file per channel, replacing existing ones. Returns the paths written.
///
/// Every channel is staged in a temporary file next to its target first. If any
/// write fails nothing is moved into place, and if a move fails the reports
/// already moved by this call are removed again.
pub fn write_channel_reports(
    report: &AnalysisReport,
    input: &Path,
    output_dir: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
    }
    let mut staged = Vec::with_capacity(report.segments.len());
    for (channel, (segments, fit)) in report.segments.iter().zip(&report.fits).enumerate() {
        let path = core_filename(input, channel, output_dir);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let mut tmp = NamedTempFile::new_in(dir)
            .with_context(|| format!("staging {}", path.display()))?;
        {
            let mut w = BufWriter::new(tmp.as_file_mut());
            for segment in segments {
                writeln!(w, "{}", format_segment_line(segment, report.time_period))
                    .with_context(|| format!("writing {}", path.display()))?;
            }
            writeln!(
                w,
                "{}",
                format_fit_line(fit, report.time_period, report.dims.cols)
            )
            .with_context(|| format!("writing {}", path.display()))?;
            w.flush()
                .with_context(|| format!("flushing {}", path.display()))?;
        }
        staged.push((channel, tmp, path));
    }
    let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
    for (channel, tmp, path) in staged {
        if let Err(err) = tmp.persist(&path) {
            for done in &written {
                if let Err(rm) = fs::remove_file(done) {
                    warn!("could not remove {}: {rm}", done.display());
                }
            }
            return Err(err.error)
                .with_context(|| format!("moving report into {}", path.display()));
        }
        info!("channel {channel}: wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Pretty JSON dump of the full report.
pub fn write_summary(path: &Path, report: &AnalysisReport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, report)
        .with_context(|| format!("serializing summary to {}", path.display()))?;
    writeln!(w).with_context(|| format!("writing {}", path.display()))?;
    w.flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    info!("wrote summary {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{AnalysisPipeline, ChannelTable, ManualSource};
    use crate::config::AnalysisConfig;
    use tempfile::tempdir;

    fn sample_report() -> AnalysisReport {
        let table = ChannelTable::from_channels(vec![
            vec![61.0, 80.0, 62.0],
            vec![20.0, 21.0, 23.0],
        ])
        .unwrap();
        AnalysisPipeline::new(ManualSource::new(table), &AnalysisConfig::default())
            .run()
            .unwrap()
    }

    #[test]
    fn core_filename_keeps_parent_and_extension() {
        let path = Path::new("Data/sensors-2018.12.26.txt");
        assert_eq!(
            core_filename(path, 0, None),
            PathBuf::from("Data/sensors-2018.12.26-core-0.txt")
        );
        assert_eq!(
            core_filename(path, 3, Some(Path::new("out"))),
            PathBuf::from("out/sensors-2018.12.26-core-3.txt")
        );
        assert_eq!(
            core_filename(Path::new("plain"), 1, None),
            PathBuf::from("plain-core-1")
        );
    }

    #[test]
    fn segment_line_layout() {
        let seg = SegmentDescriptor {
            slope: 0.6333,
            intercept: 61.0,
            index: 0,
        };
        assert_eq!(
            format_segment_line(&seg, 30.0),
            "       0 <= x <=       30 ; y =      61.0000 +      0.6333 x ; interpolation"
        );
    }

    #[test]
    fn fit_line_spans_the_whole_channel() {
        let fit = LinearFit { c0: 1.5, c1: -0.25 };
        assert_eq!(
            format_fit_line(&fit, 30.0, 3),
            "       0 <= x <=       60 ; y =       1.5000 +     -0.2500 x ; least-squares"
        );
    }

    #[test]
    fn writes_one_file_per_channel() {
        let dir = tempdir().unwrap();
        let report = sample_report();
        let input = dir.path().join("sensors.txt");
        let written = write_channel_reports(&report, &input, None).unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(written[1], dir.path().join("sensors-core-1.txt"));
        let text = fs::read_to_string(&written[0]).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("; interpolation"));
        assert!(lines[0].contains("61.0000"));
        assert!(lines[1].starts_with("      30 <= x <=       60"));
        assert!(lines[2].ends_with("; least-squares"));
    }

    #[test]
    fn failed_channel_leaves_no_partial_reports() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sensors.txt");
        // a directory squatting on channel 1's report path blocks the rename
        fs::create_dir(dir.path().join("sensors-core-1.txt")).unwrap();
        assert!(write_channel_reports(&sample_report(), &input, None).is_err());
        assert!(!dir.path().join("sensors-core-0.txt").exists());
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(leftovers, vec![std::ffi::OsString::from("sensors-core-1.txt")]);
    }

    #[test]
    fn existing_reports_are_replaced() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sensors.txt");
        fs::write(dir.path().join("sensors-core-0.txt"), "stale\n").unwrap();
        write_channel_reports(&sample_report(), &input, None).unwrap();
        let text = fs::read_to_string(dir.path().join("sensors-core-0.txt")).unwrap();
        assert!(!text.contains("stale"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn summary_is_valid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/summary.json");
        write_summary(&path, &sample_report()).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["dims"]["cols"], 3);
        assert_eq!(value["segments"][0].as_array().unwrap().len(), 2);
    }
}
