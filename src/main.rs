// src/main.rs
use std::path::PathBuf;

use anyhow::{Context, Result};
use channelfit::analysis::{AnalysisPipeline, FileSource};
use channelfit::config::{AnalysisConfig, DEFAULT_INPUT};
use channelfit::report::{write_channel_reports, write_summary};
use clap::{ArgAction, Parser, ValueHint};
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Interpolate and least-squares fit multi-channel sensor logs"
)]
struct Cli {
    /// Whitespace-delimited sample file, one row per line
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Number of columns (channels) per row
    #[arg(short, long)]
    channels: Option<usize>,

    /// Sampling period in seconds
    #[arg(short, long)]
    period: Option<f64>,

    /// Samples spanned by each finite-difference rate
    #[arg(long)]
    rate_window: Option<usize>,

    /// JSON config file; flags override its values
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Directory for per-channel reports (defaults next to the input)
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    output_dir: Option<PathBuf>,

    /// Also write the full report as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    summary: Option<PathBuf>,

    /// Skip writing per-channel report files
    #[arg(long, action = ArgAction::SetTrue)]
    no_write: bool,

    /// Debug-level logging
    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,
}

impl Cli {
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(input) = &self.input {
            config.input = Some(input.clone());
        }
        if config.input.is_none() {
            warn!("No file was passed. Using {DEFAULT_INPUT}");
        }
        if let Some(channels) = self.channels {
            config.channels = channels;
        }
        if let Some(period) = self.period {
            config.time_period = period;
        }
        if let Some(window) = self.rate_window {
            config.rate_window = window;
        }
        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = cli.resolve_config()?;
    let source = FileSource::new(config.input_path(), config.channels);
    let input = source.path().to_path_buf();
    let report = AnalysisPipeline::new(source, &config)
        .run()
        .with_context(|| format!("analysing {}", input.display()))?;

    for (channel, fit) in report.fits.iter().enumerate() {
        info!(
            "channel {channel}: least squares y = {:.4} + {:.4} t",
            fit.c0, fit.c1
        );
    }
    if !cli.no_write {
        write_channel_reports(&report, &input, cli.output_dir.as_deref())?;
    }
    if let Some(path) = &cli.summary {
        write_summary(path, &report)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "channelfit",
            "Data/sensors.txt",
            "-c",
            "3",
            "--period",
            "0.5",
            "--rate-window",
            "2",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.input_path(), PathBuf::from("Data/sensors.txt"));
        assert_eq!(config.channels, 3);
        assert_eq!(config.time_period, 0.5);
        assert_eq!(config.rate_window, 2);
    }

    #[test]
    fn missing_input_falls_back_to_default_path() {
        let cli = Cli::try_parse_from(["channelfit"]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config, AnalysisConfig::default());
        assert_eq!(config.input_path(), PathBuf::from(DEFAULT_INPUT));
    }

    #[test]
    fn input_from_config_file_is_used() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "input": "logs/day1.txt", "channels": 2 }}"#).unwrap();
        let config_path = file.path().to_str().unwrap().to_owned();
        let cli = Cli::try_parse_from(["channelfit", "--config", config_path.as_str()]).unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.input, Some(PathBuf::from("logs/day1.txt")));
        assert_eq!(config.channels, 2);

        let cli = Cli::try_parse_from([
            "channelfit",
            "--config",
            config_path.as_str(),
            "other.txt",
        ])
        .unwrap();
        assert_eq!(
            cli.resolve_config().unwrap().input_path(),
            PathBuf::from("other.txt")
        );
    }

    #[test]
    fn non_positive_period_is_rejected() {
        let cli = Cli::try_parse_from(["channelfit", "-p", "0"]).unwrap();
        assert!(cli.resolve_config().is_err());
    }
}
