// src/analysis/mod.rs
pub mod error;
pub mod interpolate;
pub mod least_squares;
pub mod pipeline;
pub mod rates;
pub mod source;
pub mod table;
pub mod window;
pub use error::SeriesError;
pub use interpolate::{interpolate, interpolate_channel, SegmentDescriptor};
pub use least_squares::{fit, fit_channel, LinearFit};
pub use pipeline::{AnalysisPipeline, AnalysisReport};
pub use rates::{channel_rates, rates};
pub use source::{FileSource, ManualSource, TableSource};
pub use table::ChannelTable;
pub use window::{adjacent_pairs, pairwise_window};
