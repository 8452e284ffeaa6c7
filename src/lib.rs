//! Piecewise-linear interpolation and global least-squares fits for
//! fixed-width multi-channel sensor logs.
//!
//! ```text
//!  sample file ──► ChannelTable ──┬─► interpolate ──► segments per channel
//!                                 ├─► fit         ──► one LinearFit per channel
//!                                 └─► rates       ──► windowed slopes
//! ```
pub mod analysis;
pub mod config;
pub mod report;
pub mod types;
