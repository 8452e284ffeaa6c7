use std::path::{Path, PathBuf};
use crate::analysis::{ChannelTable, SeriesError};
/// Trait representing something that can yield a fully parsed table on demand.
pub trait TableSource {
    fn load(&mut self) -> Result<ChannelTable, SeriesError>;
    /// Human-readable origin, used in log lines.
    fn describe(&self) -> String;
}
/// Whitespace-delimited sample file on disk.
pub struct FileSource {
    path: PathBuf,
    channel_count: usize,
}
impl FileSource {
    pub fn new(path: impl Into<PathBuf>, channel_count: usize) -> Self {
        Self {
            path: path.into(),
            channel_count,
        }
    }
    pub fn path(&self) -> &Path {
        &self.path
    }
}
impl TableSource for FileSource {
    fn load(&mut self) -> Result<ChannelTable, SeriesError> {
        ChannelTable::from_file(&self.path, self.channel_count)
    }
    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
/// In-memory source useful for tests and deterministic replays.
pub struct ManualSource {
    table: ChannelTable,
}
impl ManualSource {
    pub fn new(table: ChannelTable) -> Self {
        Self { table }
    }
}
impl TableSource for ManualSource {
    fn load(&mut self) -> Result<ChannelTable, SeriesError> {
        Ok(self.table.clone())
    }
    fn describe(&self) -> String {
        format!("in-memory table {}", self.table.dimensions())
    }
}
