//! History of committed calculations.
//!
//! The session only ever calls [`HistorySink::record`]; listing and
//! clearing are for the front end.

mod entry;
mod file;

pub use entry::HistoryEntry;
pub use file::FileHistory;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("history I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("history serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("could not determine a data directory for the history file")]
    NoDataDir,
}

/// Destination for committed calculations.
pub trait HistorySink {
    fn record(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError>;

    /// All recorded entries, oldest first.
    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError>;

    fn clear(&mut self) -> Result<(), HistoryError>;
}

/// In-memory history, lost when dropped.
#[derive(Clone, Debug, Default)]
pub struct MemoryHistory {
    entries: Vec<HistoryEntry>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistorySink for MemoryHistory {
    fn record(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        self.entries.push(entry.clone());
        Ok(())
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        Ok(self.entries.clone())
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        self.entries.clear();
        Ok(())
    }
}
