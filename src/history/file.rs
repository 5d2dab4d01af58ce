//! History persisted as JSON lines.

use std::fs::{self, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use super::{HistoryEntry, HistoryError, HistorySink};

const HISTORY_FILE: &str = "history.jsonl";

/// Append-only history file, one JSON object per line.
#[derive(Clone, Debug)]
pub struct FileHistory {
    path: PathBuf,
}

impl FileHistory {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History file in the user's data directory.
    pub fn default_path() -> Result<PathBuf, HistoryError> {
        dirs::data_dir()
            .map(|dir| dir.join(crate::APP_NAME).join(HISTORY_FILE))
            .ok_or(HistoryError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistorySink for FileHistory {
    fn record(&mut self, entry: &HistoryEntry) -> Result<(), HistoryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut line = serde_json::to_string(entry)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    fn entries(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let file = match fs::File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for (number, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<HistoryEntry>(&line) {
                Ok(entry) => entries.push(entry),
                Err(err) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        line = number + 1,
                        "skipping malformed history line: {err}"
                    );
                }
            }
        }
        Ok(entries)
    }

    fn clear(&mut self) -> Result<(), HistoryError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
