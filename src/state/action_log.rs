/// Audit trail of successful session operations
///
/// The session hands one `ActionRecord` to its `ActionLog` after every
/// successful mutating call, in call order. Sinks only append; they never
/// reorder or prune.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Operations recorded in the action log
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    LoadImage,
    ApplyDenoise,
    ConvertToGrayscale,
    Resize,
    SaveImage,
    Undo,
    ResetToOriginal,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LoadImage => "load_image",
            Self::ApplyDenoise => "apply_denoise",
            Self::ConvertToGrayscale => "convert_to_grayscale",
            Self::Resize => "resize",
            Self::SaveImage => "save_image",
            Self::Undo => "undo",
            Self::ResetToOriginal => "reset_to_original",
        }
    }
}

/// One entry of the action log
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ActionRecord {
    pub timestamp: DateTime<Local>,
    pub operation: Operation,
    pub parameters: Map<String, Value>,
}

impl ActionRecord {
    /// Stamp a record with the current local time
    pub fn now(operation: Operation, parameters: Map<String, Value>) -> Self {
        Self {
            timestamp: Local::now(),
            operation,
            parameters,
        }
    }
}

#[derive(Error, Debug)]
pub enum ActionLogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write-only sink for action records
pub trait ActionLog {
    fn record(&mut self, record: ActionRecord) -> Result<(), ActionLogError>;
}

/// Keeps records in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryLog {
    records: Vec<ActionRecord>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ActionRecord] {
        &self.records
    }

    /// Operation names in append order
    pub fn operations(&self) -> Vec<Operation> {
        self.records.iter().map(|r| r.operation).collect()
    }
}

impl ActionLog for MemoryLog {
    fn record(&mut self, record: ActionRecord) -> Result<(), ActionLogError> {
        self.records.push(record);
        Ok(())
    }
}

/// Persists records as a pretty-printed JSON array
///
/// The whole file is rewritten on each append. A missing, unreadable or
/// corrupt file starts a fresh array.
#[derive(Debug, Clone)]
pub struct JsonFileLog {
    path: PathBuf,
}

impl JsonFileLog {
    /// File name used inside the log directory
    pub const FILE_NAME: &'static str = "user_actions.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Log stored as `user_actions.json` inside `log_dir`
    pub fn in_dir(log_dir: &Path) -> Self {
        Self::new(log_dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every stored record (empty if the file is absent or corrupt)
    pub fn read_all(&self) -> Vec<ActionRecord> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return Vec::new();
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!(
                "Discarding unreadable action log {}: {}",
                self.path.display(),
                e
            );
            Vec::new()
        })
    }
}

impl ActionLog for JsonFileLog {
    fn record(&mut self, record: ActionRecord) -> Result<(), ActionLogError> {
        let mut records = self.read_all();
        records.push(record);

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
