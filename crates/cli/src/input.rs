//! Activity file loading
//!
//! Reads `{ "timestamp", "user", "resource" }` records, either as one JSON
//! array or as JSON Lines. Timestamps are RFC 3339 instants.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use spear_common::config::InputFormat;
use spear_common::errors::{Result, SpearError};
use spear_ranking::ActivityLog;
use std::path::Path;
use tracing::info;

pub type Timestamp = DateTime<Utc>;

/// Activity log as loaded from a file
pub type FileActivityLog = ActivityLog<Timestamp, String, String>;

/// One record of the activity file; the timestamp may be null or absent
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityRecord {
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    pub user: String,
    pub resource: String,
}

/// Pick JSON Lines for `.jsonl`/`.ndjson` files, the configured format otherwise
pub fn resolve_format(path: &Path, configured: InputFormat) -> InputFormat {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("jsonl") | Some("ndjson") => InputFormat::JsonLines,
        _ => configured,
    }
}

/// Parse activity records from file contents
pub fn parse_records(contents: &str, format: InputFormat) -> Result<Vec<ActivityRecord>> {
    match format {
        InputFormat::Json => serde_json::from_str(contents).map_err(|e| SpearError::InvalidFormat {
            message: format!("expected a JSON array of activity records: {}", e),
        }),
        InputFormat::JsonLines => contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(number, line)| {
                serde_json::from_str(line).map_err(|e| SpearError::InvalidFormat {
                    message: format!("line {}: {}", number + 1, e),
                })
            })
            .collect(),
    }
}

/// Load and validate the activity log stored at `path`
pub fn load_activities(path: &Path, configured: InputFormat) -> Result<FileActivityLog> {
    let format = resolve_format(path, configured);
    let contents = std::fs::read_to_string(path)?;
    let records = parse_records(&contents, format)?;

    info!(
        path = %path.display(),
        format = ?format,
        records = records.len(),
        "Loaded activity records"
    );

    ActivityLog::from_records(
        records
            .into_iter()
            .map(|record| (record.timestamp, record.user, record.resource)),
    )
}
