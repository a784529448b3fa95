use std::path::Path;
use tracing::{info, warn};

use super::errors::ConfigError;
use crate::{LocalRecord, LocalRecordStore};

/// Parses the `hostname,ipv4,ipv6,text` hosts format, one record per line.
pub fn parse_local_records(contents: &str) -> LocalRecordStore {
    let records = contents
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .filter_map(|(index, line)| {
            let record = LocalRecord::parse_line(line);
            if record.is_none() {
                warn!(line = index + 1, "Skipping hosts line with fewer than 2 fields");
            }
            record
        })
        .collect();

    LocalRecordStore::new(records)
}

pub fn load_local_records(path: &Path) -> Result<LocalRecordStore, ConfigError> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::FileRead(path.display().to_string(), e.to_string()))?;

    let store = parse_local_records(&contents);
    info!(hosts = store.len(), path = %path.display(), "Loaded local hosts");
    Ok(store)
}
