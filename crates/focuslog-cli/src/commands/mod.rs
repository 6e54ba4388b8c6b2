pub mod check;
pub mod config;
pub mod history;
pub mod start;
pub mod stats;
pub mod wipe;

use focuslog_core::{Config, LogStore, SessionLog, SessionRecord, StorageError};

/// Load the config and open the log it points at.
pub fn open_log() -> Result<(Config, LogStore), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let store = LogStore::new(config.log_path()?);
    Ok((config, store))
}

/// All records, or an error that tells the user how to inspect a bad log.
pub fn load_records(store: &LogStore) -> Result<Vec<SessionRecord>, Box<dyn std::error::Error>> {
    match store.load_all() {
        Ok(records) => Ok(records),
        Err(e @ StorageError::Corrupt { .. }) => {
            Err(format!("{e}\nrun `focuslog check` to list unreadable rows").into())
        }
        Err(e) => Err(e.into()),
    }
}

/// Every readable record; unreadable rows are counted on stderr.
pub fn load_readable_records(
    store: &LogStore,
) -> Result<Vec<SessionRecord>, Box<dyn std::error::Error>> {
    let report = store.scan()?;
    if !report.is_clean() {
        eprintln!(
            "ignoring {} unreadable row(s) in {}",
            report.corrupt.len(),
            store.path().display()
        );
    }
    Ok(report.records)
}
