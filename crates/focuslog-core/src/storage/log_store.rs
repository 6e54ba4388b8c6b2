//! CSV-backed session log.
//!
//! The log is a flat file with a `date,task,work_min` header and one row per
//! completed session, in append order. A missing file is the "no history"
//! state: the first read creates it with just the header.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::csv::{decode_row, encode_row, header_line, is_header, split_rows};
use super::SessionLog;
use crate::error::StorageError;
use crate::session::SessionRecord;

/// A row that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorruptRow {
    pub line: usize,
    pub reason: String,
}

/// Everything readable in the log, plus what was not.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub records: Vec<SessionRecord>,
    pub corrupt: Vec<CorruptRow>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.corrupt.is_empty()
    }
}

/// Session log stored as a CSV file.
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole log without stopping at the first bad row.
    ///
    /// Nothing is skipped silently: every row that failed to decode is listed
    /// in [`LoadReport::corrupt`]. Used for diagnostics; [`SessionLog::load_all`]
    /// refuses a log with any corrupt row.
    ///
    /// # Errors
    /// Returns [`StorageError::Unavailable`] if the file exists but cannot be
    /// read.
    pub fn scan(&self) -> Result<LoadReport, StorageError> {
        let Some(text) = self.read_text()? else {
            self.init_empty();
            return Ok(LoadReport::default());
        };

        let split = split_rows(&text);
        let mut report = LoadReport::default();
        let mut rows = split.rows.iter();

        if let Some(first) = rows.next() {
            if !is_header(first) {
                report.corrupt.push(CorruptRow {
                    line: first.line,
                    reason: format!("expected header 'date,task,work_min', found '{}'", first.fields.join(",")),
                });
            }
        }

        for row in rows {
            match decode_row(row) {
                Ok(record) => report.records.push(record),
                Err(reason) => report.corrupt.push(CorruptRow {
                    line: row.line,
                    reason,
                }),
            }
        }

        if let Some(line) = split.unterminated {
            report.corrupt.push(CorruptRow {
                line,
                reason: "unterminated quoted field".to_string(),
            });
        }

        tracing::debug!(
            path = %self.path.display(),
            records = report.records.len(),
            corrupt = report.corrupt.len(),
            "scanned session log"
        );
        Ok(report)
    }

    fn read_text(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(StorageError::Corrupt {
                path: self.path.clone(),
                line: 1,
                reason: "file is not valid UTF-8".to_string(),
            }),
            Err(source) => Err(self.unavailable(source)),
        }
    }

    /// Create a header-only file. Failure is not fatal for a read.
    fn init_empty(&self) {
        let result = self
            .create_parent()
            .and_then(|()| fs::write(&self.path, header_line()));
        match result {
            Ok(()) => tracing::debug!(path = %self.path.display(), "created empty session log"),
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "could not create empty session log"
            ),
        }
    }

    fn create_parent(&self) -> std::io::Result<()> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }

    fn unavailable(&self, source: std::io::Error) -> StorageError {
        StorageError::Unavailable {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionLog for LogStore {
    fn append(&self, record: &SessionRecord) -> Result<(), StorageError> {
        self.create_parent().map_err(|e| self.unavailable(e))?;

        let mut file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|e| self.unavailable(e))?;

        let mut existing = Vec::new();
        file.read_to_end(&mut existing)
            .map_err(|e| self.unavailable(e))?;
        let mut out = String::new();
        if split_rows(&String::from_utf8_lossy(&existing)).rows.is_empty() {
            // Nothing but blank lines: start over with just the header.
            file.set_len(0).map_err(|e| self.unavailable(e))?;
            out.push_str(&header_line());
        } else if existing.last() != Some(&b'\n') {
            // A hand-edited file may lack the final newline.
            out.push('\n');
        }
        out.push_str(&encode_row(record));

        file.write_all(out.as_bytes())
            .and_then(|()| file.sync_all())
            .map_err(|e| self.unavailable(e))?;

        tracing::debug!(
            path = %self.path.display(),
            date = %record.date,
            task = %record.task,
            work_minutes = record.work_minutes,
            "appended session record"
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<SessionRecord>, StorageError> {
        let report = self.scan()?;
        match report.corrupt.into_iter().next() {
            Some(row) => Err(StorageError::Corrupt {
                path: self.path.clone(),
                line: row.line,
                reason: row.reason,
            }),
            None => Ok(report.records),
        }
    }

    fn clear(&self) -> Result<(), StorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(self.unavailable(e)),
        }
        tracing::info!(path = %self.path.display(), "cleared session log");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(day: u32, task: &str, minutes: u32) -> SessionRecord {
        SessionRecord::new(
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            task,
            minutes,
        )
    }

    fn store() -> (tempfile::TempDir, LogStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = LogStore::new(dir.path().join("data").join("focus_log.csv"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty_and_lazily_created() {
        let (_dir, store) = store();
        assert!(store.load_all().unwrap().is_empty());
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "date,task,work_min\n"
        );
    }

    #[test]
    fn zero_byte_file_is_empty() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "").unwrap();
        assert!(store.load_all().unwrap().is_empty());
    }

    #[test]
    fn append_writes_header_once() {
        let (_dir, store) = store();
        store.append(&record(1, "a", 10)).unwrap();
        store.append(&record(2, "b", 15)).unwrap();
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "date,task,work_min\n2024-05-01,a,10\n2024-05-02,b,15\n"
        );
    }

    #[test]
    fn append_repairs_missing_trailing_newline() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "date,task,work_min\n2024-05-01,a,10").unwrap();
        store.append(&record(2, "b", 15)).unwrap();
        assert_eq!(store.load_all().unwrap().len(), 2);
    }

    #[test]
    fn append_to_blank_only_file_writes_header() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "\n\n").unwrap();
        assert!(store.load_all().unwrap().is_empty());

        let r = record(1, "a", 10);
        store.append(&r).unwrap();
        assert_eq!(store.load_all().unwrap(), vec![r]);
        assert_eq!(
            fs::read_to_string(store.path()).unwrap(),
            "date,task,work_min\n2024-05-01,a,10\n"
        );
    }

    #[test]
    fn non_utf8_file_is_corrupt() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"date,task,work_min\n\xff\n").unwrap();
        assert!(matches!(
            store.load_all(),
            Err(StorageError::Corrupt { line: 1, .. })
        ));
    }

    #[test]
    fn load_preserves_append_order_and_duplicates() {
        let (_dir, store) = store();
        let records = vec![record(3, "x", 5), record(1, "y", 5), record(3, "x", 5)];
        for r in &records {
            store.append(r).unwrap();
        }
        assert_eq!(store.load_all().unwrap(), records);
    }

    #[test]
    fn corrupt_row_fails_load_but_scan_reports_it() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            "date,task,work_min\n2024-05-01,a,10\n2024-05-02,b,lots\n2024-05-03,c,5\n",
        )
        .unwrap();

        match store.load_all() {
            Err(StorageError::Corrupt { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected corrupt error, got {other:?}"),
        }

        let report = store.scan().unwrap();
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.corrupt.len(), 1);
        assert_eq!(report.corrupt[0].line, 3);
    }

    #[test]
    fn wrong_header_is_corrupt() {
        let (_dir, store) = store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "2024-05-01,a,10\n").unwrap();
        assert!(matches!(
            store.load_all(),
            Err(StorageError::Corrupt { line: 1, .. })
        ));
    }

    #[test]
    fn clear_removes_everything() {
        let (_dir, store) = store();
        store.append(&record(1, "a", 10)).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
        assert!(store.load_all().unwrap().is_empty());
        // Clearing an absent log is fine.
        store.clear().unwrap();
    }

    #[test]
    fn unwritable_location_surfaces_on_append() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let store = LogStore::new(blocker.join("focus_log.csv"));

        assert!(matches!(
            store.append(&record(1, "a", 10)),
            Err(StorageError::Unavailable { .. })
        ));
    }
}
