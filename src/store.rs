//! Flat-file record store and persistence gateway
//!
//! The on-disk format is one record per line, `key = value`, with insertion
//! order preserved on write. Reading tolerates any subset or superset of
//! keys; lines without a `=` are skipped with a warning. Writes are atomic:
//! the file is written to a temp sibling and renamed into place, so a failed
//! save never leaves a half-written file behind.

use crate::error::{Error, Result};
use crate::record::{self, Record};
use crate::schema::FieldSchema;

use log::warn;
use std::path::{Path, PathBuf};

/// An ordered set of records bound to a file path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<Record>,
}

impl RecordStore {
    /// Create a store from a path and an ordered record sequence
    pub fn new(path: impl Into<PathBuf>, records: Vec<Record>) -> Self {
        Self {
            path: path.into(),
            records,
        }
    }

    /// Read a store from a file
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileRead`] if the file cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
            path: path.clone(),
            source: e,
        })?;

        let mut records = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let Some((key, raw_value)) = line.split_once('=') else {
                warn!("skipping malformed line in '{}': {line}", path.display());
                continue;
            };
            // One space after '=' belongs to the format; everything beyond
            // it is part of the value.
            let value = raw_value.strip_prefix(' ').unwrap_or(raw_value);
            records.push(Record::new(key.trim(), value));
        }

        Ok(Self { path, records })
    }

    /// Write the records to the store's path, atomically
    ///
    /// Each record occupies exactly one line, so keys and values must not
    /// contain line breaks.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmbeddedLineBreak`] for a record whose key or value
    /// contains `\n` or `\r` (nothing is written), and [`Error::FileWrite`]
    /// if the temp file cannot be written or renamed into place.
    pub fn save(&self) -> Result<()> {
        let mut content = String::new();
        for record in &self.records {
            if record.key.contains(['\n', '\r']) || record.value.contains(['\n', '\r']) {
                return Err(Error::EmbeddedLineBreak(record.key.clone()));
            }
            content.push_str(&record.key);
            content.push_str(" = ");
            content.push_str(&record.value);
            content.push('\n');
        }

        // Atomic write: temp file + rename
        let file_name = self.path.file_name().ok_or_else(|| Error::FileWrite {
            path: self.path.clone(),
            source: std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "path has no filename",
            ),
        })?;
        let mut temp_filename = file_name.to_os_string();
        temp_filename.push(".tmp");
        let temp_path = self.path.with_file_name(temp_filename);

        std::fs::write(&temp_path, &content).map_err(|e| Error::FileWrite {
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| Error::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Path this store reads from and writes to
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Records in insertion order
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Human-readable listing of the store's contents
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = format!("{} ({} records)\n", self.path.display(), self.records.len());
        for record in &self.records {
            out.push_str(&format!("  {} = {}\n", record.key, record.value));
        }
        out
    }

    /// Delete the store's file
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileDelete`] if the file cannot be removed.
    pub fn remove_file(&self) -> Result<()> {
        std::fs::remove_file(&self.path).map_err(|e| Error::FileDelete {
            path: self.path.clone(),
            source: e,
        })
    }
}

// =============================================================================
// Persistence Gateway
// =============================================================================

/// Export a configuration instance and write it to `path`
///
/// Returns the written store for optional inspection.
///
/// # Errors
///
/// Returns export errors ([`Error::FieldNotFound`]) or
/// [`Error::FileWrite`]; on a write failure the previous file content is
/// untouched.
pub fn save_config<C: FieldSchema>(cfg: &C, path: impl Into<PathBuf>) -> Result<RecordStore> {
    let store = RecordStore::new(path, record::export(cfg)?);
    store.save()?;
    Ok(store)
}

/// Read records from `path` and import them into `cfg`
///
/// # Errors
///
/// Returns [`Error::FileRead`] or import errors ([`Error::Parse`]).
pub fn load_config<C: FieldSchema>(cfg: &mut C, path: impl AsRef<Path>) -> Result<()> {
    let store = RecordStore::load(path.as_ref())?;
    record::import_records(cfg, store.records())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_roundtrip_preserves_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");

        let records = vec![
            Record::new("ZULU", "last declared, first listed"),
            Record::new("ALPHA", "1"),
            Record::new("EMPTY", ""),
        ];
        RecordStore::new(&path, records.clone()).save().unwrap();

        let loaded = RecordStore::load(&path).unwrap();
        assert_eq!(loaded.records(), records.as_slice());
    }

    #[test]
    fn test_values_with_spaces_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");

        let records = vec![Record::new("PADDED", "  two leading, one trailing ")];
        RecordStore::new(&path, records.clone()).save().unwrap();

        let loaded = RecordStore::load(&path).unwrap();
        assert_eq!(loaded.records(), records.as_slice());
    }

    #[test]
    fn test_value_with_line_break_is_rejected_before_writing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        RecordStore::new(&path, vec![Record::new("KEY", "old")])
            .save()
            .unwrap();

        // A multi-line value would split into bogus extra lines on reload,
        // so the save is refused and the previous file stays intact.
        let bad = RecordStore::new(&path, vec![Record::new("KEY", "line one\nline two")]);
        assert!(matches!(bad.save(), Err(Error::EmbeddedLineBreak(_))));

        let carriage = RecordStore::new(&path, vec![Record::new("KEY", "ends in\r")]);
        assert!(matches!(carriage.save(), Err(Error::EmbeddedLineBreak(_))));

        let unchanged = RecordStore::load(&path).unwrap();
        assert_eq!(unchanged.records(), &[Record::new("KEY", "old")]);
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        std::fs::write(&path, "GOOD = 1\nno equals sign here\n\nALSO_GOOD = x\n").unwrap();

        let store = RecordStore::load(&path).unwrap();
        assert_eq!(
            store.records(),
            &[Record::new("GOOD", "1"), Record::new("ALSO_GOOD", "x")]
        );
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let result = RecordStore::load("/nonexistent/settings.cfg");
        assert!(matches!(result, Err(Error::FileRead { .. })));
    }

    #[test]
    fn test_failed_save_leaves_previous_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        RecordStore::new(&path, vec![Record::new("KEY", "old")])
            .save()
            .unwrap();

        // Writing into a directory that does not exist fails before the
        // original file is touched.
        let bad = RecordStore::new(
            dir.path().join("missing-dir").join("settings.cfg"),
            vec![Record::new("KEY", "new")],
        );
        assert!(bad.save().is_err());

        let unchanged = RecordStore::load(&path).unwrap();
        assert_eq!(unchanged.records(), &[Record::new("KEY", "old")]);
    }

    #[test]
    fn test_dump_lists_records() {
        let store = RecordStore::new("/tmp/x.cfg", vec![Record::new("A", "1")]);
        let dump = store.dump();
        assert!(dump.contains("/tmp/x.cfg"));
        assert!(dump.contains("1 records"));
        assert!(dump.contains("A = 1"));
    }

    #[test]
    fn test_remove_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("settings.cfg");
        let store = RecordStore::new(&path, vec![Record::new("A", "1")]);
        store.save().unwrap();
        assert!(path.exists());

        store.remove_file().unwrap();
        assert!(!path.exists());

        assert!(matches!(
            store.remove_file(),
            Err(Error::FileDelete { .. })
        ));
    }
}
