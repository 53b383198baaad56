/// Flat-file garment catalog.
///
/// The store is a newline-delimited sequence of JSON records, one garment per
/// line, trailing newline after the last record, empty file for an empty
/// catalog.  Records are append-only; `delete_by_id` is the only operation
/// that rewrites the file.
///
/// The file is owned by a single process.  Within that process a mutex
/// serializes `add` against the read-modify-write of `delete_by_id` so a
/// delete cannot drop a record appended concurrently.
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::catalog::{seed_garments, Category, Garment};
use crate::error::StoreError;

pub struct GarmentStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl GarmentStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        GarmentStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns all garments in insertion order.
    ///
    /// A missing file is an empty catalog; an unreadable file is a
    /// `StoreError::Io`.  A line that fails to parse is skipped with a
    /// warning so one corrupt record does not take the rest of the catalog
    /// with it.
    pub fn list(&self) -> Result<Vec<Garment>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(e)),
        };

        let mut garments = Vec::new();
        for (lineno, line) in BufReader::new(file).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Garment>(&line) {
                Ok(g) => garments.push(g),
                Err(e) => {
                    eprintln!(
                        "garment store: skipping unparsable line {} of {}: {}",
                        lineno + 1,
                        self.path.display(),
                        e
                    );
                }
            }
        }
        Ok(garments)
    }

    /// Appends one garment as a single JSON line.
    ///
    /// No uniqueness check is made here — callers generate unique ids.
    pub fn add(&self, garment: &Garment) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().unwrap();
        self.ensure_parent()?;

        let mut line = serde_json::to_string(garment)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    /// Removes the garment(s) with the given id, rewriting the file in full.
    /// Returns whether anything was removed.
    pub fn delete_by_id(&self, id: &str) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().unwrap();

        let garments = self.list()?;
        let kept: Vec<&Garment> = garments.iter().filter(|g| g.id != id).collect();
        if kept.len() == garments.len() {
            return Ok(false);
        }

        let mut content = String::new();
        for g in &kept {
            content.push_str(&serde_json::to_string(g)?);
            content.push('\n');
        }
        self.ensure_parent()?;
        fs::write(&self.path, content)?;
        Ok(true)
    }

    /// Convenience filter over `list()`; preserves insertion order.
    pub fn filter_by_category(&self, category: Category) -> Result<Vec<Garment>, StoreError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(|g| g.category == category)
            .collect())
    }

    /// Writes the built-in catalog into the store, but only when it is
    /// currently empty.
    pub fn seed_defaults(&self) -> Result<(), StoreError> {
        if !self.list()?.is_empty() {
            return Ok(());
        }
        for garment in seed_garments() {
            self.add(&garment)?;
        }
        Ok(())
    }

    fn ensure_parent(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(())
    }
}
