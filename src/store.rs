// src/store.rs
use crate::codec;
use crate::error::{StoreError, StoreResult};
use crate::models::{timestamp, RawRecord, Record, RecordPatch};
use crate::notifier::ChangeNotifier;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// The persistence and integrity core: an ordered, in-memory record set
/// backed by a single JSON file. Every mutation validates, enforces the
/// case-insensitive (site, email) uniqueness rule, persists the whole set
/// and then notifies subscribers.
#[derive(Debug)]
pub struct RecordStore {
    records: Vec<Record>,
    data_file: PathBuf,
    notifier: ChangeNotifier,
}

/// Write-side view of a record: canonical field order, password encoded.
#[derive(Serialize)]
struct DiskRecord<'a> {
    id: u64,
    site: &'a str,
    email: &'a str,
    password: String,
    notes: &'a str,
    created_date: &'a str,
    modified_date: &'a str,
}

impl<'a> From<&'a Record> for DiskRecord<'a> {
    fn from(record: &'a Record) -> Self {
        DiskRecord {
            id: record.id,
            site: &record.site,
            email: &record.email,
            password: codec::encode_password(&record.password),
            notes: &record.notes,
            created_date: &record.created_date,
            modified_date: &record.modified_date,
        }
    }
}

impl RecordStore {
    /// Opens the store backed by `data_file`, loading and migrating any
    /// existing records. A missing file yields an empty store and nothing is
    /// written until the first mutation; an unreadable or malformed file is
    /// logged and likewise yields an empty store. Opening never fails.
    pub fn open<P: AsRef<Path>>(data_file: P) -> Self {
        let data_file = data_file.as_ref().to_path_buf();
        let records = load_records(&data_file);
        let store = RecordStore {
            records,
            data_file,
            notifier: ChangeNotifier::new(),
        };
        if !store.records.is_empty() {
            // Rewrite immediately so legacy entries land on disk in the
            // canonical shape (ids, dates, notes, encoded passwords).
            if let Err(e) = store.persist() {
                log::warn!(
                    "Failed to rewrite migrated store {:?}: {}",
                    store.data_file, e
                );
            }
        }
        store
    }

    /// Registers a callback invoked after every successful mutation.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        self.notifier.subscribe(callback);
    }

    /// All records in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn find(&self, id: u64) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Returns records whose site, email or notes contain `term`,
    /// case-insensitively, in insertion order. An empty term matches every
    /// record. The result is a copy; callers cannot mutate store state
    /// through it.
    pub fn filter(&self, term: &str) -> Vec<Record> {
        if term.is_empty() {
            return self.records.clone();
        }
        log::debug!("Filtering {} record(s) for '{}'", self.records.len(), term);
        let term = term.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.site.to_lowercase().contains(&term)
                    || record.email.to_lowercase().contains(&term)
                    || record.notes.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    /// Adds a new record. All fields are trimmed first; site, email and
    /// password must be non-empty and the (site, email) pair must not
    /// already exist. The new record gets the next id above the current
    /// maximum and both dates set to now.
    pub fn add(&mut self, site: &str, email: &str, password: &str, notes: &str) -> StoreResult<Record> {
        let site = site.trim();
        let email = email.trim();
        let password = password.trim();
        let notes = notes.trim();

        validate_required(site, email, password)?;
        if self.pair_exists(site, email, None) {
            log::debug!("Rejected duplicate entry for {} / {}", site, email);
            return Err(StoreError::Duplicate {
                site: site.to_string(),
                email: email.to_string(),
            });
        }

        let record = Record::new(
            self.next_id(),
            site.to_string(),
            email.to_string(),
            password.to_string(),
            notes.to_string(),
        );
        self.records.push(record.clone());
        self.persist()?;
        log::info!("Added entry {} for site {}", record.id, record.site);
        self.notifier.notify();
        Ok(record)
    }

    /// Applies `patch` to the record with `id`. Unpatched fields keep their
    /// stored values; the merged result is trimmed and revalidated under the
    /// same rules as `add`, with the record's own id exempt from the
    /// uniqueness check. `created_date` is preserved and `modified_date`
    /// set to now.
    pub fn update(&mut self, id: u64, patch: RecordPatch) -> StoreResult<Record> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let current = &self.records[index];
        let site = patch.site.as_deref().unwrap_or(&current.site).trim().to_string();
        let email = patch.email.as_deref().unwrap_or(&current.email).trim().to_string();
        let password = patch
            .password
            .as_deref()
            .unwrap_or(&current.password)
            .trim()
            .to_string();
        let notes = patch.notes.as_deref().unwrap_or(&current.notes).trim().to_string();

        validate_required(&site, &email, &password)?;
        if self.pair_exists(&site, &email, Some(id)) {
            log::debug!("Rejected update of entry {} to duplicate {} / {}", id, site, email);
            return Err(StoreError::Duplicate { site, email });
        }

        let record = &mut self.records[index];
        record.site = site;
        record.email = email;
        record.password = password;
        record.notes = notes;
        record.modified_date = timestamp();

        self.persist()?;
        log::info!("Updated entry {}", id);
        self.notifier.notify();
        Ok(self.records[index].clone())
    }

    /// Removes the record with `id`.
    pub fn delete(&mut self, id: u64) -> StoreResult<()> {
        let index = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let removed = self.records.remove(index);
        self.persist()?;
        log::info!("Deleted entry {} for site {}", removed.id, removed.site);
        self.notifier.notify();
        Ok(())
    }

    fn next_id(&self) -> u64 {
        self.records.iter().map(|record| record.id).max().unwrap_or(0) + 1
    }

    fn pair_exists(&self, site: &str, email: &str, exclude_id: Option<u64>) -> bool {
        let site = site.to_lowercase();
        let email = email.to_lowercase();
        self.records.iter().any(|record| {
            Some(record.id) != exclude_id
                && record.site.to_lowercase() == site
                && record.email.to_lowercase() == email
        })
    }

    /// Serializes the whole record set and rewrites the backing file.
    fn persist(&self) -> StoreResult<()> {
        let disk_records: Vec<DiskRecord> = self.records.iter().map(DiskRecord::from).collect();
        let json = serde_json::to_string_pretty(&disk_records).map_err(|e| {
            let msg = format!("Failed to serialize {} record(s): {}", disk_records.len(), e);
            log::error!("persist: {}", msg);
            StoreError::Serialization(msg)
        })?;
        fs::write(&self.data_file, json).map_err(|e| {
            log::error!("Failed to write store file {:?}: {}", self.data_file, e);
            StoreError::Io(e)
        })?;
        log::debug!(
            "Persisted {} record(s) to {:?}",
            self.records.len(),
            self.data_file
        );
        Ok(())
    }
}

/// Reads and migrates the backing file. Any failure is logged and degrades
/// to an empty record set.
fn load_records(data_file: &Path) -> Vec<Record> {
    if !data_file.exists() {
        log::info!("Store file {:?} does not exist yet; starting empty", data_file);
        return Vec::new();
    }
    match read_records(data_file) {
        Ok(records) => {
            log::info!("Loaded {} record(s) from {:?}", records.len(), data_file);
            records
        }
        Err(e) => {
            log::error!(
                "Failed to load store file {:?}: {}. Starting with an empty record set.",
                data_file, e
            );
            Vec::new()
        }
    }
}

fn read_records(data_file: &Path) -> StoreResult<Vec<Record>> {
    let contents = fs::read_to_string(data_file)?;
    let raw: Vec<RawRecord> = serde_json::from_str(&contents)
        .map_err(|e| StoreError::Serialization(format!("Malformed store file: {}", e)))?;
    raw.into_iter()
        .enumerate()
        .map(|(position, record)| record.into_record(position).map_err(StoreError::from))
        .collect()
}

fn validate_required(site: &str, email: &str, password: &str) -> StoreResult<()> {
    if site.is_empty() {
        return Err(StoreError::Validation("site"));
    }
    if email.is_empty() {
        return Err(StoreError::Validation("email"));
    }
    if password.is_empty() {
        return Err(StoreError::Validation("password"));
    }
    Ok(())
}
