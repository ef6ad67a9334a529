// src/models.rs
use crate::codec;
use crate::error::CodecResult;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// One stored credential. The `password` field holds plaintext while in
/// memory; the base64 transform is applied only at the file boundary.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Record {
    pub id: u64,
    pub site: String,
    pub email: String,
    pub password: String,
    pub notes: String,
    pub created_date: String,
    pub modified_date: String,
}

impl Record {
    pub fn new(id: u64, site: String, email: String, password: String, notes: String) -> Self {
        let now = timestamp();
        Self {
            id,
            site,
            email,
            password,
            notes,
            created_date: now.clone(),
            modified_date: now,
        }
    }
}

/// Partial update for `RecordStore::update`; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub site: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub notes: Option<String>,
}

/// Record shape as read from the backing file. Older versions of the format
/// wrote entries without ids, notes or per-entry dates (some carried a single
/// `data` date field instead), so everything beyond site and email is
/// optional here. `into_record` migrates one raw entry into the canonical
/// `Record`.
#[derive(Deserialize, Debug)]
pub struct RawRecord {
    #[serde(default)]
    pub id: Option<u64>,
    pub site: String,
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_date: Option<String>,
    #[serde(default)]
    pub modified_date: Option<String>,
    #[serde(default, rename = "data")]
    pub legacy_date: Option<String>,
}

impl RawRecord {
    /// Converts a raw entry at `position` (zero-based index in the file)
    /// into a canonical record: decodes the stored password, assigns a
    /// positional id when none is present and backfills missing dates from
    /// the legacy `data` field or the current time.
    pub fn into_record(self, position: usize) -> CodecResult<Record> {
        let password = match self.password {
            Some(encoded) => codec::decode_password(&encoded)?,
            None => String::new(),
        };
        let legacy = self.legacy_date;
        let created_date = self
            .created_date
            .or_else(|| legacy.clone())
            .unwrap_or_else(timestamp);
        let modified_date = self
            .modified_date
            .or(legacy)
            .unwrap_or_else(timestamp);

        Ok(Record {
            id: self.id.unwrap_or(position as u64 + 1),
            site: self.site,
            email: self.email,
            password,
            notes: self.notes.unwrap_or_default(),
            created_date,
            modified_date,
        })
    }
}

/// Current wall-clock time as an RFC 3339 UTC string, second precision.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
