//! # Domain Model: Wine Records and the Collection Envelope
//!
//! This module defines the data that winenotes persists: [`WineBase`] (the
//! fields a caller supplies), [`Wine`] (a stored record) and
//! [`WineCollection`] (the envelope written to the data file).
//!
//! ## On-Disk Format
//!
//! The whole collection lives in one pretty-printed JSON file:
//!
//! ```text
//! {
//!   "wines": [
//!     {
//!       "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
//!       "name": "Barolo",
//!       "type": "red",
//!       "region": "Piedmont",
//!       "vintage": 2018,
//!       "rating": 9,
//!       "price": null,
//!       "notes": null,
//!       "photo": null,
//!       "created_at": "2024-03-01T18:22:05.114Z",
//!       "updated_at": "2024-03-01T18:22:05.114Z"
//!     }
//!   ],
//!   "last_updated": "2024-03-01T18:22:05.115Z"
//! }
//! ```
//!
//! Records are flat objects: the caller-supplied fields sit next to `id` and
//! the timestamps. `last_updated` is advisory and never used for consistency.
//!
//! ## Field Rules
//!
//! | Field | Rule |
//! |-------|------|
//! | `name` | non-blank |
//! | `vintage` | `1900..=2100` when present |
//! | `rating` | `1..=10`, required |
//! | `price` | finite and `>= 0` when present |
//!
//! [`WineBase::validate`] enforces these before anything is persisted.
//!
//! ## Timestamps
//!
//! `created_at` is written once by [`Wine::new`]. `updated_at` starts equal to
//! it and strictly advances on every [`Wine::replace_fields`], even when the
//! wall clock has not ticked since the previous write.
//!
//! Older data files carry naive ISO timestamps without an offset, written in
//! the host's local time; those are read in the local time zone.

use chrono::{DateTime, Duration, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::{Result, WineError};

pub const VINTAGE_RANGE: std::ops::RangeInclusive<i32> = 1900..=2100;
pub const RATING_RANGE: std::ops::RangeInclusive<i32> = 1..=10;

/// The mutable part of a wine record, as supplied by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineBase {
    pub name: String,
    #[serde(rename = "type")]
    pub wine_type: String,
    pub region: String,
    #[serde(default)]
    pub vintage: Option<i32>,
    pub rating: i32,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Reference to an uploaded photo. Not checked against the blob store.
    #[serde(default)]
    pub photo: Option<String>,
}

impl WineBase {
    pub fn new(
        name: impl Into<String>,
        wine_type: impl Into<String>,
        region: impl Into<String>,
        rating: i32,
    ) -> Self {
        Self {
            name: name.into(),
            wine_type: wine_type.into(),
            region: region.into(),
            vintage: None,
            rating,
            price: None,
            notes: None,
            photo: None,
        }
    }

    pub fn with_vintage(mut self, vintage: i32) -> Self {
        self.vintage = Some(vintage);
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_photo(mut self, photo: impl Into<String>) -> Self {
        self.photo = Some(photo.into());
        self
    }

    /// Check the field rules. The first violation wins.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(WineError::Validation("name must not be empty".to_string()));
        }
        if let Some(vintage) = self.vintage {
            if !VINTAGE_RANGE.contains(&vintage) {
                return Err(WineError::Validation(format!(
                    "vintage must be between {} and {}, got {}",
                    VINTAGE_RANGE.start(),
                    VINTAGE_RANGE.end(),
                    vintage
                )));
            }
        }
        if !RATING_RANGE.contains(&self.rating) {
            return Err(WineError::Validation(format!(
                "rating must be between {} and {}, got {}",
                RATING_RANGE.start(),
                RATING_RANGE.end(),
                self.rating
            )));
        }
        if let Some(price) = self.price {
            if !price.is_finite() || price < 0.0 {
                return Err(WineError::Validation(format!(
                    "price must be a non-negative number, got {}",
                    price
                )));
            }
        }
        Ok(())
    }
}

/// A stored wine record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    pub id: Uuid,
    #[serde(flatten)]
    pub fields: WineBase,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Wine {
    pub fn new(fields: WineBase) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            fields,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace everything except `id` and `created_at`.
    pub fn replace_fields(&mut self, fields: WineBase) {
        self.fields = fields;
        self.updated_at = next_update_time(self.updated_at);
    }

    /// Blob name of the attached photo, if any.
    pub fn photo_name(&self) -> Option<&str> {
        self.fields
            .photo
            .as_deref()
            .and_then(photo_name_from_reference)
    }
}

fn next_update_time(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

/// A photo reference may be a bare blob name or a URL ending in one.
pub fn photo_name_from_reference(reference: &str) -> Option<&str> {
    let name = reference.rsplit('/').next().unwrap_or(reference).trim();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// The durable envelope holding every record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WineCollection {
    #[serde(default, alias = "records")]
    pub wines: Vec<Wine>,
    #[serde(default = "Utc::now", deserialize_with = "deserialize_timestamp")]
    pub last_updated: DateTime<Utc>,
}

impl Default for WineCollection {
    fn default() -> Self {
        Self {
            wines: Vec::new(),
            last_updated: Utc::now(),
        }
    }
}

impl WineCollection {
    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.wines.iter().position(|w| w.id == *id)
    }

    pub fn get(&self, id: &Uuid) -> Option<&Wine> {
        self.wines.iter().find(|w| w.id == *id)
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.position(id).is_some()
    }

    /// First id that appears more than once, if any.
    pub fn duplicate_id(&self) -> Option<Uuid> {
        let mut seen = std::collections::HashSet::with_capacity(self.wines.len());
        self.wines
            .iter()
            .map(|w| w.id)
            .find(|id| !seen.insert(*id))
    }

    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }
}

/// Result of a photo upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredPhoto {
    pub filename: String,
    pub url: String,
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

/// Parse RFC 3339, falling back to a naive ISO timestamp in local time.
pub fn parse_timestamp(raw: &str) -> std::result::Result<DateTime<Utc>, String> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map_err(|e| format!("invalid timestamp {:?}: {}", raw, e))?;
    Ok(local_to_utc(naive))
}

/// A local time skipped by a DST jump has no offset; fall back to UTC there.
fn local_to_utc(naive: NaiveDateTime) -> DateTime<Utc> {
    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|ts| ts.with_timezone(&Utc))
        .unwrap_or_else(|| naive.and_utc())
}
