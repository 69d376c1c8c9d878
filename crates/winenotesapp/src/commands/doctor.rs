//! Orphaned photo detection.
//!
//! Photos are uploaded before a wine references them, and an update can swap
//! a wine's photo for another one. Either way a blob can end up referenced by
//! nothing. `doctor` finds those blobs and, when asked, deletes them.
//!
//! Sweeping while uploads are in flight can remove a photo whose wine has not
//! been saved yet, so `fix` is meant for offline maintenance.

use crate::commands::CmdMessage;
use crate::error::Result;
use crate::store::backend::StorageBackend;
use crate::store::records::RecordStore;
use std::collections::HashSet;

#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Blobs no wine references.
    pub orphaned_photos: Vec<String>,
    /// Orphans that were deleted (only with `fix`).
    pub removed_photos: usize,
    /// Wines whose photo reference points at nothing.
    pub dangling_references: usize,
    /// Files in the uploads directory that are not photos. Never removed.
    pub unrecognized_files: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DoctorResult {
    pub report: DoctorReport,
    pub messages: Vec<CmdMessage>,
}

pub fn run<B: StorageBackend>(store: &RecordStore<B>, fix: bool) -> Result<DoctorResult> {
    let wines = store.list()?;
    let stored: HashSet<String> = store.blobs().list()?.into_iter().collect();

    let referenced: HashSet<&str> = wines.iter().filter_map(|w| w.photo_name()).collect();

    let mut report = DoctorReport {
        dangling_references: referenced
            .iter()
            .filter(|name| !stored.contains(**name))
            .count(),
        unrecognized_files: store.blobs().unrecognized()?,
        ..Default::default()
    };
    let mut orphans: Vec<String> = stored
        .iter()
        .filter(|name| !referenced.contains(name.as_str()))
        .cloned()
        .collect();
    orphans.sort();

    let mut messages = Vec::new();
    if fix {
        for name in &orphans {
            match store.blobs().delete(name) {
                Ok(()) => report.removed_photos += 1,
                Err(e) => {
                    tracing::warn!(photo = %name, error = %e, "could not remove orphaned photo");
                    messages.push(CmdMessage::error(format!(
                        "  - Could not remove {}: {}",
                        name, e
                    )));
                }
            }
        }
    }
    report.orphaned_photos = orphans;

    if report.orphaned_photos.is_empty()
        && report.dangling_references == 0
        && report.unrecognized_files.is_empty()
    {
        messages.insert(0, CmdMessage::success("No inconsistencies found."));
        return Ok(DoctorResult { report, messages });
    }

    let mut summary = vec![CmdMessage::warning("Inconsistencies found:")];
    if !report.orphaned_photos.is_empty() {
        summary.push(CmdMessage::info(format!(
            "  - {} photo(s) not referenced by any wine.",
            report.orphaned_photos.len()
        )));
    }
    if report.removed_photos > 0 {
        summary.push(CmdMessage::success(format!(
            "  - Removed {} orphaned photo(s).",
            report.removed_photos
        )));
    }
    if report.dangling_references > 0 {
        summary.push(CmdMessage::info(format!(
            "  - {} wine(s) reference a missing photo.",
            report.dangling_references
        )));
    }
    if !report.unrecognized_files.is_empty() {
        summary.push(CmdMessage::info(format!(
            "  - {} file(s) in uploads are not photos and were left alone.",
            report.unrecognized_files.len()
        )));
    }
    summary.extend(messages);

    Ok(DoctorResult {
        report,
        messages: summary,
    })
}
