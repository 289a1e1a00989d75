//! Progress persistence - the save record under [`PROGRESS_KEY`]
//!
//! Every helper swallows failures after logging them. Callers only learn
//! whether the operation went through.

use tap_merge_core::types::{PROGRESS_KEY, SAVE_FORMAT_VERSION};
use tap_merge_core::{SaveRecord, SaveRequest};

use crate::KeyValueStore;

/// Read the progress record
///
/// Returns `None` when nothing is stored, the store fails, the blob does not
/// decode, the record was written by a different format version, or its levels
/// are unusable (zero goals, duplicate ids).
pub fn load_progress<S: KeyValueStore + ?Sized>(store: &S) -> Option<SaveRecord> {
    let bytes = match store.get(PROGRESS_KEY) {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            log::info!("no saved progress, using default levels");
            return None;
        }
        Err(e) => {
            log::warn!("failed to read saved progress: {:#}", e);
            return None;
        }
    };

    let record = match SaveRecord::from_json(&bytes) {
        Ok(record) => record,
        Err(e) => {
            log::warn!("discarding unreadable saved progress: {}", e);
            return None;
        }
    };

    if !record.is_current() {
        log::info!(
            "discarding saved progress with version {:?} (expected {:?})",
            record.format_version,
            SAVE_FORMAT_VERSION
        );
        return None;
    }
    if !record.is_well_formed() {
        log::warn!("discarding malformed saved progress");
        return None;
    }

    log::info!("loaded saved progress ({} levels)", record.levels.len());
    Some(record)
}

/// Write the progress record. Returns whether it was stored.
pub fn save_progress<S: KeyValueStore + ?Sized>(store: &mut S, record: &SaveRecord) -> bool {
    let bytes = match record.to_json() {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!("failed to encode progress: {}", e);
            return false;
        }
    };

    match store.set(PROGRESS_KEY, &bytes) {
        Ok(()) => {
            log::info!("progress saved");
            true
        }
        Err(e) => {
            log::warn!("failed to save progress: {:#}", e);
            false
        }
    }
}

/// Delete the progress record. Returns whether the store accepted it.
pub fn clear_progress<S: KeyValueStore + ?Sized>(store: &mut S) -> bool {
    match store.remove(PROGRESS_KEY) {
        Ok(()) => {
            log::info!("saved progress cleared");
            true
        }
        Err(e) => {
            log::warn!("failed to clear saved progress: {:#}", e);
            false
        }
    }
}

/// Execute persistence work produced by the game rules
pub fn apply<S: KeyValueStore + ?Sized>(store: &mut S, request: &SaveRequest) -> bool {
    match request {
        SaveRequest::Save(record) => save_progress(store, record),
        SaveRequest::Clear => clear_progress(store),
    }
}
