//! Clock Module
//!
//! Local-clock timestamps and event identifier generation.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Local};

/// ISO-8601 layout used for every timestamp in responses and records.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Compact layout embedded in event identifiers.
const EVENT_ID_FORMAT: &str = "%Y%m%d_%H%M%S_%6f";

/// Returns the current local time as an ISO-8601 string with microseconds.
pub fn local_timestamp() -> String {
    format_iso(&Local::now())
}

fn format_iso(time: &DateTime<Local>) -> String {
    time.format(ISO_FORMAT).to_string()
}

// == Event Ids ==
/// Generates identifiers of the form `<Prefix>_<YYYYmmdd_HHMMSS_micros>_<seq>`.
///
/// The sequence number is process-wide and strictly increasing, so two ids
/// minted within the same microsecond still differ.
#[derive(Debug, Default)]
pub struct EventIds {
    sequence: AtomicU64,
}

impl EventIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints the next identifier for the given prefix.
    pub fn mint(&self, prefix: &str) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}_{}_{}", prefix, Local::now().format(EVENT_ID_FORMAT), seq)
    }
}
