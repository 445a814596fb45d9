// verify-certs-core/src/core/time.rs
// ============================================================================
// Module: Verify Certs Time Model
// Description: Canonical timestamp representation for issue and expiry dates.
// Purpose: Provide deterministic, caller-supplied time values across records.
// Dependencies: serde, time
// ============================================================================

//! ## Overview
//! Verify Certs uses explicit time values carried in records and the verify
//! context to keep dispatch deterministic. The core never reads wall-clock
//! time directly; hosts must supply the verification instant.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use time::OffsetDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

// ============================================================================
// SECTION: Time Values
// ============================================================================

/// Canonical timestamp in unix epoch seconds.
///
/// # Invariants
/// - Values are explicitly provided by callers; the core never reads
///   wall-clock time.
/// - No validation is performed; range is a caller responsibility.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Creates a timestamp from unix epoch seconds.
    #[must_use]
    pub const fn from_unix_seconds(seconds: i64) -> Self {
        Self(seconds)
    }

    /// Returns the timestamp as unix epoch seconds.
    #[must_use]
    pub const fn as_unix_seconds(self) -> i64 {
        self.0
    }
}

impl From<i64> for Timestamp {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

// ============================================================================
// SECTION: Formatting
// ============================================================================

/// Display format for issue dates, e.g. `14 March 2026`.
const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day padding:none] [month repr:long] [year]");

/// Formats a timestamp as a human-readable date.
///
/// Out-of-range timestamps fall back to the raw seconds value so rendering
/// never fails.
#[must_use]
pub fn format_date(timestamp: Timestamp) -> String {
    let Ok(moment) = OffsetDateTime::from_unix_timestamp(timestamp.as_unix_seconds()) else {
        return timestamp.as_unix_seconds().to_string();
    };
    match moment.format(DATE_FORMAT) {
        Ok(rendered) => rendered,
        Err(_) => timestamp.as_unix_seconds().to_string(),
    }
}
