// verify-certs-core/src/core/record.rs
// ============================================================================
// Module: Verify Certs Record Model
// Description: Normalized view of an issued certificate record.
// Purpose: Provide the common denominator handlers hand to disclosure.
// Dependencies: crate::core::{identifiers, time}, serde
// ============================================================================

//! ## Overview
//! Issued certificate records are owned by external subsystems and read-only
//! from this crate's perspective. Handlers normalize their subsystem-specific
//! rows into [`CertificateRecord`] before applying the disclosure policy.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::CourseId;
use crate::core::identifiers::UserId;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Record Types
// ============================================================================

/// Normalized issued certificate record.
///
/// # Invariants
/// - `code` identifies at most one active record within the owning subsystem;
///   duplicate rows are resolved by the handler before this type is built.
/// - `issued_at` is the date selected for display, after any print-date
///   substitution the handler applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateRecord {
    /// Verification code the record was matched on.
    pub code: String,
    /// Identifier of the certificate holder.
    pub holder: UserId,
    /// Display name of the certificate holder.
    pub holder_name: String,
    /// Identifier of the issuing course context.
    pub course: CourseId,
    /// Full name of the issuing course context.
    pub course_name: String,
    /// Issue date selected for display.
    pub issued_at: Timestamp,
}
