// verify-certs-core/src/core/outcome.rs
// ============================================================================
// Module: Verify Certs Outcome Model
// Description: Verification verdicts, detail payloads, and disclosure.
// Purpose: Define the result surface returned by handlers and the registry.
// Dependencies: crate::core::{identifiers, record, time}, serde
// ============================================================================

//! ## Overview
//! A handler hit is a [`Verification`]: a verdict plus optional identifying
//! detail. Detail presence is governed by the disclosure rule: the record's
//! own holder always sees full detail; other viewers see it only when the
//! handler's display-info flag is enabled. The registry wraps the first hit
//! (or the absence of one) into a [`VerificationOutcome`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::HandlerId;
use crate::core::record::CertificateRecord;
use crate::core::time::format_date;
use crate::interfaces::VerifyContext;

// ============================================================================
// SECTION: Verdicts
// ============================================================================

/// Classification of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The code matched a live issued record.
    Valid,
    /// The code matched an archived record retained after recompletion.
    ValidArchived,
}

// ============================================================================
// SECTION: Detail Payload
// ============================================================================

/// Identifying detail disclosed alongside a valid verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDetail {
    /// Display name of the certificate holder.
    pub holder_name: String,
    /// Full name of the issuing course context.
    pub course_name: String,
    /// Formatted issue date.
    pub issued_on: String,
}

// ============================================================================
// SECTION: Verification
// ============================================================================

/// A single handler's successful verification of a code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verification {
    /// Verdict classification.
    pub verdict: Verdict,
    /// Handler that produced the hit.
    pub handler: HandlerId,
    /// Identifying detail, absent when disclosure withheld it.
    pub detail: Option<CertificateDetail>,
}

impl Verification {
    /// Builds a verification from a normalized record, applying disclosure.
    ///
    /// Detail is included when the verifying principal is the record's holder
    /// or when `display_info` is enabled for the handler.
    #[must_use]
    pub fn disclose(
        record: &CertificateRecord,
        ctx: &VerifyContext,
        display_info: bool,
        verdict: Verdict,
        handler: HandlerId,
    ) -> Self {
        let is_holder = ctx.principal == record.holder;
        let detail = (is_holder || display_info).then(|| CertificateDetail {
            holder_name: record.holder_name.clone(),
            course_name: record.course_name.clone(),
            issued_on: format_date(record.issued_at),
        });
        Self {
            verdict,
            handler,
            detail,
        }
    }
}

// ============================================================================
// SECTION: Outcome
// ============================================================================

/// Final outcome of a dispatch pass over all handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// A handler matched the code.
    Verified(Verification),
    /// No enabled, installed handler matched the code.
    Expired,
}

impl VerificationOutcome {
    /// Returns the verification hit when present.
    #[must_use]
    pub const fn verification(&self) -> Option<&Verification> {
        match self {
            Self::Verified(verification) => Some(verification),
            Self::Expired => None,
        }
    }
}
