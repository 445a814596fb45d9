// verify-certs-core/src/core/messages.rs
// ============================================================================
// Module: Verify Certs Message Catalog
// Description: Translation catalog for handler names and result strings.
// Purpose: Centralize user-facing strings with fallback-to-key semantics.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Handler full names and verification result strings resolve through a small
//! translation catalog keyed by stable string identifiers. Missing keys fall
//! back to the key itself so lookups never fail; a handler without a catalog
//! entry is therefore labeled by its shortname.
//!
//! ## Invariants
//! - The built-in catalog is initialized once and read-only thereafter.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A formatted message argument substituted into `{placeholder}` positions.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"holder"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static catalog entries for handler names and verification results.
const CATALOG_ITEMS: &[(&str, &str)] = &[
    ("legacy", "Legacy certificates"),
    ("course", "Course certificates"),
    ("custom", "Custom certificates"),
    ("validcertificate", "This certificate is valid"),
    ("validcertificatearchived", "This certificate is valid (archived record)"),
    ("expiredcertificate", "This certificate has expired"),
    ("awardedto", "Awarded to: {holder}"),
    ("coursename", "Course: {course}"),
    ("issueddate", "Date issued: {issued}"),
    ("enabled", "Enabled"),
    ("enabled_help", "If enabled, this certificate type is included in the verification process."),
    ("displayinfo", "Display extra information"),
    (
        "displayinfo_help",
        "Display holder full name, course and date of issue when verified by a user who does not \
         own the certificate. Otherwise only the fact of verification is displayed.",
    ),
    ("checkarchive", "Check archived records"),
    (
        "checkarchive_help",
        "If enabled, archived records are checked as part of the verification process.",
    ),
    ("matchprintdate", "Match print date setting"),
    (
        "matchprintdate_help",
        "If enabled, the issue date follows the print date setting of the issuing activity. \
         Otherwise the date issued is displayed.",
    ),
    ("bypassverifyany", "Allow to verify any certificate"),
    (
        "bypassverifyany_help",
        "Enables verification of any available certificate, bypassing the issuing template's \
         verify-any restriction. Archived records are always available for verification.",
    ),
];

/// Message catalog with fallback-to-key lookup.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog;

impl MessageCatalog {
    /// Returns the catalog backed by the built-in English entries.
    #[must_use]
    pub const fn builtin() -> Self {
        Self
    }

    /// Resolves `key` to its template, falling back to the key itself.
    #[must_use]
    pub fn get<'a>(&self, key: &'a str) -> &'a str {
        entries().get(key).copied().unwrap_or(key)
    }

    /// Resolves `key` and substitutes `args` into `{placeholder}` positions.
    #[must_use]
    pub fn format(&self, key: &str, args: &[MessageArg]) -> String {
        let template = self.get(key);
        if args.is_empty() {
            return template.to_string();
        }

        let mut result = template.to_string();
        for arg in args {
            let placeholder = format!("{{{}}}", arg.key);
            result = result.replace(&placeholder, &arg.value);
        }
        result
    }
}

/// Returns the static entry map shared by all catalog instances.
fn entries() -> &'static HashMap<&'static str, &'static str> {
    static ENTRIES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

    ENTRIES.get_or_init(|| CATALOG_ITEMS.iter().copied().collect())
}
