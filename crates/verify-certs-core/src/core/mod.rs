// verify-certs-core/src/core/mod.rs
// ============================================================================
// Module: Verify Certs Core Types
// Description: Canonical record, outcome, and catalog structures.
// Purpose: Provide stable, serializable types shared by handlers and hosts.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Core types define certificate records, verification outcomes, the message
//! catalog, and the settings descriptors handlers contribute to the admin
//! surface. These types are the canonical source of truth for any derived
//! rendering (page, CLI, or API).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod identifiers;
pub mod messages;
pub mod outcome;
pub mod record;
pub mod settings;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use identifiers::CourseId;
pub use identifiers::HandlerId;
pub use identifiers::UserId;
pub use messages::MessageArg;
pub use messages::MessageCatalog;
pub use outcome::CertificateDetail;
pub use outcome::Verdict;
pub use outcome::Verification;
pub use outcome::VerificationOutcome;
pub use record::CertificateRecord;
pub use settings::SettingDescriptor;
pub use settings::SettingKind;
pub use settings::base_settings;
pub use time::Timestamp;
pub use time::format_date;
