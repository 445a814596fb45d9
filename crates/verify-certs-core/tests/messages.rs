// verify-certs-core/tests/messages.rs
// ============================================================================
// Module: Message Catalog Tests
// Description: Validate catalog lookup, fallback, and substitution.
// Purpose: Ensure name resolution and templating behave deterministically.
// Dependencies: verify-certs-core
// ============================================================================
//! ## Overview
//! Covers fallback-to-key lookup, placeholder substitution, and the default
//! fullname resolution of the verifier contract.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use verify_certs_core::CertificateVerifier;
use verify_certs_core::MessageArg;
use verify_certs_core::MessageCatalog;

use crate::common::StaticVerifier;

// ============================================================================
// SECTION: Lookup
// ============================================================================

#[test]
fn known_keys_resolve_to_templates() {
    let catalog = MessageCatalog::builtin();
    assert_eq!(catalog.get("validcertificate"), "This certificate is valid");
    assert_eq!(catalog.get("legacy"), "Legacy certificates");
}

#[test]
fn unknown_keys_fall_back_to_the_key() {
    let catalog = MessageCatalog::builtin();
    assert_eq!(catalog.get("nosuchkey"), "nosuchkey");
}

#[test]
fn format_substitutes_placeholders() {
    let catalog = MessageCatalog::builtin();
    let rendered = catalog.format("awardedto", &[MessageArg::new("holder", "Jo Bloggs")]);
    assert_eq!(rendered, "Awarded to: Jo Bloggs");
}

#[test]
fn format_without_args_returns_template() {
    let catalog = MessageCatalog::builtin();
    assert_eq!(catalog.format("expiredcertificate", &[]), "This certificate has expired");
}

// ============================================================================
// SECTION: Fullname Resolution
// ============================================================================

#[test]
fn fullname_resolves_through_catalog() {
    let catalog = MessageCatalog::builtin();
    let verifier = StaticVerifier::new("legacy");
    assert_eq!(verifier.fullname(&catalog), "Legacy certificates");
}

#[test]
fn untranslated_fullname_falls_back_to_shortname() {
    let catalog = MessageCatalog::builtin();
    let verifier = StaticVerifier::new("thirdparty");
    assert_eq!(verifier.fullname(&catalog), "thirdparty");
}
