// verify-certs-cli/tests/verify_flow.rs
// ============================================================================
// Module: Verification Flow Tests
// Description: End-to-end dispatch over snapshot-backed stores and config.
// Purpose: Exercise the full wiring the verify subcommand performs.
// Dependencies: verify-certs-cli, verify-certs-config, verify-certs-core
// ============================================================================
//! ## Overview
//! Builds the registry exactly as the CLI does (TOML config plus JSON
//! snapshot) and checks the externally observable properties: rendered
//! results, disclosure, disabling, and archive fallback.

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

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;
use verify_certs_cli::snapshot::Snapshot;
use verify_certs_cli::snapshot::SnapshotPermissions;
use verify_certs_config::VerifyCertsConfig;
use verify_certs_core::Capability;
use verify_certs_core::ConfigReader;
use verify_certs_core::MessageCatalog;
use verify_certs_core::PermissionChecker;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_core::Verdict;
use verify_certs_core::VerifierRegistry;
use verify_certs_core::VerifyContext;
use verify_certs_handlers::builtin_verifiers;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Deployment snapshot with live, archived, and restricted records.
const SNAPSHOT: &str = r#"{
    "legacy": {
        "issues": [{
            "code": "LEGACY1",
            "holder": "holder",
            "holder_name": "Jo Bloggs",
            "course": "c1",
            "course_name": "Rust 101",
            "issued_at": 1600000000
        }],
        "archive": [{
            "code": "OLDCODE1",
            "holder": "holder",
            "holder_name": "Jo Bloggs",
            "course": "c1",
            "course_name": "Rust 101",
            "issued_at": 1500000000
        }]
    },
    "custom": {
        "issues": [{
            "code": "CUSTOM1",
            "holder": "holder",
            "holder_name": "Jo Bloggs",
            "course": "c1",
            "course_name": "Rust 101",
            "issued_at": 1600000000,
            "verify_any": false
        }]
    },
    "principals": {
        "auditor": { "capabilities": ["view", "verify_all"] }
    }
}"#;

/// Builds the registry and permissions the way the verify subcommand does.
fn wire(config_toml: &str) -> (VerifierRegistry, SnapshotPermissions) {
    let mut config_file = NamedTempFile::new().expect("temp config");
    config_file.write_all(config_toml.as_bytes()).expect("write config");
    let config = VerifyCertsConfig::load(config_file.path()).expect("load config");

    let mut snapshot_file = NamedTempFile::new().expect("temp snapshot");
    snapshot_file.write_all(SNAPSHOT.as_bytes()).expect("write snapshot");
    let snapshot = Snapshot::load(snapshot_file.path()).expect("load snapshot");

    let (stores, permissions) = snapshot.split();
    let config: Arc<dyn ConfigReader> = Arc::new(config);
    let registry =
        VerifierRegistry::discover(builtin_verifiers(&config, stores), MessageCatalog::builtin());
    (registry, permissions)
}

/// Builds a context for the principal, resolving capabilities as the CLI does.
fn context(principal: &str, permissions: &SnapshotPermissions) -> VerifyContext {
    let principal = UserId::new(principal);
    VerifyContext {
        can_verify_all: permissions.has_capability(&principal, Capability::VerifyAll),
        principal,
        verified_at: Timestamp::from_unix_seconds(1_700_000_000),
    }
}

// ============================================================================
// SECTION: Flow
// ============================================================================

#[test]
fn live_code_renders_valid_with_detail() {
    let (registry, permissions) = wire("");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("LEGACY1", &ctx).unwrap();
    assert!(rendered.starts_with("This certificate is valid"));
    assert!(rendered.contains("Awarded to: Jo Bloggs"));
    assert!(rendered.contains("Course: Rust 101"));
    assert!(rendered.contains("Date issued: 13 September 2020"));
}

#[test]
fn unknown_code_renders_expired() {
    let (registry, permissions) = wire("");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("NOSUCHCODE", &ctx).unwrap();
    assert_eq!(rendered, "This certificate has expired");
}

#[test]
fn archived_code_falls_through_to_the_archive() {
    let (registry, permissions) = wire("");
    let ctx = context("viewer", &permissions);

    let outcome = registry.verify("OLDCODE1", &ctx).unwrap();
    assert_eq!(outcome.verification().unwrap().verdict, Verdict::ValidArchived);
}

#[test]
fn disabling_the_archive_hides_archived_codes() {
    let (registry, permissions) = wire("[handlers.legacy]\ncheckarchive = false\n");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("OLDCODE1", &ctx).unwrap();
    assert_eq!(rendered, "This certificate has expired");
}

#[test]
fn disabled_handler_renders_expired_for_its_codes() {
    let (registry, permissions) = wire("[handlers.legacy]\nenabled = false\n");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("LEGACY1", &ctx).unwrap();
    assert_eq!(rendered, "This certificate has expired");
}

#[test]
fn display_info_off_renders_bare_confirmation_for_non_owner() {
    let (registry, permissions) = wire("[handlers.legacy]\ndisplayinfo = false\n");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("LEGACY1", &ctx).unwrap();
    assert_eq!(rendered, "This certificate is valid");
}

#[test]
fn display_info_off_still_details_for_the_holder() {
    let (registry, permissions) = wire("[handlers.legacy]\ndisplayinfo = false\n");
    let ctx = context("holder", &permissions);

    let rendered = registry.verify_rendered("LEGACY1", &ctx).unwrap();
    assert!(rendered.contains("Awarded to: Jo Bloggs"));
}

// ============================================================================
// SECTION: Verify-Any Policy
// ============================================================================

#[test]
fn restricted_custom_code_is_expired_without_privileges() {
    let (registry, permissions) = wire("[handlers.custom]\nbypassverifyany = false\n");
    let ctx = context("viewer", &permissions);

    let rendered = registry.verify_rendered("CUSTOM1", &ctx).unwrap();
    assert_eq!(rendered, "This certificate has expired");
}

#[test]
fn verify_all_capability_resolves_restricted_codes() {
    let (registry, permissions) = wire("[handlers.custom]\nbypassverifyany = false\n");
    let ctx = context("auditor", &permissions);

    let outcome = registry.verify("CUSTOM1", &ctx).unwrap();
    assert_eq!(outcome.verification().unwrap().verdict, Verdict::Valid);
}

#[test]
fn bypass_default_resolves_restricted_codes() {
    let (registry, permissions) = wire("");
    let ctx = context("viewer", &permissions);

    let outcome = registry.verify("CUSTOM1", &ctx).unwrap();
    assert!(outcome.verification().is_some());
}
