// verify-certs-core/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared test utilities and fixtures for core tests.
// Purpose: Provide reusable verifier doubles and deterministic contexts.
// Dependencies: verify-certs-core
// ============================================================================

//! ## Overview
//! This module provides a configurable verifier double, a map-backed config
//! reader, and deterministic verify contexts for use across core test files.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use verify_certs_core::CertificateVerifier;
use verify_certs_core::ConfigReader;
use verify_certs_core::HandlerId;
use verify_certs_core::SettingDescriptor;
use verify_certs_core::StoreError;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_core::Verdict;
use verify_certs_core::Verification;
use verify_certs_core::VerifyContext;
use verify_certs_core::base_settings;

// ============================================================================
// SECTION: Contexts
// ============================================================================

/// Creates a deterministic verify context for testing.
#[must_use]
pub fn sample_context() -> VerifyContext {
    VerifyContext {
        principal: UserId::new("viewer"),
        verified_at: Timestamp::from_unix_seconds(1_700_000_000),
        can_verify_all: false,
    }
}

// ============================================================================
// SECTION: Config Double
// ============================================================================

/// Map-backed configuration reader.
#[derive(Debug, Clone, Default)]
pub struct MapConfig {
    /// Configured flags keyed by flat configuration key.
    flags: BTreeMap<String, bool>,
}

impl MapConfig {
    /// Creates an empty configuration where every read falls to defaults.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Sets a flat configuration flag.
    #[must_use]
    pub fn with_flag(mut self, key: &str, value: bool) -> Self {
        self.flags.insert(key.to_string(), value);
        self
    }
}

impl ConfigReader for MapConfig {
    fn flag(&self, key: &str) -> Option<bool> {
        self.flags.get(key).copied()
    }
}

// ============================================================================
// SECTION: Verifier Double
// ============================================================================

/// Configurable verifier double for registry tests.
pub struct StaticVerifier {
    /// Stable type identifier.
    pub shortname: &'static str,
    /// Whether the backing subsystem is installed.
    pub installed: bool,
    /// Whether the handler is enabled.
    pub enabled: bool,
    /// Whether a live miss falls through to the archive.
    pub checks_archive: bool,
    /// Codes matched by the live lookup.
    pub live: Vec<(&'static str, Verdict)>,
    /// Codes matched by the archive lookup.
    pub archived: Vec<&'static str>,
    /// Error returned by every live lookup, when set.
    pub fails: bool,
}

impl StaticVerifier {
    /// Creates an installed, enabled verifier with no matches.
    #[must_use]
    pub fn new(shortname: &'static str) -> Self {
        Self {
            shortname,
            installed: true,
            enabled: true,
            checks_archive: false,
            live: Vec::new(),
            archived: Vec::new(),
            fails: false,
        }
    }

    /// Marks the backing subsystem as not installed.
    #[must_use]
    pub fn not_installed(mut self) -> Self {
        self.installed = false;
        self
    }

    /// Disables the handler.
    #[must_use]
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Adds a live match for the code.
    #[must_use]
    pub fn with_live(mut self, code: &'static str) -> Self {
        self.live.push((code, Verdict::Valid));
        self
    }

    /// Adds an archive match for the code and enables archive checking.
    #[must_use]
    pub fn with_archived(mut self, code: &'static str) -> Self {
        self.checks_archive = true;
        self.archived.push(code);
        self
    }

    /// Makes every live lookup fail with a store error.
    #[must_use]
    pub fn failing(mut self) -> Self {
        self.fails = true;
        self
    }

    /// Builds a verification hit attributed to this verifier.
    fn hit(&self, verdict: Verdict) -> Verification {
        Verification {
            verdict,
            handler: HandlerId::new(self.shortname),
            detail: None,
        }
    }
}

impl CertificateVerifier for StaticVerifier {
    fn shortname(&self) -> HandlerId {
        HandlerId::new(self.shortname)
    }

    fn is_installed(&self) -> bool {
        self.installed
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn should_display_info(&self) -> bool {
        true
    }

    fn checks_archive(&self) -> bool {
        self.checks_archive
    }

    fn verify(&self, code: &str, _ctx: &VerifyContext) -> Result<Option<Verification>, StoreError> {
        if self.fails {
            return Err(StoreError::Backend("lookup failed".to_string()));
        }
        Ok(self
            .live
            .iter()
            .find(|(candidate, _)| *candidate == code)
            .map(|(_, verdict)| self.hit(*verdict)))
    }

    fn verify_archive(
        &self,
        code: &str,
        _ctx: &VerifyContext,
    ) -> Result<Option<Verification>, StoreError> {
        Ok(self
            .archived
            .iter()
            .find(|candidate| **candidate == code)
            .map(|_| self.hit(Verdict::ValidArchived)))
    }

    fn settings(&self) -> Vec<SettingDescriptor> {
        base_settings(&self.shortname())
    }
}
