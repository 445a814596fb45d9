// verify-certs-core/src/interfaces/mod.rs
// ============================================================================
// Module: Verify Certs Interfaces
// Description: Host-agnostic interfaces for config, permissions, and verifiers.
// Purpose: Define the contract surfaces used by the verifier registry.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Interfaces define how Verify Certs integrates with its host without
//! embedding platform details. Handlers receive a configuration reader and a
//! principal context instead of reaching for ambient globals, which keeps the
//! dispatch loop fully testable without a live host environment.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::identifiers::HandlerId;
use crate::core::identifiers::UserId;
use crate::core::messages::MessageCatalog;
use crate::core::outcome::Verification;
use crate::core::settings::SettingDescriptor;
use crate::core::time::Timestamp;

// ============================================================================
// SECTION: Configuration Reader
// ============================================================================

/// Read access to the host's flat key-value configuration store.
///
/// Keys follow the `{shortname}_{setting}` convention; registry-level keys
/// carry no prefix. Missing keys are `None` and callers apply the documented
/// default, so configuration absence is never an error.
pub trait ConfigReader {
    /// Returns the configured boolean for `key`, when present.
    fn flag(&self, key: &str) -> Option<bool>;

    /// Returns the configured boolean for `key`, or `default` when absent.
    fn flag_or(&self, key: &str, default: bool) -> bool {
        self.flag(key).unwrap_or(default)
    }
}

/// Builds the flat configuration key for a handler-scoped setting.
#[must_use]
pub fn config_key(handler: &HandlerId, name: &str) -> String {
    format!("{handler}_{name}")
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Capabilities checked by the verification surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    /// View the verification page and submit codes.
    View,
    /// Verify any certificate regardless of template restrictions.
    VerifyAll,
}

/// Capability check against the host's permission subsystem.
pub trait PermissionChecker {
    /// Returns true when the principal holds the capability.
    fn has_capability(&self, principal: &UserId, capability: Capability) -> bool;
}

// ============================================================================
// SECTION: Verify Context
// ============================================================================

/// Request-scoped context for a single verification pass.
///
/// # Invariants
/// - `verified_at` is supplied by the host; handlers never read wall-clock
///   time.
/// - `can_verify_all` is resolved by the host before dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyContext {
    /// Principal performing the verification.
    pub principal: UserId,
    /// Instant the verification is evaluated at, used for expiry checks.
    pub verified_at: Timestamp,
    /// Whether the principal holds the verify-all capability.
    pub can_verify_all: bool,
}

// ============================================================================
// SECTION: Store Errors
// ============================================================================

/// Record store errors.
///
/// Absence of a match is never an error; stores return `Ok(None)` or an
/// empty collection for misses.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backing store reported an error.
    #[error("record store error: {0}")]
    Backend(String),
    /// Store data is invalid or fails integrity checks.
    #[error("record store invalid data: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Certificate Verifier
// ============================================================================

/// Per-certificate-type verification strategy.
///
/// Implementations are stateless beyond injected configuration and store
/// handles; the registry constructs the set once per deployment wiring.
pub trait CertificateVerifier {
    /// Returns the stable type identifier, unique across handlers.
    fn shortname(&self) -> HandlerId;

    /// Returns the human-readable label resolved from the catalog.
    ///
    /// Falls back to the shortname when no catalog entry exists.
    fn fullname(&self, catalog: &MessageCatalog) -> String {
        catalog.get(self.shortname().as_str()).to_string()
    }

    /// Returns true when the backing subsystem is wired in this deployment.
    fn is_installed(&self) -> bool;

    /// Returns true when the handler is administratively enabled.
    fn is_enabled(&self) -> bool;

    /// Returns true when non-owner viewers see identifying detail.
    fn should_display_info(&self) -> bool;

    /// Returns true when a live miss should fall through to the archive.
    fn checks_archive(&self) -> bool {
        false
    }

    /// Verifies a code against the live issuance store.
    ///
    /// Returns `Ok(None)` when the handler is not installed, not enabled, or
    /// no matching record exists.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store fails.
    fn verify(&self, code: &str, ctx: &VerifyContext) -> Result<Option<Verification>, StoreError>;

    /// Verifies a code against the archival store.
    ///
    /// The default covers handlers without an archive subsystem.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the backing store fails.
    fn verify_archive(
        &self,
        _code: &str,
        _ctx: &VerifyContext,
    ) -> Result<Option<Verification>, StoreError> {
        Ok(None)
    }

    /// Returns the settings fields this handler contributes.
    fn settings(&self) -> Vec<SettingDescriptor>;
}
