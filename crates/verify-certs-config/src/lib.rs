// verify-certs-config/src/lib.rs
// ============================================================================
// Module: Verify Certs Config Library
// Description: Configuration loading and validation for Verify Certs.
// Purpose: Expose the typed config model and the flat flag surface.
// Dependencies: crate::config
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! unknown-key rejection, then exposed to handlers through the flat
//! `{shortname}_{setting}` key surface of
//! [`verify_certs_core::ConfigReader`]. Missing values are `None`; defaults
//! live with the callers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::HandlerConfig;
pub use config::RegistryConfig;
pub use config::VerifyCertsConfig;
