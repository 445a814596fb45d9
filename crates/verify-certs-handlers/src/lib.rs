// verify-certs-handlers/src/lib.rs
// ============================================================================
// Module: Verify Certs Handlers
// Description: Built-in certificate verifier implementations.
// Purpose: Provide the closed set of certificate-type handlers and wiring.
// Dependencies: verify-certs-core
// ============================================================================

//! ## Overview
//! Three handler variants cover the known certificate subsystems: legacy
//! issuance tables, the shared course-certificate service, and the custom
//! certificate activity. Each handler receives a configuration reader and an
//! optional store handle; an unwired store marks the subsystem as not
//! installed. Hosts extend the set by implementing
//! [`verify_certs_core::CertificateVerifier`] and appending to the registry
//! input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod course;
pub mod custom;
pub mod legacy;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use verify_certs_core::CertificateVerifier;
use verify_certs_core::ConfigReader;

use crate::course::CourseCertificates;
use crate::course::SharedIssueStore;
use crate::custom::CustomCertificates;
use crate::custom::CustomIssueStore;
use crate::legacy::LegacyCertificates;
use crate::legacy::LegacyIssueStore;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use course::OWNING_COMPONENT;
pub use course::SharedIssue;
pub use custom::CustomIssue;
pub use legacy::LegacyIssue;

// ============================================================================
// SECTION: Built-in Wiring
// ============================================================================

/// Store handles for the built-in handlers.
///
/// `None` marks the backing subsystem as not installed in this deployment.
#[derive(Default)]
pub struct BuiltinStores {
    /// Legacy issuance store, when installed.
    pub legacy: Option<Arc<dyn LegacyIssueStore>>,
    /// Shared course-certificate service, when installed.
    pub shared: Option<Arc<dyn SharedIssueStore>>,
    /// Custom certificate store, when installed.
    pub custom: Option<Arc<dyn CustomIssueStore>>,
}

/// Constructs the built-in verifier set from injected stores.
///
/// The returned collection is the closed built-in set; registry discovery
/// applies the installed filter and display-name ordering.
#[must_use]
pub fn builtin_verifiers(
    config: &Arc<dyn ConfigReader>,
    stores: BuiltinStores,
) -> Vec<Box<dyn CertificateVerifier>> {
    vec![
        Box::new(LegacyCertificates::new(Arc::clone(config), stores.legacy)),
        Box::new(CourseCertificates::new(Arc::clone(config), stores.shared)),
        Box::new(CustomCertificates::new(Arc::clone(config), stores.custom)),
    ]
}
