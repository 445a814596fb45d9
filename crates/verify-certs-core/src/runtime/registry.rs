// verify-certs-core/src/runtime/registry.rs
// ============================================================================
// Module: Verifier Registry
// Description: Discovery, ordering, and dispatch over certificate verifiers.
// Purpose: Try each installed, enabled handler until one matches the code.
// Dependencies: crate::{core, interfaces}
// ============================================================================

//! ## Overview
//! The registry holds a fixed set of verifier implementations supplied at
//! construction, retains those whose backing subsystem is installed, and
//! sorts them by display name. Dispatch walks the sorted set, skipping
//! disabled handlers, and short-circuits on the first hit; a live miss falls
//! through to the handler's archive when archive checking is enabled.
//!
//! Every miss renders identically as an expired certificate. Disabled
//! handlers, absent subsystems, and unknown codes are deliberately
//! indistinguishable so the result never reveals which certificate types
//! exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::core::messages::MessageArg;
use crate::core::messages::MessageCatalog;
use crate::core::outcome::Verdict;
use crate::core::outcome::VerificationOutcome;
use crate::interfaces::CertificateVerifier;
use crate::interfaces::StoreError;
use crate::interfaces::VerifyContext;

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Ordered collection of installed certificate verifiers.
pub struct VerifierRegistry {
    /// Installed verifiers, sorted lexicographically by full name.
    verifiers: Vec<Box<dyn CertificateVerifier>>,
    /// Catalog used for name resolution and outcome rendering.
    catalog: MessageCatalog,
}

impl VerifierRegistry {
    /// Builds a registry from the supplied verifier set.
    ///
    /// Verifiers whose backing subsystem is not installed are dropped; the
    /// remainder is sorted by full display name.
    #[must_use]
    pub fn discover(verifiers: Vec<Box<dyn CertificateVerifier>>, catalog: MessageCatalog) -> Self {
        let mut verifiers: Vec<Box<dyn CertificateVerifier>> =
            verifiers.into_iter().filter(|verifier| verifier.is_installed()).collect();
        verifiers.sort_by_key(|verifier| verifier.fullname(&catalog));
        Self {
            verifiers,
            catalog,
        }
    }

    /// Returns the installed verifiers in registry order.
    #[must_use]
    pub fn verifiers(&self) -> &[Box<dyn CertificateVerifier>] {
        &self.verifiers
    }

    /// Returns the catalog used by this registry.
    #[must_use]
    pub const fn catalog(&self) -> &MessageCatalog {
        &self.catalog
    }

    /// Resolves a code to a verification outcome.
    ///
    /// Iterates installed handlers in registry order, skipping disabled
    /// ones. A live miss falls through to the handler's archive when the
    /// handler checks archives. The first hit wins; matches in later
    /// handlers are never aggregated.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a handler's backing store fails.
    pub fn verify(
        &self,
        code: &str,
        ctx: &VerifyContext,
    ) -> Result<VerificationOutcome, StoreError> {
        for verifier in &self.verifiers {
            if !verifier.is_enabled() {
                continue;
            }

            if let Some(verification) = verifier.verify(code, ctx)? {
                return Ok(VerificationOutcome::Verified(verification));
            }

            if verifier.checks_archive()
                && let Some(verification) = verifier.verify_archive(code, ctx)?
            {
                return Ok(VerificationOutcome::Verified(verification));
            }
        }

        Ok(VerificationOutcome::Expired)
    }

    /// Renders an outcome as the opaque markup string shown to the viewer.
    ///
    /// A miss renders as the fixed expired notice; a hit renders the
    /// validity notification, followed by the detail block when disclosure
    /// included one.
    #[must_use]
    pub fn render(&self, outcome: &VerificationOutcome) -> String {
        let Some(verification) = outcome.verification() else {
            return self.catalog.format("expiredcertificate", &[]);
        };

        let status_key = match verification.verdict {
            Verdict::Valid => "validcertificate",
            Verdict::ValidArchived => "validcertificatearchived",
        };
        let mut rendered = self.catalog.format(status_key, &[]);

        if let Some(detail) = &verification.detail {
            let lines = [
                self.catalog
                    .format("awardedto", &[MessageArg::new("holder", detail.holder_name.clone())]),
                self.catalog
                    .format("coursename", &[MessageArg::new("course", detail.course_name.clone())]),
                self.catalog
                    .format("issueddate", &[MessageArg::new("issued", detail.issued_on.clone())]),
            ];
            for line in lines {
                rendered.push('\n');
                rendered.push_str(&line);
            }
        }

        rendered
    }

    /// Resolves a code and renders the outcome in one pass.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when a handler's backing store fails.
    pub fn verify_rendered(&self, code: &str, ctx: &VerifyContext) -> Result<String, StoreError> {
        let outcome = self.verify(code, ctx)?;
        Ok(self.render(&outcome))
    }
}
