// verify-certs-handlers/src/course.rs
// ============================================================================
// Module: Course Certificate Handler
// Description: Verifier delegating to the shared course-certificate service.
// Purpose: Match codes via the shared issuance service with expiry handling.
// Dependencies: verify-certs-core, serde
// ============================================================================

//! ## Overview
//! The course handler delegates verification to a shared certificate-issuance
//! service and accepts only issues owned by the course-certificate component.
//! Expiry is respected at verification time: an expiry of zero (or none)
//! never expires. The shared service retains archived records itself, so the
//! archive pass re-runs the live verification.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use verify_certs_core::CertificateRecord;
use verify_certs_core::CertificateVerifier;
use verify_certs_core::ConfigReader;
use verify_certs_core::CourseId;
use verify_certs_core::HandlerId;
use verify_certs_core::SettingDescriptor;
use verify_certs_core::SettingKind;
use verify_certs_core::StoreError;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_core::Verdict;
use verify_certs_core::Verification;
use verify_certs_core::VerifyContext;
use verify_certs_core::base_settings;
use verify_certs_core::config_key;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Component tag the shared service records for course-certificate issues.
pub const OWNING_COMPONENT: &str = "course_certificates";

// ============================================================================
// SECTION: Issue Record
// ============================================================================

/// Issue returned by the shared certificate-issuance service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedIssue {
    /// Verification code.
    pub code: String,
    /// Identifier of the certificate holder.
    pub holder: UserId,
    /// Display name of the certificate holder.
    pub holder_name: String,
    /// Identifier of the issuing course.
    pub course: CourseId,
    /// Full name of the issuing course.
    pub course_name: String,
    /// Issue timestamp recorded by the service.
    pub issued_at: Timestamp,
    /// Expiry timestamp; `None` or zero means the issue never expires.
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// Component that owns the issue within the shared service.
    pub component: String,
}

// ============================================================================
// SECTION: Store Contract
// ============================================================================

/// Verification access to the shared certificate-issuance service.
pub trait SharedIssueStore {
    /// Resolves a code through the service's verification routine.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn verify_code(&self, code: &str) -> Result<Option<SharedIssue>, StoreError>;
}

// ============================================================================
// SECTION: Handler Implementation
// ============================================================================

/// Verifier for course certificates issued through the shared service.
pub struct CourseCertificates {
    /// Host configuration reader.
    config: Arc<dyn ConfigReader>,
    /// Backing service; `None` when the subsystem is not installed.
    store: Option<Arc<dyn SharedIssueStore>>,
}

impl CourseCertificates {
    /// Stable type identifier for this handler.
    pub const SHORTNAME: &'static str = "course";

    /// Creates the handler with injected configuration and service handle.
    #[must_use]
    pub const fn new(
        config: Arc<dyn ConfigReader>,
        store: Option<Arc<dyn SharedIssueStore>>,
    ) -> Self {
        Self {
            config,
            store,
        }
    }

    /// Reads a handler-scoped configuration flag with its default.
    fn flag(&self, name: &str, default: bool) -> bool {
        self.config.flag_or(&config_key(&self.shortname(), name), default)
    }

    /// Returns true when the issue is expired at the verification instant.
    fn is_expired(issue: &SharedIssue, verified_at: Timestamp) -> bool {
        match issue.expires_at {
            Some(expires) => expires.as_unix_seconds() != 0 && expires < verified_at,
            None => false,
        }
    }
}

impl CertificateVerifier for CourseCertificates {
    fn shortname(&self) -> HandlerId {
        HandlerId::new(Self::SHORTNAME)
    }

    fn is_installed(&self) -> bool {
        self.store.is_some()
    }

    fn is_enabled(&self) -> bool {
        self.flag("enabled", true)
    }

    fn should_display_info(&self) -> bool {
        self.flag("displayinfo", true)
    }

    fn checks_archive(&self) -> bool {
        // The shared service keeps archived records queryable through the
        // same verification routine; there is no way to disable this.
        true
    }

    fn verify(&self, code: &str, ctx: &VerifyContext) -> Result<Option<Verification>, StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(None);
        };
        if !self.is_enabled() {
            return Ok(None);
        }

        let Some(issue) = store.verify_code(code)? else {
            return Ok(None);
        };
        if issue.component != OWNING_COMPONENT || Self::is_expired(&issue, ctx.verified_at) {
            return Ok(None);
        }

        let record = CertificateRecord {
            code: issue.code,
            holder: issue.holder,
            holder_name: issue.holder_name,
            course: issue.course,
            course_name: issue.course_name,
            issued_at: issue.issued_at,
        };
        Ok(Some(Verification::disclose(
            &record,
            ctx,
            self.should_display_info(),
            Verdict::Valid,
            self.shortname(),
        )))
    }

    fn verify_archive(
        &self,
        code: &str,
        ctx: &VerifyContext,
    ) -> Result<Option<Verification>, StoreError> {
        self.verify(code, ctx)
    }

    fn settings(&self) -> Vec<SettingDescriptor> {
        let shortname = self.shortname();
        let mut settings = base_settings(&shortname);
        settings.push(SettingDescriptor {
            key: config_key(&shortname, "displayinfo"),
            label_key: "displayinfo".to_string(),
            help_key: Some("displayinfo_help".to_string()),
            kind: SettingKind::Checkbox {
                default: true,
            },
        });
        settings
    }
}
