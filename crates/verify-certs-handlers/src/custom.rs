// verify-certs-handlers/src/custom.rs
// ============================================================================
// Module: Custom Certificate Handler
// Description: Verifier for the custom certificate activity subsystem.
// Purpose: Match codes in the custom issuance table under verify-any policy.
// Dependencies: verify-certs-core, serde
// ============================================================================

//! ## Overview
//! The custom handler queries the custom certificate activity's own issuance
//! table. Verification is restricted to issues whose template is flagged
//! verify-any; the bypass configuration flag or the verify-all capability
//! lifts the restriction. Archived records are always verifiable once
//! archive checking applies.

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
// SECTION: Issue Record
// ============================================================================

/// Row from the custom certificate issuance table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomIssue {
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
    /// Issue timestamp recorded by the subsystem.
    pub issued_at: Timestamp,
    /// Whether the issuing template permits verification by anyone.
    #[serde(default)]
    pub verify_any: bool,
}

// ============================================================================
// SECTION: Store Contract
// ============================================================================

/// Read access to the custom certificate subsystem.
pub trait CustomIssueStore {
    /// Returns the live issue matching the code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_issue(&self, code: &str) -> Result<Option<CustomIssue>, StoreError>;

    /// Returns the archived issue matching the code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn archived_issue(&self, _code: &str) -> Result<Option<CustomIssue>, StoreError> {
        Ok(None)
    }

    /// Returns true when the archive subsystem is present.
    fn has_archive(&self) -> bool {
        false
    }
}

// ============================================================================
// SECTION: Handler Implementation
// ============================================================================

/// Verifier for the custom certificate subsystem.
pub struct CustomCertificates {
    /// Host configuration reader.
    config: Arc<dyn ConfigReader>,
    /// Backing store; `None` when the subsystem is not installed.
    store: Option<Arc<dyn CustomIssueStore>>,
}

impl CustomCertificates {
    /// Stable type identifier for this handler.
    pub const SHORTNAME: &'static str = "custom";

    /// Creates the handler with injected configuration and store.
    #[must_use]
    pub const fn new(
        config: Arc<dyn ConfigReader>,
        store: Option<Arc<dyn CustomIssueStore>>,
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

    /// Returns true when policy permits verifying this issue.
    ///
    /// Live issues require the template's verify-any flag, the bypass
    /// setting, or the verify-all capability.
    fn may_verify(&self, issue: &CustomIssue, ctx: &VerifyContext) -> bool {
        issue.verify_any || self.flag("bypassverifyany", true) || ctx.can_verify_all
    }

    /// Builds the verification for a matched issue.
    fn conclude(&self, issue: CustomIssue, ctx: &VerifyContext, verdict: Verdict) -> Verification {
        let record = CertificateRecord {
            code: issue.code,
            holder: issue.holder,
            holder_name: issue.holder_name,
            course: issue.course,
            course_name: issue.course_name,
            issued_at: issue.issued_at,
        };
        Verification::disclose(&record, ctx, self.should_display_info(), verdict, self.shortname())
    }
}

impl CertificateVerifier for CustomCertificates {
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
        self.flag("checkarchive", true)
    }

    fn verify(&self, code: &str, ctx: &VerifyContext) -> Result<Option<Verification>, StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(None);
        };
        if !self.is_enabled() {
            return Ok(None);
        }

        let Some(issue) = store.find_issue(code)? else {
            return Ok(None);
        };
        if !self.may_verify(&issue, ctx) {
            return Ok(None);
        }
        Ok(Some(self.conclude(issue, ctx, Verdict::Valid)))
    }

    fn verify_archive(
        &self,
        code: &str,
        ctx: &VerifyContext,
    ) -> Result<Option<Verification>, StoreError> {
        let Some(store) = self.store.as_ref() else {
            return Ok(None);
        };
        if !self.is_enabled() || !store.has_archive() {
            return Ok(None);
        }

        // Archived records are always available for verification; the
        // verify-any restriction applies to live issues only.
        let Some(issue) = store.archived_issue(code)? else {
            return Ok(None);
        };
        Ok(Some(self.conclude(issue, ctx, Verdict::ValidArchived)))
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
        settings.push(SettingDescriptor {
            key: config_key(&shortname, "checkarchive"),
            label_key: "checkarchive".to_string(),
            help_key: Some("checkarchive_help".to_string()),
            kind: SettingKind::Checkbox {
                default: true,
            },
        });
        settings.push(SettingDescriptor {
            key: config_key(&shortname, "bypassverifyany"),
            label_key: "bypassverifyany".to_string(),
            help_key: Some("bypassverifyany_help".to_string()),
            kind: SettingKind::Checkbox {
                default: true,
            },
        });
        settings
    }
}
