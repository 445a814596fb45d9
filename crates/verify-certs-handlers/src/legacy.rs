// verify-certs-handlers/src/legacy.rs
// ============================================================================
// Module: Legacy Certificate Handler
// Description: Verifier for the legacy issuance table subsystem.
// Purpose: Match codes against legacy issues with print-date substitution.
// Dependencies: verify-certs-core, serde
// ============================================================================

//! ## Overview
//! The legacy handler looks up codes in a legacy issuance table joined to
//! holder and course records. Its print-date setting can substitute the
//! displayed issue date with a course-completion or graded-activity
//! timestamp, following the stored configuration of the issuing activity.
//! An optional archive store retains historical issues after recompletion
//! cycles.

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

/// Print-date configuration value selecting the course-completion timestamp.
const PRINT_DATE_COMPLETION: i64 = 2;

// ============================================================================
// SECTION: Issue Record
// ============================================================================

/// Row from the legacy issuance table, joined to holder and course data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyIssue {
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
    /// Stored print-date configuration of the issuing activity.
    ///
    /// `2` selects the course-completion timestamp; greater values name the
    /// grade item whose graded timestamp is displayed; anything else keeps
    /// the raw issue date.
    #[serde(default)]
    pub print_date: i64,
}

// ============================================================================
// SECTION: Store Contract
// ============================================================================

/// Read access to the legacy issuance subsystem.
pub trait LegacyIssueStore {
    /// Returns all live issues matching the code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn find_issues(&self, code: &str) -> Result<Vec<LegacyIssue>, StoreError>;

    /// Returns all archived issues matching the code.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn archived_issues(&self, _code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Ok(Vec::new())
    }

    /// Returns true when the archive subsystem is present.
    fn has_archive(&self) -> bool {
        false
    }

    /// Returns the holder's completion timestamp for the course.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn completion_date(
        &self,
        holder: &UserId,
        course: &CourseId,
    ) -> Result<Option<Timestamp>, StoreError>;

    /// Returns the holder's graded timestamp for the grade item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] when the lookup fails.
    fn graded_date(&self, holder: &UserId, grade_item: i64)
    -> Result<Option<Timestamp>, StoreError>;
}

// ============================================================================
// SECTION: Handler Implementation
// ============================================================================

/// Verifier for the legacy issuance subsystem.
pub struct LegacyCertificates {
    /// Host configuration reader.
    config: Arc<dyn ConfigReader>,
    /// Backing store; `None` when the subsystem is not installed.
    store: Option<Arc<dyn LegacyIssueStore>>,
}

impl LegacyCertificates {
    /// Stable type identifier for this handler.
    pub const SHORTNAME: &'static str = "legacy";

    /// Creates the handler with injected configuration and store.
    #[must_use]
    pub const fn new(config: Arc<dyn ConfigReader>, store: Option<Arc<dyn LegacyIssueStore>>) -> Self {
        Self {
            config,
            store,
        }
    }

    /// Reads a handler-scoped configuration flag with its default.
    fn flag(&self, name: &str, default: bool) -> bool {
        self.config.flag_or(&config_key(&self.shortname(), name), default)
    }

    /// Resolves the displayed date for a live issue.
    ///
    /// Applies print-date substitution when the match-print-date setting is
    /// enabled; falls back to the raw issue date when the computed date is
    /// unavailable.
    fn displayed_date(
        &self,
        store: &dyn LegacyIssueStore,
        issue: &LegacyIssue,
    ) -> Result<Timestamp, StoreError> {
        if !self.flag("matchprintdate", true) {
            return Ok(issue.issued_at);
        }

        let computed = if issue.print_date == PRINT_DATE_COMPLETION {
            store.completion_date(&issue.holder, &issue.course)?
        } else if issue.print_date > PRINT_DATE_COMPLETION {
            store.graded_date(&issue.holder, issue.print_date)?
        } else {
            None
        };
        Ok(computed.unwrap_or(issue.issued_at))
    }

    /// Builds the verification for the winning issue.
    fn conclude(
        &self,
        issue: LegacyIssue,
        issued_at: Timestamp,
        ctx: &VerifyContext,
        verdict: Verdict,
    ) -> Verification {
        let record = CertificateRecord {
            code: issue.code,
            holder: issue.holder,
            holder_name: issue.holder_name,
            course: issue.course,
            course_name: issue.course_name,
            issued_at,
        };
        Verification::disclose(&record, ctx, self.should_display_info(), verdict, self.shortname())
    }
}

impl CertificateVerifier for LegacyCertificates {
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

        let Some(issue) = earliest(store.find_issues(code)?) else {
            return Ok(None);
        };
        let issued_at = self.displayed_date(store.as_ref(), &issue)?;
        Ok(Some(self.conclude(issue, issued_at, ctx, Verdict::Valid)))
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

        let Some(issue) = earliest(store.archived_issues(code)?) else {
            return Ok(None);
        };
        // Completion data is reset by recompletion cycles; archived records
        // always display their stored issue date.
        let issued_at = issue.issued_at;
        Ok(Some(self.conclude(issue, issued_at, ctx, Verdict::ValidArchived)))
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
            key: config_key(&shortname, "matchprintdate"),
            label_key: "matchprintdate".to_string(),
            help_key: Some("matchprintdate_help".to_string()),
            kind: SettingKind::Checkbox {
                default: true,
            },
        });
        settings
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Picks the winning issue when a code matches multiple rows.
///
/// The earliest issue timestamp wins; ties fall back to store order.
fn earliest(issues: Vec<LegacyIssue>) -> Option<LegacyIssue> {
    issues
        .into_iter()
        .enumerate()
        .min_by_key(|(index, issue)| (issue.issued_at, *index))
        .map(|(_, issue)| issue)
}
