// verify-certs-cli/src/snapshot.rs
// ============================================================================
// Module: Deployment Snapshot Store
// Description: JSON-backed stores for the external certificate subsystems.
// Purpose: Stand in for the host deployment when running from the CLI.
// Dependencies: verify-certs-core, verify-certs-handlers, serde_json
// ============================================================================

//! ## Overview
//! A snapshot file captures the state of the host deployment as JSON: one
//! section per certificate subsystem plus principal capabilities. A section's
//! presence marks the subsystem as installed; an absent section removes the
//! handler from discovery. Files are parsed with a strict size limit.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use verify_certs_core::Capability;
use verify_certs_core::CourseId;
use verify_certs_core::PermissionChecker;
use verify_certs_core::StoreError;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_handlers::BuiltinStores;
use verify_certs_handlers::CustomIssue;
use verify_certs_handlers::LegacyIssue;
use verify_certs_handlers::SharedIssue;
use verify_certs_handlers::course::SharedIssueStore;
use verify_certs_handlers::custom::CustomIssueStore;
use verify_certs_handlers::legacy::LegacyIssueStore;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Maximum snapshot file size in bytes.
pub const MAX_SNAPSHOT_BYTES: u64 = 1024 * 1024;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Snapshot loading errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading the snapshot file failed.
    #[error("failed to read snapshot {path}: {source}")]
    Io {
        /// Path the read was attempted from.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The snapshot file exceeds the size limit.
    #[error("snapshot {path} is {size} bytes (limit {limit})")]
    TooLarge {
        /// Path of the oversized file.
        path: String,
        /// Observed file size in bytes.
        size: u64,
        /// Maximum permitted size in bytes.
        limit: u64,
    },
    /// The snapshot file failed to parse.
    #[error("failed to parse snapshot: {0}")]
    Parse(String),
}

// ============================================================================
// SECTION: Snapshot Model
// ============================================================================

/// JSON snapshot of the host deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    /// Legacy issuance subsystem, when installed.
    #[serde(default)]
    pub legacy: Option<LegacySection>,
    /// Shared course-certificate service, when installed.
    #[serde(default)]
    pub course: Option<CourseSection>,
    /// Custom certificate subsystem, when installed.
    #[serde(default)]
    pub custom: Option<CustomSection>,
    /// Principal capabilities keyed by user identifier.
    #[serde(default)]
    pub principals: BTreeMap<String, PrincipalEntry>,
}

/// Snapshot of the legacy issuance subsystem.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacySection {
    /// Live issues.
    #[serde(default)]
    pub issues: Vec<LegacyIssue>,
    /// Archived issues; `None` when the archive subsystem is absent.
    #[serde(default)]
    pub archive: Option<Vec<LegacyIssue>>,
    /// Course completion records.
    #[serde(default)]
    pub completions: Vec<CompletionEntry>,
    /// Graded activity records.
    #[serde(default)]
    pub grades: Vec<GradeEntry>,
}

/// A holder's completion of a course.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompletionEntry {
    /// Completing holder.
    pub holder: UserId,
    /// Completed course.
    pub course: CourseId,
    /// Completion timestamp.
    pub completed_at: Timestamp,
}

/// A holder's graded timestamp for a grade item.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GradeEntry {
    /// Graded holder.
    pub holder: UserId,
    /// Grade item identifier.
    pub grade_item: i64,
    /// Graded timestamp.
    pub graded_at: Timestamp,
}

/// Snapshot of the shared course-certificate service.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CourseSection {
    /// Issues held by the shared service, archived records included.
    #[serde(default)]
    pub issues: Vec<SharedIssue>,
}

/// Snapshot of the custom certificate subsystem.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomSection {
    /// Live issues.
    #[serde(default)]
    pub issues: Vec<CustomIssue>,
    /// Archived issues; `None` when the archive subsystem is absent.
    #[serde(default)]
    pub archive: Option<Vec<CustomIssue>>,
}

/// Capabilities held by a principal.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PrincipalEntry {
    /// Capabilities granted to the principal.
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl Snapshot {
    /// Loads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError`] when the file cannot be read, exceeds the
    /// size limit, or fails to parse.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let metadata = fs::metadata(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        if metadata.len() > MAX_SNAPSHOT_BYTES {
            return Err(SnapshotError::TooLarge {
                path: path.display().to_string(),
                size: metadata.len(),
                limit: MAX_SNAPSHOT_BYTES,
            });
        }

        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|error| SnapshotError::Parse(error.to_string()))
    }

    /// Splits the snapshot into handler stores and a permission checker.
    #[must_use]
    pub fn split(self) -> (BuiltinStores, SnapshotPermissions) {
        let stores = BuiltinStores {
            legacy: self.legacy.map(|section| {
                Arc::new(LegacySnapshotStore {
                    section,
                }) as Arc<dyn LegacyIssueStore>
            }),
            shared: self.course.map(|section| {
                Arc::new(CourseSnapshotStore {
                    section,
                }) as Arc<dyn SharedIssueStore>
            }),
            custom: self.custom.map(|section| {
                Arc::new(CustomSnapshotStore {
                    section,
                }) as Arc<dyn CustomIssueStore>
            }),
        };
        let permissions = SnapshotPermissions {
            principals: self.principals,
        };
        (stores, permissions)
    }
}

// ============================================================================
// SECTION: Permissions
// ============================================================================

/// Permission checker backed by the snapshot's principal table.
///
/// Principals absent from the table hold the view capability only, so a
/// snapshot without a principal section behaves like an open verification
/// page.
#[derive(Debug, Clone, Default)]
pub struct SnapshotPermissions {
    /// Principal capabilities keyed by user identifier.
    principals: BTreeMap<String, PrincipalEntry>,
}

impl PermissionChecker for SnapshotPermissions {
    fn has_capability(&self, principal: &UserId, capability: Capability) -> bool {
        self.principals.get(principal.as_str()).map_or_else(
            || matches!(capability, Capability::View),
            |entry| entry.capabilities.contains(&capability),
        )
    }
}

// ============================================================================
// SECTION: Store Implementations
// ============================================================================

/// Legacy issuance store backed by a snapshot section.
struct LegacySnapshotStore {
    /// Snapshot data for the subsystem.
    section: LegacySection,
}

impl LegacyIssueStore for LegacySnapshotStore {
    fn find_issues(&self, code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Ok(self.section.issues.iter().filter(|issue| issue.code == code).cloned().collect())
    }

    fn archived_issues(&self, code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Ok(self
            .section
            .archive
            .iter()
            .flatten()
            .filter(|issue| issue.code == code)
            .cloned()
            .collect())
    }

    fn has_archive(&self) -> bool {
        self.section.archive.is_some()
    }

    fn completion_date(
        &self,
        holder: &UserId,
        course: &CourseId,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(self
            .section
            .completions
            .iter()
            .find(|entry| entry.holder == *holder && entry.course == *course)
            .map(|entry| entry.completed_at))
    }

    fn graded_date(
        &self,
        holder: &UserId,
        grade_item: i64,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(self
            .section
            .grades
            .iter()
            .find(|entry| entry.holder == *holder && entry.grade_item == grade_item)
            .map(|entry| entry.graded_at))
    }
}

/// Shared course-certificate service backed by a snapshot section.
struct CourseSnapshotStore {
    /// Snapshot data for the subsystem.
    section: CourseSection,
}

impl SharedIssueStore for CourseSnapshotStore {
    fn verify_code(&self, code: &str) -> Result<Option<SharedIssue>, StoreError> {
        Ok(self.section.issues.iter().find(|issue| issue.code == code).cloned())
    }
}

/// Custom certificate store backed by a snapshot section.
struct CustomSnapshotStore {
    /// Snapshot data for the subsystem.
    section: CustomSection,
}

impl CustomIssueStore for CustomSnapshotStore {
    fn find_issue(&self, code: &str) -> Result<Option<CustomIssue>, StoreError> {
        Ok(self.section.issues.iter().find(|issue| issue.code == code).cloned())
    }

    fn archived_issue(&self, code: &str) -> Result<Option<CustomIssue>, StoreError> {
        Ok(self
            .section
            .archive
            .iter()
            .flatten()
            .find(|issue| issue.code == code)
            .cloned())
    }

    fn has_archive(&self) -> bool {
        self.section.archive.is_some()
    }
}
