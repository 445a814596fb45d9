// verify-certs-handlers/tests/common/mod.rs
// ============================================================================
// Module: Common Test Fixtures
// Description: Shared in-memory stores and fixtures for handler tests.
// Purpose: Provide deterministic store doubles for all handler variants.
// Dependencies: verify-certs-core, verify-certs-handlers
// ============================================================================

//! ## Overview
//! This module provides in-memory implementations of the three store
//! contracts, a map-backed config reader, and issue builders shared across
//! the handler test files.

#![allow(dead_code, reason = "Shared test helpers may be unused in some cases.")]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use verify_certs_core::ConfigReader;
use verify_certs_core::CourseId;
use verify_certs_core::StoreError;
use verify_certs_core::Timestamp;
use verify_certs_core::UserId;
use verify_certs_core::VerifyContext;
use verify_certs_handlers::CustomIssue;
use verify_certs_handlers::LegacyIssue;
use verify_certs_handlers::OWNING_COMPONENT;
use verify_certs_handlers::SharedIssue;
use verify_certs_handlers::course::SharedIssueStore;
use verify_certs_handlers::custom::CustomIssueStore;
use verify_certs_handlers::legacy::LegacyIssueStore;

// ============================================================================
// SECTION: Contexts
// ============================================================================

/// Deterministic verification instant used across tests.
pub const VERIFIED_AT: i64 = 1_700_000_000;

/// Creates a context for a non-owner viewer without extra capabilities.
#[must_use]
pub fn viewer_context() -> VerifyContext {
    VerifyContext {
        principal: UserId::new("viewer"),
        verified_at: Timestamp::from_unix_seconds(VERIFIED_AT),
        can_verify_all: false,
    }
}

/// Creates a context for the record's holder.
#[must_use]
pub fn holder_context() -> VerifyContext {
    VerifyContext {
        principal: UserId::new("holder"),
        verified_at: Timestamp::from_unix_seconds(VERIFIED_AT),
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
// SECTION: Issue Builders
// ============================================================================

/// Builds a legacy issue held by `holder` with a raw print-date setting.
#[must_use]
pub fn legacy_issue(code: &str, issued_at: i64) -> LegacyIssue {
    LegacyIssue {
        code: code.to_string(),
        holder: UserId::new("holder"),
        holder_name: "Jo Bloggs".to_string(),
        course: CourseId::new("c1"),
        course_name: "Rust 101".to_string(),
        issued_at: Timestamp::from_unix_seconds(issued_at),
        print_date: 0,
    }
}

/// Builds a shared-service issue owned by the course-certificate component.
#[must_use]
pub fn shared_issue(code: &str, issued_at: i64) -> SharedIssue {
    SharedIssue {
        code: code.to_string(),
        holder: UserId::new("holder"),
        holder_name: "Jo Bloggs".to_string(),
        course: CourseId::new("c1"),
        course_name: "Rust 101".to_string(),
        issued_at: Timestamp::from_unix_seconds(issued_at),
        expires_at: None,
        component: OWNING_COMPONENT.to_string(),
    }
}

/// Builds a custom issue with the verify-any template flag cleared.
#[must_use]
pub fn custom_issue(code: &str, issued_at: i64) -> CustomIssue {
    CustomIssue {
        code: code.to_string(),
        holder: UserId::new("holder"),
        holder_name: "Jo Bloggs".to_string(),
        course: CourseId::new("c1"),
        course_name: "Rust 101".to_string(),
        issued_at: Timestamp::from_unix_seconds(issued_at),
        verify_any: false,
    }
}

// ============================================================================
// SECTION: In-Memory Stores
// ============================================================================

/// In-memory legacy issuance store.
#[derive(Debug, Clone, Default)]
pub struct MemLegacyStore {
    /// Live issues.
    pub issues: Vec<LegacyIssue>,
    /// Archived issues; `None` when the archive subsystem is absent.
    pub archive: Option<Vec<LegacyIssue>>,
    /// Completion timestamps keyed by `(holder, course)`.
    pub completions: BTreeMap<(String, String), Timestamp>,
    /// Graded timestamps keyed by `(holder, grade item)`.
    pub grades: BTreeMap<(String, i64), Timestamp>,
}

impl LegacyIssueStore for MemLegacyStore {
    fn find_issues(&self, code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Ok(self.issues.iter().filter(|issue| issue.code == code).cloned().collect())
    }

    fn archived_issues(&self, code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Ok(self.archive.iter().flatten().filter(|issue| issue.code == code).cloned().collect())
    }

    fn has_archive(&self) -> bool {
        self.archive.is_some()
    }

    fn completion_date(
        &self,
        holder: &UserId,
        course: &CourseId,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(self
            .completions
            .get(&(holder.to_string(), course.to_string()))
            .copied())
    }

    fn graded_date(
        &self,
        holder: &UserId,
        grade_item: i64,
    ) -> Result<Option<Timestamp>, StoreError> {
        Ok(self.grades.get(&(holder.to_string(), grade_item)).copied())
    }
}

/// In-memory shared course-certificate service.
#[derive(Debug, Clone, Default)]
pub struct MemSharedStore {
    /// Issues held by the service.
    pub issues: Vec<SharedIssue>,
}

impl SharedIssueStore for MemSharedStore {
    fn verify_code(&self, code: &str) -> Result<Option<SharedIssue>, StoreError> {
        Ok(self.issues.iter().find(|issue| issue.code == code).cloned())
    }
}

/// In-memory custom certificate store.
#[derive(Debug, Clone, Default)]
pub struct MemCustomStore {
    /// Live issues.
    pub issues: Vec<CustomIssue>,
    /// Archived issues; `None` when the archive subsystem is absent.
    pub archive: Option<Vec<CustomIssue>>,
}

impl CustomIssueStore for MemCustomStore {
    fn find_issue(&self, code: &str) -> Result<Option<CustomIssue>, StoreError> {
        Ok(self.issues.iter().find(|issue| issue.code == code).cloned())
    }

    fn archived_issue(&self, code: &str) -> Result<Option<CustomIssue>, StoreError> {
        Ok(self.archive.iter().flatten().find(|issue| issue.code == code).cloned())
    }

    fn has_archive(&self) -> bool {
        self.archive.is_some()
    }
}

/// Failing legacy store for error propagation tests.
#[derive(Debug, Clone, Default)]
pub struct FailingLegacyStore;

impl LegacyIssueStore for FailingLegacyStore {
    fn find_issues(&self, _code: &str) -> Result<Vec<LegacyIssue>, StoreError> {
        Err(StoreError::Backend("lookup failed".to_string()))
    }

    fn completion_date(
        &self,
        _holder: &UserId,
        _course: &CourseId,
    ) -> Result<Option<Timestamp>, StoreError> {
        Err(StoreError::Backend("lookup failed".to_string()))
    }

    fn graded_date(
        &self,
        _holder: &UserId,
        _grade_item: i64,
    ) -> Result<Option<Timestamp>, StoreError> {
        Err(StoreError::Backend("lookup failed".to_string()))
    }
}
