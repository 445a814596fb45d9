// verify-certs-core/src/core/settings.rs
// ============================================================================
// Module: Verify Certs Settings Descriptors
// Description: Configuration fields handlers contribute to the admin surface.
// Purpose: Express settings registration as plain data instead of callbacks.
// Dependencies: crate::core::identifiers, serde
// ============================================================================

//! ## Overview
//! Each handler contributes a heading, a mandatory enable checkbox, and any
//! handler-specific extras to the administration settings surface. The
//! contribution is pure registration data; reading the configured values
//! happens through the `ConfigReader` interface at verification time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

use crate::core::identifiers::HandlerId;

// ============================================================================
// SECTION: Descriptor Types
// ============================================================================

/// Kind of a contributed settings field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingKind {
    /// Section heading labeled with the handler's full name.
    Heading,
    /// Boolean checkbox with a default value.
    Checkbox {
        /// Value assumed when the key is absent from configuration.
        default: bool,
    },
}

/// A single settings field contributed by a handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    /// Flat configuration key, `{shortname}_{setting}`.
    pub key: String,
    /// Catalog key for the field label.
    pub label_key: String,
    /// Catalog key for the field help text, when present.
    pub help_key: Option<String>,
    /// Field kind and default.
    pub kind: SettingKind,
}

// ============================================================================
// SECTION: Shared Contribution
// ============================================================================

/// Builds the settings every handler contributes: heading plus enable flag.
///
/// Handler-specific extras are appended by each implementation.
#[must_use]
pub fn base_settings(handler: &HandlerId) -> Vec<SettingDescriptor> {
    vec![
        SettingDescriptor {
            key: format!("{handler}_heading"),
            label_key: handler.to_string(),
            help_key: None,
            kind: SettingKind::Heading,
        },
        SettingDescriptor {
            key: format!("{handler}_enabled"),
            label_key: "enabled".to_string(),
            help_key: Some("enabled_help".to_string()),
            kind: SettingKind::Checkbox {
                default: true,
            },
        },
    ]
}
