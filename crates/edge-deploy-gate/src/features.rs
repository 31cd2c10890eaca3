// crates/edge-deploy-gate/src/features.rs
// ============================================================================
// Module: Feature Flags
// Description: Resolved control toggles and their env-file rendering.
// Purpose: Hand gate results to later pipeline stages as KEY=value lines.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Feature flags are written once per successful gate run and fully replace
//! any previous file. Keys appear in [`ControlKind::ALL`] order with lower-case
//! boolean values.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::controls::ControlKind;
use crate::controls::ControlsDocument;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default flags file name at the project root.
pub const DEFAULT_FEATURES_FILE: &str = "features.env";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Resolved on/off state for every recognized control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Web application firewall.
    pub waf: bool,
    /// API discovery.
    pub api_discovery: bool,
    /// Advanced bot protection.
    pub bot_advanced: bool,
    /// Rate limiting.
    pub rate_limiting: bool,
}

impl FeatureFlags {
    /// Resolves flags from a parsed controls document.
    #[must_use]
    pub fn from_document(document: &ControlsDocument) -> Self {
        Self {
            waf: document.enabled(ControlKind::Waf),
            api_discovery: document.enabled(ControlKind::ApiDiscovery),
            bot_advanced: document.enabled(ControlKind::BotAdvanced),
            rate_limiting: document.enabled(ControlKind::RateLimiting),
        }
    }

    /// Returns the flag for a control.
    #[must_use]
    pub const fn get(&self, kind: ControlKind) -> bool {
        match kind {
            ControlKind::Waf => self.waf,
            ControlKind::ApiDiscovery => self.api_discovery,
            ControlKind::BotAdvanced => self.bot_advanced,
            ControlKind::RateLimiting => self.rate_limiting,
        }
    }

    /// Renders the env file contents, one `KEY=value` line per control.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for kind in ControlKind::ALL {
            let _ = writeln!(out, "{}={}", kind.env_key(), self.get(kind));
        }
        out
    }

    /// Writes the env file, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be written.
    pub fn write_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.render())
    }
}
