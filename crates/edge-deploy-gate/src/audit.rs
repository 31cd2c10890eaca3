// crates/edge-deploy-gate/src/audit.rs
// ============================================================================
// Module: Gate Audit Events
// Description: Structured records for security controls gate runs.
// Purpose: Record each gate decision with its reason and resolved flags.
// Dependencies: edge-deploy-core, serde
// ============================================================================

//! ## Overview
//! One [`GateAuditEvent`] is emitted per gate run, after the decision is made.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use edge_deploy_core::audit::timestamp_ms;
use serde::Serialize;

use crate::controls::ControlKind;
use crate::features::FeatureFlags;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Gate decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateOutcome {
    /// Every check passed and flags were written.
    Pass,
    /// A check failed; no flags were written.
    Fail,
}

/// Gate run audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct GateAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Controls file that was evaluated.
    pub controls_path: String,
    /// Gate decision.
    pub outcome: GateOutcome,
    /// Failure reason on fail.
    pub reason: Option<String>,
    /// Resolved flags keyed by env key, on pass.
    pub flags: Option<BTreeMap<&'static str, bool>>,
}

impl GateAuditEvent {
    /// Creates a pass event carrying the resolved flags.
    #[must_use]
    pub fn pass(controls_path: &Path, flags: &FeatureFlags) -> Self {
        let flags = ControlKind::ALL.into_iter().map(|kind| (kind.env_key(), flags.get(kind)));
        Self::new(controls_path, GateOutcome::Pass, None, Some(flags.collect()))
    }

    /// Creates a fail event carrying the failure reason.
    #[must_use]
    pub fn fail(controls_path: &Path, reason: String) -> Self {
        Self::new(controls_path, GateOutcome::Fail, Some(reason), None)
    }

    /// Creates an event with a consistent timestamp.
    fn new(
        controls_path: &Path,
        outcome: GateOutcome,
        reason: Option<String>,
        flags: Option<BTreeMap<&'static str, bool>>,
    ) -> Self {
        Self {
            event: "security_controls_gate",
            timestamp_ms: timestamp_ms(),
            controls_path: controls_path.display().to_string(),
            outcome,
            reason,
            flags,
        }
    }
}
