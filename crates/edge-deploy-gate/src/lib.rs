// crates/edge-deploy-gate/src/lib.rs
// ============================================================================
// Module: Edge Deploy Gate Library
// Description: Security controls policy gate for application publishing.
// Purpose: Validate declared controls and emit deployment feature flags.
// Dependencies: edge-deploy-core, serde, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! An application declares its security controls in `security-controls.yaml`.
//! The gate checks that only recognized controls are declared, that WAF is
//! enabled, and that every enabled control has its companion artifacts in the
//! project tree. On success it writes `features.env` with one boolean per
//! control for downstream pipeline stages.
//!
//! Security posture: the controls file is untrusted input; reads are bounded
//! and any malformed value fails closed.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Audit events for gate runs.
pub mod audit;
/// Controls document model and parser.
pub mod controls;
/// Feature flag output.
pub mod features;
/// Gate evaluation.
pub mod gate;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use controls::ControlKind;
pub use controls::ControlsDocument;
pub use features::FeatureFlags;
pub use gate::GateConfig;
pub use gate::GateError;
pub use gate::SecurityGate;
