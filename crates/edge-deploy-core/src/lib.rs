// crates/edge-deploy-core/src/lib.rs
// ============================================================================
// Module: Edge Deploy Core Library
// Description: Shared helpers for the Edge Deploy pipeline tools.
// Purpose: Provide env parsing, audit sinks, and the message catalog.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Ambient infrastructure shared by the workload manager and the security
//! controls gate. Neither tool depends on the other; both depend on this crate
//! for strict environment parsing, JSON-lines audit records, and the English
//! message catalog behind the [`t!`] macro.
//!
//! Security posture: environment values and file contents are untrusted and
//! must be validated by callers; audit records must never contain secrets.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// JSON-lines audit sinks.
pub mod audit;
/// Strict environment variable parsing.
pub mod env;
/// Message catalog and translation helpers.
pub mod i18n;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::AuditSink;
pub use audit::AuditTarget;
pub use env::EnvError;
pub use env::EnvSource;
pub use env::ProcessEnv;
