// crates/edge-deploy-workload/src/audit.rs
// ============================================================================
// Module: Workload Audit Events
// Description: Structured audit records for workload API requests.
// Purpose: Record one redacted event per request.
// Dependencies: edge-deploy-core, serde
// ============================================================================

//! ## Overview
//! One [`WorkloadAuditEvent`] is emitted per API request, successful or not.
//! Events name the operation and target object but never include the token or
//! request and response bodies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use edge_deploy_core::audit::timestamp_ms;
use serde::Serialize;

use crate::client::Operation;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Request outcome classification.
///
/// # Invariants
/// - Variants are stable for audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestOutcome {
    /// 2xx response with a usable body.
    Ok,
    /// Non-2xx response.
    HttpError,
    /// The request could not be completed.
    TransportError,
    /// 2xx response whose body was rejected.
    InvalidResponse,
}

/// Workload request audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct WorkloadAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Workload operation.
    pub operation: Operation,
    /// HTTP method label.
    pub method: String,
    /// Namespace the workload lives in.
    pub namespace: String,
    /// Workload name.
    pub workload: String,
    /// Request outcome.
    pub outcome: RequestOutcome,
    /// HTTP status when a response was received.
    pub status: Option<u16>,
}

impl WorkloadAuditEvent {
    /// Creates a new audit event with a consistent timestamp.
    #[must_use]
    pub fn new(
        operation: Operation,
        namespace: &str,
        workload: &str,
        outcome: RequestOutcome,
        status: Option<u16>,
    ) -> Self {
        Self {
            event: "workload_request",
            timestamp_ms: timestamp_ms(),
            operation,
            method: operation.method().to_string(),
            namespace: namespace.to_string(),
            workload: workload.to_string(),
            outcome,
            status,
        }
    }
}
