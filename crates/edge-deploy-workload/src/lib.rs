// crates/edge-deploy-workload/src/lib.rs
// ============================================================================
// Module: Edge Deploy Workload Library
// Description: Client for the workload configuration REST API.
// Purpose: Create, replace, fetch, and delete workloads on a virtual site.
// Dependencies: edge-deploy-core, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! The workload library builds the fixed workload payload and issues exactly
//! one authenticated request per operation against
//! `/config/namespaces/{namespace}/workloads[/{name}]`. The `workload-manager`
//! binary wires it to environment configuration.
//!
//! Security posture: the API token is a secret; it is sent only in a header
//! marked sensitive and is redacted from debug output and audit records.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Audit events for workload requests.
pub mod audit;
/// Blocking HTTP client for the workload API.
pub mod client;
/// Environment-backed configuration.
pub mod config;
/// Workload descriptor and wire payload.
pub mod payload;
/// Tenant naming rules.
pub mod tenant;

#[cfg(test)]
mod tests;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use client::ApiSettings;
pub use client::Operation;
pub use client::WorkloadClient;
pub use client::WorkloadError;
pub use config::ConfigError;
pub use config::WorkloadManagerConfig;
pub use payload::WorkloadSpec;
pub use tenant::TenantRule;
