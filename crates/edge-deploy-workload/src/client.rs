// crates/edge-deploy-workload/src/client.rs
// ============================================================================
// Module: Workload API Client
// Description: Blocking HTTP client for workload configuration objects.
// Purpose: Issue exactly one authenticated request per workload operation.
// Dependencies: edge-deploy-core, reqwest, serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`WorkloadClient`] wraps a blocking `reqwest` client preconfigured with the
//! API-key `Authorization` header. Each operation sends one request, records
//! one audit event, and returns the decoded JSON response.
//!
//! Security posture: responses are untrusted; bodies are size-limited and
//! non-2xx responses fail closed with the body attached for diagnostics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::sync::Arc;

use edge_deploy_core::AuditSink;
use edge_deploy_core::audit::NoopAuditSink;
use edge_deploy_core::audit::record_event;
use reqwest::Method;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::AUTHORIZATION;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde_json::Value;
use serde_json::json;
use thiserror::Error;

use crate::audit::RequestOutcome;
use crate::audit::WorkloadAuditEvent;
use crate::payload::DeleteRequest;
use crate::payload::WorkloadSpec;
use crate::tenant::TENANT_RULES;
use crate::tenant::TenantRule;
use crate::tenant::resolve_tenant;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Authorization scheme prefix for API tokens.
pub const AUTH_SCHEME: &str = "Ves-io-api-key";
/// Maximum response body size accepted from the API.
pub const MAX_RESPONSE_BYTES: usize = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Workload operations supported by the API wrapper.
///
/// # Invariants
/// - Variants are stable for CLI parsing and audit labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// POST a new workload.
    Create,
    /// PUT over an existing workload.
    Replace,
    /// GET a workload.
    Get,
    /// DELETE a workload.
    Delete,
}

impl Operation {
    /// Returns the HTTP method used for this operation.
    #[must_use]
    pub fn method(self) -> Method {
        match self {
            Self::Create => Method::POST,
            Self::Replace => Method::PUT,
            Self::Get => Method::GET,
            Self::Delete => Method::DELETE,
        }
    }
}

/// Connection settings for the workload API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    /// API base URL, e.g. `https://tenant.console.ves.volterra.io/api`.
    pub api_url: String,
    /// API token.
    pub api_token: String,
    /// Tenant name.
    pub tenant: String,
    /// Namespace to operate in.
    pub namespace: String,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("api_url", &self.api_url)
            .field("api_token", &"<redacted>")
            .field("tenant", &self.tenant)
            .field("namespace", &self.namespace)
            .finish()
    }
}

/// Workload client errors.
///
/// # Invariants
/// - Variants are stable for CLI error mapping and tests.
/// - String payloads are user-facing and may include untrusted server text.
#[derive(Debug, Error)]
pub enum WorkloadError {
    /// Client construction failed.
    #[error("workload client config error: {0}")]
    Config(String),
    /// The request could not be sent or the response could not be read.
    #[error("workload transport error: {0}")]
    Transport(String),
    /// The API answered with a non-2xx status.
    #[error("workload api returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The API answered 2xx with a body that is not JSON.
    #[error("workload api returned invalid JSON: {0}")]
    Json(String),
    /// Response size exceeds limits.
    #[error("workload response exceeds size limit ({actual} > {limit})")]
    ResponseTooLarge {
        /// Observed size in bytes.
        actual: usize,
        /// Maximum size in bytes.
        limit: usize,
    },
}

impl WorkloadError {
    /// Returns the response body carried by HTTP status errors.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Status {
                body, ..
            } => Some(body),
            _ => None,
        }
    }

    /// Classifies the error for audit records.
    const fn outcome(&self) -> RequestOutcome {
        match self {
            Self::Status {
                ..
            } => RequestOutcome::HttpError,
            Self::Json(_)
            | Self::ResponseTooLarge {
                ..
            } => RequestOutcome::InvalidResponse,
            Self::Config(_) | Self::Transport(_) => RequestOutcome::TransportError,
        }
    }

    /// Returns the HTTP status carried by the error, if any.
    const fn status(&self) -> Option<u16> {
        match self {
            Self::Status {
                status, ..
            } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Workload API client.
///
/// # Invariants
/// - `base_url` has no trailing `/`.
/// - `http` carries the authorization and content-type headers on every request.
pub struct WorkloadClient {
    /// API base URL without trailing slash.
    base_url: String,
    /// Tenant after applying tenant rules.
    resolved_tenant: String,
    /// Namespace to operate in.
    namespace: String,
    /// Preconfigured blocking HTTP client.
    http: Client,
    /// Audit sink for request records.
    audit: Arc<dyn AuditSink>,
}

impl WorkloadClient {
    /// Builds a client using the built-in tenant rules.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::Config`] when the token cannot be encoded as a
    /// header or the HTTP client cannot be built.
    pub fn new(settings: &ApiSettings) -> Result<Self, WorkloadError> {
        Self::with_tenant_rules(settings, TENANT_RULES)
    }

    /// Builds a client using an explicit tenant rule table.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError::Config`] when the token cannot be encoded as a
    /// header or the HTTP client cannot be built.
    pub fn with_tenant_rules(
        settings: &ApiSettings,
        rules: &[TenantRule],
    ) -> Result<Self, WorkloadError> {
        let mut auth = HeaderValue::from_str(&format!("{AUTH_SCHEME} {}", settings.api_token))
            .map_err(|_| {
                WorkloadError::Config("api token contains invalid header characters".to_string())
            })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|err| WorkloadError::Config(err.to_string()))?;
        Ok(Self {
            base_url: settings.api_url.trim_end_matches('/').to_string(),
            resolved_tenant: resolve_tenant(&settings.tenant, rules),
            namespace: settings.namespace.clone(),
            http,
            audit: Arc::new(NoopAuditSink),
        })
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Returns the tenant used in object references.
    #[must_use]
    pub fn resolved_tenant(&self) -> &str {
        &self.resolved_tenant
    }

    /// Returns the collection URL for workloads in the namespace.
    #[must_use]
    pub fn collection_url(&self) -> String {
        format!("{}/config/namespaces/{}/workloads", self.base_url, self.namespace)
    }

    /// Returns the URL of a single workload.
    #[must_use]
    pub fn item_url(&self, name: &str) -> String {
        format!("{}/{name}", self.collection_url())
    }

    /// Creates a workload with a POST to the collection URL.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError`] on transport failure, non-2xx status, or an
    /// invalid response body.
    pub fn create_workload(&self, spec: &WorkloadSpec) -> Result<Value, WorkloadError> {
        let body = spec.to_object(&self.resolved_tenant, &self.namespace);
        self.send(Operation::Create, &spec.name, self.collection_url(), Some(&body), decode_json)
    }

    /// Replaces a workload with a PUT to its item URL.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError`] on transport failure, non-2xx status, or an
    /// invalid response body.
    pub fn replace_workload(&self, spec: &WorkloadSpec) -> Result<Value, WorkloadError> {
        let body = spec.to_object(&self.resolved_tenant, &self.namespace);
        let url = self.item_url(&spec.name);
        self.send(Operation::Replace, &spec.name, url, Some(&body), decode_json)
    }

    /// Fetches a workload with a GET to its item URL.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError`] on transport failure, non-2xx status, or an
    /// invalid response body.
    pub fn get_workload(&self, name: &str) -> Result<Value, WorkloadError> {
        self.send::<()>(Operation::Get, name, self.item_url(name), None, decode_json)
    }

    /// Deletes a workload with a DELETE to its item URL.
    ///
    /// An empty response body yields `{"status": "deleted"}`.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadError`] on transport failure, non-2xx status, or an
    /// invalid response body.
    pub fn delete_workload(&self, name: &str) -> Result<Value, WorkloadError> {
        let body = DeleteRequest {
            name: name.to_string(),
            namespace: self.namespace.clone(),
        };
        self.send(Operation::Delete, name, self.item_url(name), Some(&body), decode_delete_json)
    }

    /// Sends one request, decodes a 2xx body, and records one audit event.
    fn send<B: Serialize>(
        &self,
        operation: Operation,
        name: &str,
        url: String,
        body: Option<&B>,
        decode: fn(&str) -> Result<Value, WorkloadError>,
    ) -> Result<Value, WorkloadError> {
        let (status, result) = match self.dispatch(operation, url, body) {
            Ok((status, text)) => (Some(status), decode(&text)),
            Err(err) => (err.status(), Err(err)),
        };
        let outcome = match &result {
            Ok(_) => RequestOutcome::Ok,
            Err(err) => err.outcome(),
        };
        record_event(
            self.audit.as_ref(),
            &WorkloadAuditEvent::new(operation, &self.namespace, name, outcome, status),
        );
        result
    }

    /// Performs the HTTP exchange without audit bookkeeping.
    fn dispatch<B: Serialize>(
        &self,
        operation: Operation,
        url: String,
        body: Option<&B>,
    ) -> Result<(u16, String), WorkloadError> {
        let mut request = self.http.request(operation.method(), url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let mut response =
            request.send().map_err(|err| WorkloadError::Transport(err.to_string()))?;
        let status = response.status();
        let bytes = read_response_limited(&mut response, MAX_RESPONSE_BYTES)?;
        let text = String::from_utf8_lossy(&bytes).into_owned();
        if !status.is_success() {
            return Err(WorkloadError::Status {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok((status.as_u16(), text))
    }
}

impl std::fmt::Debug for WorkloadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkloadClient")
            .field("base_url", &self.base_url)
            .field("resolved_tenant", &self.resolved_tenant)
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Decodes a response body as JSON.
fn decode_json(text: &str) -> Result<Value, WorkloadError> {
    serde_json::from_str(text).map_err(|err| WorkloadError::Json(err.to_string()))
}

/// Decodes a delete response body; an empty body means the delete succeeded.
fn decode_delete_json(text: &str) -> Result<Value, WorkloadError> {
    if text.trim().is_empty() {
        return Ok(json!({"status": "deleted"}));
    }
    decode_json(text)
}

/// Reads a response body, failing once it exceeds `max_bytes`.
fn read_response_limited(
    response: &mut Response,
    max_bytes: usize,
) -> Result<Vec<u8>, WorkloadError> {
    let max_bytes_u64 = u64::try_from(max_bytes)
        .map_err(|_| WorkloadError::Config("response size limit exceeds u64".to_string()))?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(WorkloadError::ResponseTooLarge {
            actual: usize::try_from(expected).unwrap_or(usize::MAX),
            limit: max_bytes,
        });
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf).map_err(|err| WorkloadError::Transport(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(WorkloadError::ResponseTooLarge {
            actual: buf.len(),
            limit: max_bytes,
        });
    }
    Ok(buf)
}
