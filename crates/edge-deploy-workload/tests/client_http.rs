// crates/edge-deploy-workload/tests/client_http.rs
// ============================================================================
// Module: Workload Client HTTP Tests
// Description: Integration tests for the workload API client.
// Purpose: Verify methods, URLs, headers, bodies, and error handling on the wire.
// Dependencies: edge-deploy-workload, edge-deploy-core, tiny_http
// ============================================================================

//! ## Overview
//! Drives [`WorkloadClient`] against a scripted loopback server and inspects
//! every captured request. Each operation must issue exactly one request.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;

use edge_deploy_core::audit::MemoryAuditSink;
use edge_deploy_workload::ApiSettings;
use edge_deploy_workload::WorkloadClient;
use edge_deploy_workload::WorkloadError;
use edge_deploy_workload::WorkloadSpec;
use serde_json::Value;
use serde_json::json;

use crate::common::scripted_server;

// ============================================================================
// SECTION: Helpers
// ============================================================================

fn settings(api_url: &str, tenant: &str) -> ApiSettings {
    ApiSettings {
        api_url: api_url.to_string(),
        api_token: "test-token".to_string(),
        tenant: tenant.to_string(),
        namespace: "apps".to_string(),
    }
}

fn spec() -> WorkloadSpec {
    WorkloadSpec {
        name: "web".to_string(),
        image: "registry.example/web:v1".to_string(),
        site: "edge-site".to_string(),
        port: 5000,
        registry: "apps-acr".to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn create_posts_payload_to_collection() {
    let server = scripted_server(vec![(200, r#"{"metadata":{"name":"web"}}"#)]);
    let client = WorkloadClient::new(&settings(&server.base_url, "f5-amer-ent")).unwrap();

    let result = client.create_workload(&spec()).unwrap();
    let requests = server.finish();

    assert_eq!(client.resolved_tenant(), "f5-amer-ent-qyyfhhfj");
    assert_eq!(result, json!({"metadata": {"name": "web"}}));
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, "POST");
    assert_eq!(request.url, "/api/config/namespaces/apps/workloads");
    assert_eq!(request.header("Authorization"), Some("Ves-io-api-key test-token"));
    assert_eq!(request.header("Content-Type"), Some("application/json"));
    let body = request.json();
    let service = &body["spec"]["service"];
    assert_eq!(body["metadata"]["name"], "web");
    assert_eq!(
        service["deploy_options"]["deploy_ce_virtual_sites"]["virtual_site"][0]["name"],
        "edge-site"
    );
    assert_eq!(
        service["deploy_options"]["deploy_ce_virtual_sites"]["virtual_site"][0]["tenant"],
        "f5-amer-ent-qyyfhhfj"
    );
    assert_eq!(service["advertise_options"]["advertise_in_cluster"]["port"]["info"]["port"], 5000);
}

#[test]
fn replace_puts_payload_to_item_url() {
    let server = scripted_server(vec![(200, "{}")]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let result = client.replace_workload(&spec()).unwrap();
    let requests = server.finish();

    assert_eq!(result, json!({}));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "PUT");
    assert_eq!(requests[0].url, "/api/config/namespaces/apps/workloads/web");
    assert_eq!(requests[0].json()["metadata"]["namespace"], "apps");
}

#[test]
fn get_fetches_item_without_body() {
    let server = scripted_server(vec![(200, r#"{"name":"web","spec":{}}"#)]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let result = client.get_workload("web").unwrap();
    let requests = server.finish();

    assert_eq!(result["name"], "web");
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(requests[0].url, "/api/config/namespaces/apps/workloads/web");
    assert!(requests[0].body.is_empty());
}

#[test]
fn delete_sends_name_and_namespace() {
    let server = scripted_server(vec![(200, r#"{"deleted":true}"#)]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let result = client.delete_workload("web").unwrap();
    let requests = server.finish();

    assert_eq!(result, json!({"deleted": true}));
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "DELETE");
    assert_eq!(requests[0].url, "/api/config/namespaces/apps/workloads/web");
    assert_eq!(requests[0].json(), json!({"name": "web", "namespace": "apps"}));
}

#[test]
fn delete_with_empty_body_reports_deleted() {
    let server = scripted_server(vec![(200, "")]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let result = client.delete_workload("web").unwrap();
    server.finish();

    assert_eq!(result, json!({"status": "deleted"}));
}

#[test]
fn non_success_status_carries_body() {
    let server = scripted_server(vec![(409, r#"{"code":6,"message":"already exists"}"#)]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let err = client.create_workload(&spec()).unwrap_err();
    let requests = server.finish();

    assert_eq!(requests.len(), 1);
    match &err {
        WorkloadError::Status {
            status,
            body,
        } => {
            assert_eq!(*status, 409);
            assert!(body.contains("already exists"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.response_body(), Some(r#"{"code":6,"message":"already exists"}"#));
}

#[test]
fn invalid_json_response_is_rejected() {
    let server = scripted_server(vec![(200, "not json")]);
    let client = WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap();

    let err = client.get_workload("web").unwrap_err();
    server.finish();

    assert!(matches!(err, WorkloadError::Json(_)), "unexpected error: {err:?}");
}

#[test]
fn trailing_slash_in_base_url_is_ignored() {
    let server = scripted_server(vec![(200, "{}")]);
    let base = format!("{}/", server.base_url);
    let client = WorkloadClient::new(&settings(&base, "acme")).unwrap();

    client.get_workload("web").unwrap();
    let requests = server.finish();

    assert_eq!(requests[0].url, "/api/config/namespaces/apps/workloads/web");
}

#[test]
fn connection_failure_is_transport_error() {
    let client = WorkloadClient::new(&settings("http://127.0.0.1:1/api", "acme")).unwrap();

    let err = client.get_workload("web").unwrap_err();

    assert!(matches!(err, WorkloadError::Transport(_)), "unexpected error: {err:?}");
    assert_eq!(err.response_body(), None);
}

#[test]
fn audit_records_one_event_per_request() {
    let server = scripted_server(vec![(200, "{}"), (404, "missing")]);
    let sink = Arc::new(MemoryAuditSink::new());
    let client =
        WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap().with_audit(sink.clone());

    client.replace_workload(&spec()).unwrap();
    client.get_workload("web").unwrap_err();
    server.finish();

    let records: Vec<Value> =
        sink.records().iter().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["event"], "workload_request");
    assert_eq!(records[0]["operation"], "replace");
    assert_eq!(records[0]["method"], "PUT");
    assert_eq!(records[0]["outcome"], "ok");
    assert_eq!(records[0]["status"], 200);
    assert_eq!(records[1]["operation"], "get");
    assert_eq!(records[1]["outcome"], "http_error");
    assert_eq!(records[1]["status"], 404);
    assert!(records.iter().all(|record| !record.to_string().contains("test-token")));
}

#[test]
fn undecodable_success_body_is_audited_as_invalid_response() {
    let server = scripted_server(vec![(200, "not json"), (200, "<html></html>"), (200, "")]);
    let sink = Arc::new(MemoryAuditSink::new());
    let client =
        WorkloadClient::new(&settings(&server.base_url, "acme")).unwrap().with_audit(sink.clone());

    client.get_workload("web").unwrap_err();
    client.delete_workload("web").unwrap_err();
    client.delete_workload("web").unwrap();
    server.finish();

    let records: Vec<Value> =
        sink.records().iter().map(|line| serde_json::from_str(line).unwrap()).collect();
    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["operation"], "get");
    assert_eq!(records[0]["outcome"], "invalid_response");
    assert_eq!(records[0]["status"], 200);
    assert_eq!(records[1]["operation"], "delete");
    assert_eq!(records[1]["outcome"], "invalid_response");
    assert_eq!(records[2]["operation"], "delete");
    assert_eq!(records[2]["outcome"], "ok");
}
