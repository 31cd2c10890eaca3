// crates/edge-deploy-workload/tests/common/mod.rs
// ============================================================================
// Module: Workload Test Fixtures
// Description: Scripted local HTTP server for workload integration tests.
// Purpose: Capture outbound requests and reply with canned responses.
// Dependencies: tiny_http
// ============================================================================

//! ## Overview
//! Spawns a loopback `tiny_http` server that answers a fixed script of
//! responses, then keeps listening briefly so unexpected extra requests are
//! captured too.

#![allow(dead_code, reason = "Shared fixtures are not used by every test binary.")]

use std::thread;
use std::time::Duration;

use tiny_http::Response;
use tiny_http::Server;

/// Wait for a scripted request before giving up.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Grace period for detecting extra requests after the script ends.
const EXTRA_REQUEST_WINDOW: Duration = Duration::from_millis(200);

/// Request observed by the scripted server.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// HTTP method.
    pub method: String,
    /// Request path and query.
    pub url: String,
    /// Header pairs in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw request body.
    pub body: String,
}

impl CapturedRequest {
    /// Returns the first header value matching `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(field, _)| field.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Parses the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Running scripted server.
pub struct ScriptedServer {
    /// Base URL, e.g. `http://127.0.0.1:PORT/api`.
    pub base_url: String,
    /// Handle yielding every captured request.
    handle: thread::JoinHandle<Vec<CapturedRequest>>,
}

impl ScriptedServer {
    /// Waits for the server thread and returns the captured requests.
    pub fn finish(self) -> Vec<CapturedRequest> {
        self.handle.join().unwrap()
    }
}

/// Starts a server that answers each request with the next `(status, body)`.
pub fn scripted_server(script: Vec<(u16, &'static str)>) -> ScriptedServer {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    let base_url = format!("http://{addr}/api");
    let handle = thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, body) in script {
            let Ok(Some(request)) = server.recv_timeout(REQUEST_TIMEOUT) else {
                return captured;
            };
            captured.push(respond(request, status, body));
        }
        while let Ok(Some(request)) = server.recv_timeout(EXTRA_REQUEST_WINDOW) {
            captured.push(respond(request, 500, "unexpected request"));
        }
        captured
    });
    ScriptedServer {
        base_url,
        handle,
    }
}

/// Records a request and replies with the scripted response.
fn respond(mut request: tiny_http::Request, status: u16, body: &str) -> CapturedRequest {
    let mut payload = String::new();
    let _ = request.as_reader().read_to_string(&mut payload);
    let captured = CapturedRequest {
        method: request.method().to_string(),
        url: request.url().to_string(),
        headers: request
            .headers()
            .iter()
            .map(|header| (header.field.as_str().to_string(), header.value.as_str().to_string()))
            .collect(),
        body: payload,
    };
    let _ = request.respond(Response::from_string(body).with_status_code(status));
    captured
}
