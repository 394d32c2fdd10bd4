// crates/login-gate-providers/tests/gate_end_to_end.rs
// ============================================================================
// Module: Gate End-to-End Tests
// Description: Gates evaluated against a local Group Web Service.
// Purpose: Validate the query path and fail policies over real HTTP.
// Dependencies: login-gate-providers, login-gate-core, tiny_http
// ============================================================================

//! ## Overview
//! Each test serves one canned response and checks both the requested path
//! and the gate decision.

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

use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use login_gate_core::LoginRequest;
use login_gate_core::SlackGate;
use login_gate_core::WarningGate;
use login_gate_core::WarningGateConfig;
use login_gate_providers::GwsHttpConfig;
use login_gate_providers::GwsHttpSource;
use tiny_http::Response;
use tiny_http::Server;

/// Local Group Web Service answering one request.
struct LocalService {
    /// Base URL ending in `/group/`.
    base: String,
    /// Receives the requested path.
    paths: mpsc::Receiver<String>,
    /// Server thread.
    handle: thread::JoinHandle<()>,
}

impl LocalService {
    /// Serves `body` with `status` for a single request.
    fn serve(body: &'static str, status: u16) -> Self {
        let server = Server::http("127.0.0.1:0").unwrap();
        let base = format!("http://{}/group/", server.server_addr().to_ip().unwrap());
        let (sender, paths) = mpsc::channel();
        let handle = thread::spawn(move || {
            if let Ok(request) = server.recv() {
                sender.send(request.url().to_string()).unwrap();
                let _ = request.respond(Response::from_string(body).with_status_code(status));
            }
        });
        Self {
            base,
            paths,
            handle,
        }
    }

    /// Returns the requested path after the server thread finishes.
    fn finish(self) -> String {
        self.handle.join().unwrap();
        self.paths.recv().unwrap()
    }
}

fn source() -> Arc<GwsHttpSource> {
    Arc::new(
        GwsHttpSource::new(GwsHttpConfig {
            allow_http: true,
            ..GwsHttpConfig::default()
        })
        .unwrap(),
    )
}

#[test]
fn slack_member_allowed_over_http() {
    let service = LocalService::serve(r#"{"data":[{"id":"alice"},{"id":"bob"}]}"#, 200);
    let gate = SlackGate::new(service.base.clone(), source());
    assert!(gate.allows(&LoginRequest::new("bob", "https://slack.example.com/sso")));
    assert_eq!(service.finish(), "/group/slack.example.com/effective_member/bob");
}

#[test]
fn slack_empty_list_denied_over_http() {
    let service = LocalService::serve(r#"{"data":[]}"#, 200);
    let gate = SlackGate::new(service.base.clone(), source());
    assert!(!gate.allows(&LoginRequest::new("bob", "https://slack.example.com")));
    service.finish();
}

#[test]
fn slack_server_error_fails_open() {
    let service = LocalService::serve("oops", 503);
    let gate = SlackGate::new(service.base.clone(), source());
    assert!(gate.allows(&LoginRequest::new("bob", "https://slack.example.com")));
    service.finish();
}

#[test]
fn warning_server_error_fails_closed() {
    let service = LocalService::serve("oops", 503);
    let gate = WarningGate::new(
        WarningGateConfig {
            gws_url_base: service.base.clone(),
            target_rpid: None,
            group_id: Some("u_notice".to_string()),
        },
        source(),
    );
    assert!(!gate.shows_warning(&LoginRequest::new("bob", "https://rp.example")));
    assert_eq!(service.finish(), "/group/u_notice/effective_member/bob");
}

#[test]
fn warning_member_warned_over_http() {
    let service = LocalService::serve(r#"{"data":[{"id":"bob"}]}"#, 200);
    let gate = WarningGate::new(
        WarningGateConfig {
            gws_url_base: service.base.clone(),
            target_rpid: Some("https://rp.example".to_string()),
            group_id: Some("u_notice".to_string()),
        },
        source(),
    );
    assert!(gate.shows_warning(&LoginRequest::new("bob", "https://rp.example")));
    service.finish();
}
