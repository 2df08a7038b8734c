// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! End-to-end session lifecycle against a mock credential endpoint and a
//! real profile directory.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use mockito::{Matcher, Server};
use serde_json::json;
use tempfile::TempDir;

use session_gate::config::GateConfig;
use session_gate::router::{RouteMatch, View, ADMIN_PATH, LOGIN_PATH, USER_PATH};
use session_gate::storage::SessionRepository;
use session_gate::SessionGate;

fn unsigned_token(payload: &str) -> String {
    let header = r#"{"alg":"RS256","typ":"JWT"}"#;
    format!(
        "{}.{}.fake_signature",
        URL_SAFE_NO_PAD.encode(header.as_bytes()),
        URL_SAFE_NO_PAD.encode(payload.as_bytes())
    )
}

fn gate_for(base_url: &str, dir: &TempDir) -> SessionGate {
    let config = GateConfig::default()
        .with_base_url(base_url)
        .expect("valid base url")
        .with_profile_dir(dir.path().join("profile"));
    SessionGate::open(&config).expect("gate opens")
}

#[tokio::test]
async fn admin_login_navigates_and_authenticates_calls() {
    let mut server = Server::new_async().await;
    let token = unsigned_token(r#"{"sub":"root","role":"ADMIN","exp":1}"#);
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "token": token }).to_string())
        .create_async()
        .await;
    let reports = server
        .mock("GET", "/api/reports")
        .match_header("authorization", format!("Bearer {token}").as_str())
        .with_status(200)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let gate = gate_for(&format!("{}/api", server.url()), &dir);

    // Anonymous: everything private lands on login.
    assert_eq!(gate.router.navigate(ADMIN_PATH).unwrap().path, LOGIN_PATH);

    let session = gate.auth.login("root", "pw").await.expect("login succeeds");
    assert_eq!(session.identity, "root");

    // Expired `exp` is not enforced; role compares case-insensitively.
    let nav = gate.router.navigate(ADMIN_PATH).unwrap();
    assert_eq!(nav.route, RouteMatch::View(View::Admin));
    assert!(!nav.was_redirected());
    assert_eq!(gate.router.navigate(USER_PATH).unwrap().path, ADMIN_PATH);

    gate.api.get("/reports").await.unwrap();
    reports.assert_async().await;

    gate.auth.logout();
    assert_eq!(gate.router.navigate(USER_PATH).unwrap().path, LOGIN_PATH);
}

#[tokio::test]
async fn register_flow_ends_on_user_view() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::PartialJson(json!({ "role": "user" })))
        .with_status(200)
        .create_async()
        .await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(json!({ "token": unsigned_token(r#"{"sub":"bo"}"#) }).to_string())
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let gate = gate_for(&format!("{}/api", server.url()), &dir);

    let session = gate
        .auth
        .register("bo", "bo@example.com", "pw")
        .await
        .expect("register succeeds");
    assert_eq!(session.role.as_str(), "user");

    let nav = gate.router.navigate(ADMIN_PATH).unwrap();
    assert_eq!(nav.path, USER_PATH);
    assert_eq!(nav.route, RouteMatch::View(View::User));
}

#[tokio::test]
async fn failed_login_keeps_previous_session_on_disk() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(200)
        .with_body(json!({ "token": unsigned_token(r#"{"sub":"ana","role":"user"}"#) }).to_string())
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let gate = gate_for(&format!("{}/api", server.url()), &dir);
    let first = gate.auth.login("ana", "pw").await.unwrap();

    // Same profile, endpoint now unreachable.
    let offline = gate_for("http://127.0.0.1:9/api", &dir);
    assert_eq!(offline.auth.login("ana", "pw").await, None);
    assert_eq!(offline.sessions.current().unwrap(), Some(first));
}

#[test]
fn corrupted_profile_is_treated_as_signed_out() {
    let dir = TempDir::new().unwrap();
    let gate = gate_for("http://127.0.0.1:9/api", &dir);
    std::fs::write(dir.path().join("profile").join("session.json"), "{ not json").unwrap();

    assert!(gate.sessions.current().is_err());
    assert_eq!(gate.auth.current_user(), None);
    assert_eq!(gate.router.navigate(ADMIN_PATH).unwrap().path, LOGIN_PATH);

    gate.auth.logout();
    assert_eq!(gate.sessions.current().unwrap(), None);
}
