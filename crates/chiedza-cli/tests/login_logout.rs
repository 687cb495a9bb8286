//! Session commands against a mock auth service.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::{TempDir, tempdir};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANON: &str = "anon-key";

fn token_body(email: &str, role: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": "access-token-123456",
        "refresh_token": "refresh-token",
        "expires_in": 3600,
        "token_type": "bearer",
        "user": {
            "id": "user-1",
            "email": email,
            "user_metadata": { "role": role }
        }
    })
}

fn chiedza(home: &TempDir, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("chiedza");
    cmd.env("CHIEDZA_HOME", home.path())
        .env("CHIEDZA_REMOTE_URL", server.uri())
        .env("CHIEDZA_ANON_KEY", ANON)
        .env_remove("CHIEDZA_PASSWORD");
    cmd
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_status_logout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .and(query_param("grant_type", "password"))
        .and(header("apikey", ANON))
        .and(body_json(serde_json::json!({
            "email": "director@chiedza.org",
            "password": "s3cret"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("director@chiedza.org", "Director")),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/logout"))
        .and(header("authorization", "Bearer access-token-123456"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();

    chiedza(&home, &server)
        .env("CHIEDZA_PASSWORD", "s3cret")
        .args(["login", "--email", " director@chiedza.org "])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as director@chiedza.org (Director)"));
    assert!(home.path().join("session.json").exists());

    chiedza(&home, &server)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Role: Director"))
        .stdout(predicate::str::contains("access-token-123456").not());

    chiedza(&home, &server)
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));
    assert!(!home.path().join("session.json").exists());

    chiedza(&home, &server)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_failure_shows_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Invalid login credentials"
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    chiedza(&home, &server)
        .args(["login", "--email", "a@b.org", "--password", "wrong"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid login credentials"));
    assert!(!home.path().join("session.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_requires_password() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    chiedza(&home, &server)
        .args(["login", "--email", "a@b.org"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Email and password are required"));
}

#[test]
fn test_login_without_remote_fails() {
    let home = tempdir().unwrap();
    cargo_bin_cmd!("chiedza")
        .env("CHIEDZA_HOME", home.path())
        .env_remove("CHIEDZA_REMOTE_URL")
        .env_remove("CHIEDZA_ANON_KEY")
        .args(["login", "--email", "a@b.org", "--password", "pw"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not configured"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_write_commands_require_session() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();

    chiedza(&home, &server)
        .args(["groups", "add", "--name", "Tariro"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));

    chiedza(&home, &server)
        .args(["loans", "repay", "--id", "1", "--amount", "-5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("valid amount"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_add_group_after_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/v1/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(token_body("officer@chiedza.org", "Field Officer")),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/savings_groups"))
        .and(header("authorization", "Bearer access-token-123456"))
        .and(body_json(serde_json::json!({
            "name": "Tariro",
            "cluster_zone": "Bindura",
            "location_lat": -17.3,
            "location_lng": 0.0,
            "status": "active"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    chiedza(&home, &server)
        .args(["login", "--email", "officer@chiedza.org", "--password", "pw"])
        .assert()
        .success();

    chiedza(&home, &server)
        .args([
            "groups", "add", "--name", " Tariro ", "--cluster", "Bindura", "--lat", "-17.3",
            "--lng", "east",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered Tariro in Bindura"));
}
