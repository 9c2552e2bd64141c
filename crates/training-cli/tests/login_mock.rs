//! Login command against mock ticket and backend servers.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn temp_training_home() -> TempDir {
    TempDir::new().expect("create temp training home")
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

async fn mount_ticket_server(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets"))
        .and(body_string_contains("username=HE170"))
        .respond_with(
            ResponseTemplate::new(201)
                .insert_header("location", format!("{}/cas/v1/tickets/TGT-1", server.uri())),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets/TGT-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ST-42-abc\n"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_login_prints_user() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_training_home();
    let server = MockServer::start().await;
    mount_ticket_server(&server).await;

    Mock::given(method("POST"))
        .and(path("/training/user/login"))
        .and(body_json(json!({ "serviceTicket": "ST-42-abc" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "authId": "Moony.Chen1595835757787",
            "emp": {
                "id": 135,
                "screenName": "Moony.Chen",
                "emid": "HE170",
                "firstName": "Moony",
                "lastName": "Chen",
                "active": true
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("training")
        .env("TRAINING_HOME", home.path())
        .env("TRAINING_API_BASE_URL", format!("{}/training", server.uri()))
        .env("TRAINING_CAS_BASE_URL", format!("{}/cas", server.uri()))
        .env("TRAINING_PASSWORD", "secret")
        .args(["login", "--username", "HE170"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as Moony Chen (Moony.Chen)"))
        .stdout(predicate::str::contains("Employee id: HE170"));
}

#[tokio::test]
async fn test_rejected_credentials_show_login_failed() {
    if !can_bind_localhost() {
        eprintln!("Skipping: cannot bind localhost TCP port in this environment.");
        return;
    }
    let home = temp_training_home();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cas/v1/tickets"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/training/user/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    cargo_bin_cmd!("training")
        .env("TRAINING_HOME", home.path())
        .env("TRAINING_API_BASE_URL", format!("{}/training", server.uri()))
        .env("TRAINING_CAS_BASE_URL", format!("{}/cas", server.uri()))
        .env_remove("TRAINING_PASSWORD")
        .args(["login", "--username", "HE170"])
        .write_stdin("wrong\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Login Failed"));
}

#[test]
fn test_demo_login() {
    let home = temp_training_home();

    cargo_bin_cmd!("training")
        .env("TRAINING_HOME", home.path())
        .env("TRAINING_PASSWORD", "anything")
        .args(["--demo", "login", "--username", "HE170"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moony Chen"));
}
