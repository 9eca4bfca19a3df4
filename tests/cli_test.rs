//! Tests for the maintenance CLI: library entry points and the built binary.

use std::process::Command;

use orbit_api::cli::check;
use url::Url;

mod common;

fn cli() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_orbit-cli"));
    cmd.env("ORBIT_CLI_TEST_SECRET", common::TEST_SECRET)
        .env_remove("ORBIT_TOKEN")
        .args(["token", "--secret-env", "ORBIT_CLI_TEST_SECRET"]);
    cmd
}

#[tokio::test]
async fn test_check_passes_for_allowed_origin() {
    let (addr, shutdown) = common::start_server(common::test_state()).await;
    let base = Url::parse(&format!("http://{}", addr)).unwrap();
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let report = check(&client, &base, "http://localhost:5173", None).await.unwrap();
    assert!(report.passed(), "{:?}", report);
    assert_eq!(report.allow_origin, "http://localhost:5173");
    assert_eq!(report.authenticated, Some(false));

    shutdown.trigger();
}

#[tokio::test]
async fn test_check_fails_for_unknown_origin() {
    let (addr, shutdown) = common::start_server(common::test_state()).await;
    let base = Url::parse(&format!("http://{}", addr)).unwrap();
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let report = check(&client, &base, "https://evil.example", None).await.unwrap();
    assert!(!report.passed());
    assert_eq!(report.allow_origin, "https://orbitsaas.cloud");

    shutdown.trigger();
}

#[tokio::test]
async fn test_check_with_token_requires_authentication() {
    let (addr, shutdown) = common::start_server(common::test_state()).await;
    let base = Url::parse(&format!("http://{}", addr)).unwrap();
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let bogus = check(&client, &base, "http://localhost:5173", Some("not.a.token"))
        .await
        .unwrap();
    assert!(!bogus.passed());

    let out = cli().args(["sign"]).output().unwrap();
    let token = String::from_utf8(out.stdout).unwrap();
    let signed = check(&client, &base, "http://localhost:5173", Some(token.trim()))
        .await
        .unwrap();
    assert!(signed.passed(), "{:?}", signed);

    shutdown.trigger();
}

#[test]
fn test_binary_sign_then_verify() {
    let out = cli()
        .args(["sign", "--claims", r#"{"sub":"cli","role":"editor"}"#])
        .output()
        .unwrap();
    assert!(out.status.success());
    let token = String::from_utf8(out.stdout).unwrap();

    let out = cli().args(["verify", token.trim()]).output().unwrap();
    assert!(out.status.success());
    let claims: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(claims["sub"], "cli");
    assert_eq!(claims["role"], "editor");
    assert!(claims["exp"].is_u64());
}

#[test]
fn test_binary_verify_rejects_garbage() {
    let out = cli().args(["verify", "garbage"]).output().unwrap();
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Token rejected"));
}

#[test]
fn test_binary_sign_rejects_non_object_claims() {
    let out = cli().args(["sign", "--claims", "[1, 2]"]).output().unwrap();
    assert!(!out.status.success());
}

#[test]
fn test_binary_requires_secret() {
    let out = Command::new(env!("CARGO_BIN_EXE_orbit-cli"))
        .env_remove("ORBIT_CLI_TEST_MISSING")
        .args(["token", "--secret-env", "ORBIT_CLI_TEST_MISSING", "sign"])
        .output()
        .unwrap();
    assert!(!out.status.success());
}
