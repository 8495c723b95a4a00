use assert_cmd::prelude::*;
use chrono::Utc;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const USER_JSON: &str = r#"{"id":"u1","name":"Ada","email":"ada@example.com"}"#;
const TOKENS_JSON: &str =
    r#"{"accessToken":"fresh","refreshToken":"refresh-2","tokenType":"Bearer","expiresIn":900}"#;

fn blogop() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("blogop"));
    cmd.env_remove("BLOGOP_CONFIG")
        .env_remove("BLOGOP_API_HOST")
        .env_remove("BLOGOP_FORMAT")
        .env_remove("BLOGOP_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

fn write_config(dir: &Path, api_host: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    fs::write(&path, format!("api_host: {api_host}\n")).expect("failed to write config");
    path
}

fn write_session(dir: &Path, access_token: &str) -> PathBuf {
    let path = dir.join("session.yaml");
    let expires_at = (Utc::now() + chrono::Duration::minutes(10)).to_rfc3339();
    let contents = format!(
        "access_token: {access_token}\nrefresh_token: refresh-1\ntoken_type: Bearer\nexpires_at: \"{expires_at}\"\n"
    );
    fs::write(&path, contents).expect("failed to write session");
    path
}

#[test]
fn version_prints_package_version() -> Result<(), Box<dyn std::error::Error>> {
    blogop()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    Ok(())
}

#[test]
fn status_without_session_uses_custom_config_path() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://127.0.0.1:1");

    let assert = blogop()
        .arg("status")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains(&config_path.to_string_lossy().to_string()));
    assert!(stdout.contains("http://127.0.0.1:1/api/v1"));
    assert!(stdout.contains("Not signed in"));
    Ok(())
}

#[test]
fn whoami_without_session_fails_with_login_hint() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = write_config(temp.path(), "http://127.0.0.1:1");

    blogop()
        .arg("whoami")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("blogop login"));
    Ok(())
}

#[test]
fn logout_without_session_is_local() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    // Unroutable host: any request would fail the command
    let config_path = write_config(temp.path(), "http://127.0.0.1:1");

    blogop()
        .arg("logout")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Not signed in"));
    Ok(())
}

#[test]
fn config_set_host_persists() -> Result<(), Box<dyn std::error::Error>> {
    let temp = tempdir()?;
    let config_path = temp.path().join("config.yaml");

    blogop()
        .args(["config", "set-host", "https://blog.example.com/"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    blogop()
        .args(["config", "show"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("api_host: https://blog.example.com"));
    Ok(())
}

#[test]
fn post_create_requires_content() -> Result<(), Box<dyn std::error::Error>> {
    blogop()
        .args(["post", "create", "--title", "Hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--content"));
    Ok(())
}

#[test]
fn completion_generates_script() -> Result<(), Box<dyn std::error::Error>> {
    blogop()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("blogop"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn post_list_renders_json_with_meta() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _posts = server
        .mock("GET", "/api/v1/posts")
        .match_query(mockito::Matcher::UrlEncoded(
            "categoryId".into(),
            "c1".into(),
        ))
        .with_status(200)
        .with_body(r#"[{"id":"p1","title":"Hello world","content":"...","status":"PUBLISHED"}]"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    let assert = blogop()
        .args(["post", "list", "--category", "c1", "--format", "json"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(stdout.contains("Hello world"));
    assert!(stdout.contains("\"meta\""));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn login_stores_session_file() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _login = server
        .mock("POST", "/api/v1/auth/login")
        .with_status(200)
        .with_body(TOKENS_JSON)
        .create();
    let _me = server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(USER_JSON)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());

    blogop()
        .args(["login", "--email", "ada@example.com"])
        .arg("--config")
        .arg(&config_path)
        .env("BLOGOP_PASSWORD", "hunter2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Signed in as"));

    let session = fs::read_to_string(temp.path().join("session.yaml"))?;
    assert!(session.contains("access_token: fresh"));
    assert!(session.contains("refresh_token: refresh-2"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(temp.path().join("session.yaml"))?.permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn rejected_token_is_refreshed_once_and_persisted() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _stale_me = server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer stale")
        .with_status(401)
        .create();
    let refresh = server
        .mock("POST", "/api/v1/auth/refresh-token")
        .with_status(200)
        .with_body(TOKENS_JSON)
        .expect(1)
        .create();
    let _me = server
        .mock("GET", "/api/v1/auth/me")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(USER_JSON)
        .create();
    let _drafts = server
        .mock("GET", "/api/v1/posts/drafts")
        .match_header("authorization", "Bearer fresh")
        .with_status(200)
        .with_body(r#"[{"id":"d1","title":"Work in progress","status":"DRAFT"}]"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());
    let session_path = write_session(temp.path(), "stale");

    blogop()
        .args(["post", "drafts"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Work in progress"));

    refresh.assert();
    let session = fs::read_to_string(session_path)?;
    assert!(session.contains("access_token: fresh"));
    Ok(())
}

#[cfg_attr(not(feature = "http-tests"), ignore)]
#[test]
fn revoked_refresh_token_clears_session() -> Result<(), Box<dyn std::error::Error>> {
    let mut server = mockito::Server::new();
    let _me = server.mock("GET", "/api/v1/auth/me").with_status(401).create();
    let _refresh = server
        .mock("POST", "/api/v1/auth/refresh-token")
        .with_status(401)
        .with_body(r#"{"message":"Refresh token revoked"}"#)
        .create();

    let temp = tempdir()?;
    let config_path = write_config(temp.path(), &server.url());
    let session_path = write_session(temp.path(), "stale");

    blogop()
        .args(["post", "drafts"])
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("session has expired"))
        .stderr(predicate::str::contains("→ Run 'blogop login'"))
        .stderr(predicate::str::contains("WARN").not());

    assert!(!session_path.exists());
    Ok(())
}
