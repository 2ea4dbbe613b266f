//! Integration tests for the `marquee` CLI binary.
//!
//! Parsing, help and completions run without a backend. Everything else
//! talks to a wiremock server passed in with `--base-url`.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// `{"sub":"auth0|42","permissions":["read:actors","delete:actors"]}`, unsigned.
const TEST_TOKEN: &str = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.\
    eyJzdWIiOiJhdXRoMHw0MiIsInBlcm1pc3Npb25zIjpbInJlYWQ6YWN0b3JzIiwiZGVsZXRlOmFjdG9ycyJdfQ.\
    signature";

/// Build a [`Command`] for the `marquee` binary with env isolation.
///
/// Clears all `MARQUEE_*` env vars and points config directories at a
/// fresh temp dir so tests never touch the user's real configuration.
/// Stdin is an empty pipe, so nothing ever waits on a prompt.
fn marquee_cmd(home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("marquee");
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .env_remove("MARQUEE_PROFILE")
        .env_remove("MARQUEE_BASE_URL")
        .env_remove("MARQUEE_TOKEN")
        .env_remove("MARQUEE_OUTPUT")
        .env_remove("MARQUEE_INSECURE")
        .env_remove("MARQUEE_TIMEOUT")
        .write_stdin("");
    cmd
}

fn against(server: &MockServer, home: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = marquee_cmd(home);
    cmd.args(["--base-url", &server.uri()]);
    cmd
}

fn movie_page() -> serde_json::Value {
    json!({
        "success": true,
        "movies": [
            { "id": 1, "title": "Metropolis", "genre": "SCI_FI", "releaseDate": "1927-01-10", "actors": [] },
            { "id": 2, "title": "The General", "genre": "COMEDY", "actors": [] }
        ],
        "totalMovies": 2,
        "offset": 0
    })
}

fn actor_envelope() -> serde_json::Value {
    json!({
        "success": true,
        "actor": {
            "id": 4, "name": "Brigitte Helm", "age": 30, "gender": "FEMALE",
            "photoUrl": "https://img.example/helm.png", "movies": []
        }
    })
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let home = tempfile::tempdir().unwrap();
    let output = marquee_cmd(&home).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_resources() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home).arg("--help").assert().success().stdout(
        predicate::str::contains("movies")
            .and(predicate::str::contains("actors"))
            .and(predicate::str::contains("cast"))
            .and(predicate::str::contains("permissions")),
    );
}

#[test]
fn test_completions_bash() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_invalid_output_format() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["--output", "xml", "movies", "list"])
        .assert()
        .code(2);
}

#[test]
fn test_config_path_names_marquee() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marquee").and(predicate::str::contains("config.toml")));
}

#[test]
fn test_malformed_config_is_never_overwritten() {
    let home = tempfile::tempdir().unwrap();
    let out = marquee_cmd(&home).args(["config", "path"]).output().unwrap();
    let config_file = std::path::PathBuf::from(String::from_utf8(out.stdout).unwrap().trim());
    std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();

    let original = "[profiles.prod]\ntimeout = \"ten\"\n\n[profiles.staging]\nbase_url = \"http://staging:5000\"\n";
    std::fs::write(&config_file, original).unwrap();

    marquee_cmd(&home)
        .args(["--profile", "dev", "config", "set", "base_url", "http://localhost:5000"])
        .assert()
        .failure();
    marquee_cmd(&home)
        .args(["config", "use", "staging"])
        .assert()
        .failure();

    assert_eq!(std::fs::read_to_string(&config_file).unwrap(), original);
}

#[test]
fn test_unknown_profile_is_reported() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["--profile", "staging", "movies", "list"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Profile 'staging' not found"));
}

#[test]
fn test_permissions_decode_token_claims() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["--token", TEST_TOKEN, "-o", "plain", "permissions"])
        .assert()
        .success()
        .stdout("read:actors\ndelete:actors\n");
}

#[test]
fn test_unreachable_backend_shows_retry_message() {
    let home = tempfile::tempdir().unwrap();
    marquee_cmd(&home)
        .args(["--base-url", "http://127.0.0.1:9", "movies", "list"])
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Error occurred - please try again."));
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_movies_list_plain_prints_ids() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .and(query_param("page", "1"))
        .and(query_param("search", "the"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page()))
        .expect(1)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["-o", "plain", "movies", "list", "--search", " the "])
        .assert()
        .success()
        .stdout("1\n2\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_movies_list_table_shows_footer() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(movie_page()))
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["movies", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Metropolis"))
        .stderr(predicate::str::contains("Page 1 of 1 (2 movies)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_movie_exits_not_found() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/9"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["movies", "get", "9"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("movie 9 not found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_token_flag_sends_bearer_header() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actors/4"))
        .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["--token", TEST_TOKEN, "-o", "json", "actors", "get", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"name\": \"Brigitte Helm\""));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_actors_add_prints_new_id() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/actors"))
        .and(body_json(json!({ "name": "Brigitte Helm", "age": 30, "gender": "FEMALE" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true, "id": 7 })))
        .expect(1)
        .mount(&server)
        .await;

    against(&server, &home)
        .args([
            "actors", "add", "--name", " Brigitte Helm ", "--age", "30", "--gender", "female",
        ])
        .assert()
        .success()
        .stdout("7\n")
        .stderr(predicate::str::contains("201: Created"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_actor_is_never_sent() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["actors", "add", "--name", "Nobody", "--age", "zero"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("age"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_write_shows_status_line() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/actors/4"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["--yes", "actors", "delete", "4"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("401: Unauthorized"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_needs_yes_without_a_terminal() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["movies", "delete", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("requires confirmation"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_dry_run_sends_nothing() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actors/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    against(&server, &home)
        .args([
            "-o", "plain", "actors", "edit", "4", "--age", "31", "--photo-url", "", "--dry-run",
        ])
        .assert()
        .success()
        .stdout("remove /photoUrl\nadd /age 31\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_edit_patches_changed_fields_only() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/actors/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(actor_envelope()))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path("/actors/4"))
        .and(header("content-type", "application/json-patch+json"))
        .and(body_json(json!([{ "op": "add", "path": "/age", "value": 31 }])))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["-o", "plain", "actors", "edit", "4", "--age", "31", "--name", "Brigitte Helm"])
        .assert()
        .success()
        .stderr(predicate::str::contains("200: OK"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_cast_remove_reloads_movie() {
    let home = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "movie": { "id": 1, "title": "Metropolis", "genre": "SCI_FI", "actors": [] }
        })))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/casts/movies/1/actors/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    against(&server, &home)
        .args(["--yes", "cast", "remove", "--movie", "1", "--actor", "4"])
        .assert()
        .success()
        .stderr(predicate::str::contains("200: OK"));
}
