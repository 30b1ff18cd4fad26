// End-to-end tests: a mock sessions API, a temp output directory, and the
// default curation tables.

use anyhow::Result;
use spjall_sessions::{run, Config, SessionsClient};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VALID_ID: &str = "2284fd64-848a-4516-8ffd-e104575f930b";
const PARTIAL_ID: &str = "334c8c37-90d7-4269-a164-a7bf762a09f5";
const INVALID_ID: &str = "319735f1-f2bc-41db-908d-00023eeea23a";
const NEW_ID: &str = "5b0f6c1e-9d4e-4d7a-8f3a-0c2b7e1d9a44";

const MANUAL_PARTIAL_SECS: f64 = (601 + 969 + 810 + 961) as f64;
const MANUAL_VALID_SECS: f64 = (1958 + 62) as f64;

const MANUAL_ROWS: [&str; 7] = [
    "30509101-ed6a-4153-b58c-085cea60f079,P,,not on mamma karl tvitugt",
    "38ced83e-c37d-4687-8f60-bd2332c7ab2d,P,,not on mamma",
    "42ae267b-891f-4232-b99b-fdc78da4986b,P,,not on mamma kona thritugt 2 voice one channel",
    "66f4f282-79c3-4f14-bcf8-fcc7bf401fd2,N,,not on mamma monologue",
    "c08bdf8a-8a21-4a60-a558-6bf0f5e30b93,P,,not on mamma",
    "non-spjall recording,Y,convo 2,",
    "pre-spjall recording,Y,convo 1,",
];

fn test_config(server: &MockServer, dir: &Path) -> Result<Config> {
    let mut config = Config::embedded()?;
    config.api.sessions_url = format!("{}/api/sessions", server.uri());
    config.output.manifest_path = dir.join("spjall_sessions.csv").display().to_string();
    config.output.archive_dir = dir.join("archives").display().to_string();
    Ok(config)
}

fn listed_sessions() -> serde_json::Value {
    serde_json::json!([
        {
            "session_id": VALID_ID,
            "client_a": {"duration_seconds": 100.0, "age": "20-29", "gender": "kona"},
            "client_b": {"duration_seconds": 110.0, "age": "30-39", "gender": "karl"}
        },
        {
            "session_id": PARTIAL_ID,
            "client_a": {"duration_seconds": 50.0, "age": "20-29", "gender": "kona"},
            "client_b": {"duration_seconds": 60.0, "age": "30-39", "gender": "karl"}
        },
        {
            "session_id": INVALID_ID,
            "client_a": {"duration_seconds": 70.0, "age": "20-29", "gender": "kona"},
            "client_b": {"duration_seconds": 80.0, "age": "30-39", "gender": "karl"}
        }
    ])
}

async fn mount_sessions(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Fails verification if any archive is requested that a test did not expect
async fn forbid_other_downloads(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/sessions/.+$"))
        .respond_with(ResponseTemplate::new(404))
        .expect(0)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_listed_sessions_end_to_end() -> Result<()> {
    let server = MockServer::start().await;
    mount_sessions(&server, listed_sessions()).await;
    forbid_other_downloads(&server).await;

    let dir = TempDir::new()?;
    let config = test_config(&server, dir.path())?;
    let client = SessionsClient::new(&config.api)?;

    let summary = run(&config, &client).await?;

    assert_eq!(summary.session_rows, 3);
    assert_eq!(summary.manual_rows, 7);
    assert!(summary.archives.is_empty());
    assert!(!dir.path().join("archives").exists());

    let manifest = fs::read_to_string(dir.path().join("spjall_sessions.csv"))?;
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(lines.len(), 1 + 3 + 7);
    assert_eq!(lines[0], "session id,usable,name");
    assert_eq!(lines[1], format!("{},Y,", VALID_ID));
    assert_eq!(lines[2], format!("{},P,", PARTIAL_ID));
    assert_eq!(lines[3], format!("{},N,", INVALID_ID));
    assert_eq!(&lines[4..], &MANUAL_ROWS[..]);

    let totals = summary.totals;
    assert_eq!(totals.valid_seconds, 100.0 + MANUAL_VALID_SECS);
    assert_eq!(totals.partial_seconds, 60.0 + MANUAL_PARTIAL_SECS);
    assert_eq!(
        totals.total_seconds,
        100.0 + 60.0 + MANUAL_VALID_SECS + MANUAL_PARTIAL_SECS
    );
    assert_eq!(totals.valid_hours(), 2120.0 / 3600.0);
    assert_eq!(totals.partial_hours(), 3401.0 / 3600.0);

    assert_eq!(summary.labels.valid, 1 + 2);
    assert_eq!(summary.labels.partial, 1 + 4);
    assert_eq!(summary.labels.invalid, 1 + 1);

    Ok(())
}

#[tokio::test]
async fn test_newly_valid_session_is_downloaded_once() -> Result<()> {
    let server = MockServer::start().await;

    let mut sessions = listed_sessions();
    sessions.as_array_mut().unwrap().extend([
        serde_json::json!({
            "session_id": NEW_ID,
            "client_a": {"duration_seconds": 300.0, "age": "40-49", "gender": "kona"},
            "client_b": {"duration_seconds": 290.0, "age": "50-59", "gender": "kona"}
        }),
        serde_json::json!({
            "session_id": "no-demographics",
            "client_a": {"duration_seconds": 200.0, "age": "", "gender": ""},
            "client_b": {"duration_seconds": 200.0, "age": "", "gender": ""}
        }),
    ]);
    mount_sessions(&server, sessions).await;

    let archive = b"PK\x05\x06 archive body".to_vec();
    Mock::given(method("GET"))
        .and(path(format!("/api/sessions/{}", NEW_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(archive.clone()))
        .expect(1)
        .mount(&server)
        .await;
    forbid_other_downloads(&server).await;

    let dir = TempDir::new()?;
    let config = test_config(&server, dir.path())?;
    let client = SessionsClient::new(&config.api)?;

    let summary = run(&config, &client).await?;

    let saved = dir.path().join("archives").join(format!("{}.zip", NEW_ID));
    assert_eq!(summary.archives, vec![saved.clone()]);
    assert_eq!(fs::read(&saved)?, archive);

    let manifest = fs::read_to_string(dir.path().join("spjall_sessions.csv"))?;
    let lines: Vec<&str> = manifest.lines().collect();
    assert_eq!(summary.session_rows, 5);
    assert_eq!(lines[4], format!("{},Y,", NEW_ID));
    assert_eq!(lines[5], "no-demographics,N,");

    assert_eq!(summary.totals.valid_seconds, 100.0 + 300.0 + MANUAL_VALID_SECS);
    assert_eq!(summary.totals.partial_seconds, 60.0 + MANUAL_PARTIAL_SECS);

    Ok(())
}

#[tokio::test]
async fn test_no_download_still_counts_session() -> Result<()> {
    let server = MockServer::start().await;
    mount_sessions(
        &server,
        serde_json::json!([{
            "session_id": NEW_ID,
            "client_a": {"duration_seconds": 300.0, "age": "40-49"},
            "client_b": {"duration_seconds": 290.0, "age": "50-59"}
        }]),
    )
    .await;
    forbid_other_downloads(&server).await;

    let dir = TempDir::new()?;
    let mut config = test_config(&server, dir.path())?;
    config.output.download_archives = false;
    let client = SessionsClient::new(&config.api)?;

    let summary = run(&config, &client).await?;

    assert!(summary.archives.is_empty());
    assert_eq!(summary.totals.valid_seconds, 300.0 + MANUAL_VALID_SECS);

    Ok(())
}

#[tokio::test]
async fn test_failed_session_fetch_aborts_run() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sessions"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new()?;
    let config = test_config(&server, dir.path())?;
    let client = SessionsClient::new(&config.api)?;

    assert!(run(&config, &client).await.is_err());
    assert!(!dir.path().join("spjall_sessions.csv").exists());

    Ok(())
}
