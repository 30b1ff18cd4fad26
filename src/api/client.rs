use crate::config::ApiConfig;
use crate::session::SessionMetadata;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const USER_AGENT: &str = concat!("spjall-sessions/", env!("CARGO_PKG_VERSION"));

/// Client for the Spjall sessions API
pub struct SessionsClient {
    http: reqwest::Client,
    sessions_url: String,
    include_partial: bool,
}

impl SessionsClient {
    pub fn new(api: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(secs) = api.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            sessions_url: api.sessions_url.trim_end_matches('/').to_string(),
            include_partial: api.include_partial,
        })
    }

    pub fn sessions_url(&self) -> &str {
        &self.sessions_url
    }

    /// Where the audio archive for a session is served
    pub fn archive_url(&self, session_id: &str) -> String {
        format!("{}/{}", self.sessions_url, session_id)
    }

    /// Fetch the list of all recorded sessions
    pub async fn fetch_sessions(&self) -> Result<Vec<SessionMetadata>> {
        info!("Fetching sessions from {}", self.sessions_url);

        let mut request = self.http.get(&self.sessions_url);
        if self.include_partial {
            request = request.query(&[("partial", "true")]);
        }

        let body = request
            .send()
            .await
            .context("Failed to request session list")?
            .error_for_status()
            .context("Session list request was rejected")?
            .text()
            .await
            .context("Failed to read session list")?;

        let sessions: Vec<SessionMetadata> =
            serde_json::from_str(&body).context("Failed to parse session list")?;

        info!("Fetched {} sessions", sessions.len());

        Ok(sessions)
    }

    /// Download a session's audio archive to `<dir>/<session_id>.zip`.
    ///
    /// The body is written verbatim and replaces any existing file.
    pub async fn download_archive(&self, session_id: &str, dir: &Path) -> Result<PathBuf> {
        let url = self.archive_url(session_id);
        info!("Downloading archive for {} from {}", session_id, url);

        let bytes = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to request archive for {}", session_id))?
            .error_for_status()
            .with_context(|| format!("Archive request for {} was rejected", session_id))?
            .bytes()
            .await
            .with_context(|| format!("Failed to read archive for {}", session_id))?;

        let path = dir.join(format!("{}.zip", session_id));
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("Failed to write archive: {:?}", path))?;

        info!("Saved {} ({} bytes)", path.display(), bytes.len());

        Ok(path)
    }
}
