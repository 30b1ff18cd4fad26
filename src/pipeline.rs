//! One run of the extraction: fetch, classify, write, and tally

use crate::api::SessionsClient;
use crate::config::Config;
use crate::manifest::{ManifestEntry, ManifestWriter};
use crate::session::{DurationTotals, LabelCounts};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info};

/// Outcome of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub totals: DurationTotals,

    /// Manifest rows for sessions from the API
    pub session_rows: usize,

    /// Manifest rows appended from the manual entries
    pub manual_rows: usize,

    /// Labels across all manifest rows
    pub labels: LabelCounts,

    pub manifest_path: PathBuf,

    /// Archives downloaded for newly valid sessions
    pub archives: Vec<PathBuf>,
}

/// Classify every session from the API, write the manifest, and download the
/// archives of sessions that newly qualify as valid
pub async fn run(config: &Config, client: &SessionsClient) -> Result<RunSummary> {
    let policy = config.policy.to_policy();
    info!("Classification policy lists {} sessions", policy.len());

    let sessions = client.fetch_sessions().await?;

    let archive_dir = config.output.archive_dir();
    let mut manifest = ManifestWriter::create(config.output.manifest_path())?;
    let mut totals = DurationTotals::new();
    let mut labels = LabelCounts::default();
    let mut archives = Vec::new();

    for session in &sessions {
        let classification = policy.classify(session);
        debug!(
            "{} -> {} ({}s)",
            session.session_id, classification.label, classification.credited_seconds
        );

        manifest.write_entry(&ManifestEntry::session(&session.session_id, classification.label))?;
        totals.credit(classification.label, classification.credited_seconds);
        labels.record(classification.label);

        if classification.download {
            if config.output.download_archives {
                if archives.is_empty() {
                    fs::create_dir_all(&archive_dir).with_context(|| {
                        format!("Failed to create archive directory: {:?}", archive_dir)
                    })?;
                }
                let path = client.download_archive(&session.session_id, &archive_dir).await?;
                archives.push(path);
            } else {
                info!("Skipping archive download for {}", session.session_id);
            }
        }
    }
    let session_rows = manifest.rows();

    for entry in &config.manual_entries {
        manifest.write_entry(&entry.to_manifest_entry())?;
        totals.credit(entry.label, entry.credited_seconds());
        labels.record(entry.label);
    }

    let written = manifest.finish()?;
    let manual_rows = written.rows - session_rows;

    info!(
        "Labelled {} rows: {} valid, {} partial, {} invalid",
        labels.total(),
        labels.valid,
        labels.partial,
        labels.invalid
    );

    Ok(RunSummary {
        totals,
        session_rows,
        manual_rows,
        labels,
        manifest_path: written.path,
        archives,
    })
}
