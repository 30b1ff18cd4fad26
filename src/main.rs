use anyhow::Result;
use clap::Parser;
use spjall_sessions::config::Overrides;
use spjall_sessions::{report, Config, SessionsClient};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Extract the list of session ids from the Spjall sessions API, label them as
/// valid, partially valid or invalid, and report the hours collected.
#[derive(Parser)]
#[command(name = "spjall-sessions")]
#[command(version, about)]
struct Args {
    /// TOML file layered over the built-in settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session list endpoint
    #[arg(long)]
    sessions_url: Option<String>,

    /// Manifest to write
    #[arg(short, long)]
    output: Option<String>,

    /// Directory for downloaded session archives
    #[arg(long)]
    archive_dir: Option<String>,

    /// Include sessions where only one side was recorded
    #[arg(long)]
    include_partial: bool,

    /// Classify and count without downloading archives
    #[arg(long)]
    no_download: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            sessions_url: self.sessions_url.clone(),
            manifest_path: self.output.clone(),
            archive_dir: self.archive_dir.clone(),
            include_partial: self.include_partial,
            no_download: self.no_download,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(args.config.as_deref())?;
    cfg.apply_overrides(args.overrides());

    info!("Spjall sessions v{}", env!("CARGO_PKG_VERSION"));
    info!("Sessions API: {}", cfg.api.sessions_url);
    info!("Manifest: {}", cfg.output.manifest_path().display());

    let client = SessionsClient::new(&cfg.api)?;
    let summary = spjall_sessions::run(&cfg, &client).await?;

    info!(
        "{} sessions and {} manual entries written to {}",
        summary.session_rows,
        summary.manual_rows,
        summary.manifest_path.display()
    );
    if !summary.archives.is_empty() {
        info!("Downloaded {} archives", summary.archives.len());
    }

    report::print_report(&summary.totals, cfg.report.collection_goal_hours)?;

    Ok(())
}
