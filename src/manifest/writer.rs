use super::entry::ManifestEntry;
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// First line of every manifest
pub const MANIFEST_HEADER: &str = "session id,usable,name";

/// What ended up in a finished manifest
#[derive(Debug, Clone)]
pub struct ManifestSummary {
    pub path: PathBuf,
    /// Rows written, not counting the header
    pub rows: usize,
}

/// Line-oriented writer for the session manifest
///
/// The file is truncated on creation and flushed by [`ManifestWriter::finish`]
/// (or, failing that, on drop).
pub struct ManifestWriter {
    writer: Option<BufWriter<File>>,
    path: PathBuf,
    rows: usize,
}

impl ManifestWriter {
    /// Create the manifest and write its header
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create manifest directory: {:?}", parent))?;
        }

        let file = File::create(&path)
            .with_context(|| format!("Failed to create manifest: {:?}", path))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", MANIFEST_HEADER).context("Failed to write manifest header")?;

        info!("Writing manifest to {}", path.display());

        Ok(Self {
            writer: Some(writer),
            path,
            rows: 0,
        })
    }

    pub fn write_entry(&mut self, entry: &ManifestEntry) -> Result<()> {
        if let Some(writer) = &mut self.writer {
            writeln!(writer, "{}", entry.to_line())
                .with_context(|| format!("Failed to write manifest row for {}", entry.session_id))?;
            self.rows += 1;
        }

        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn finish(mut self) -> Result<ManifestSummary> {
        if let Some(mut writer) = self.writer.take() {
            writer.flush().context("Failed to flush manifest")?;
        }

        info!("Manifest complete: {} rows in {}", self.rows, self.path.display());

        Ok(ManifestSummary {
            path: self.path.clone(),
            rows: self.rows,
        })
    }
}

impl Drop for ManifestWriter {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            if let Err(e) = writer.flush() {
                warn!("Failed to flush manifest on drop: {}", e);
            }
        }
    }
}
