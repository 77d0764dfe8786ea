//! Staged workload file
//!
//! The workload is written to a temporary file in the destination directory
//! and persisted under its final name only after generation succeeded. The
//! final rename never replaces an existing file.

use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Workload file that becomes visible only on [`StagedArtifact::commit`]
#[derive(Debug)]
pub struct StagedArtifact {
    writer: BufWriter<NamedTempFile>,
    destination: PathBuf,
}

impl StagedArtifact {
    /// Stage a new file that will be committed to `destination`
    pub fn create(destination: &Path) -> Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let temp = tempfile::Builder::new()
            .prefix(".cfgsynth-")
            .suffix(".tmp")
            .tempfile_in(dir)
            .with_context(|| format!("Failed to create staging file in {}", dir.display()))?;

        Ok(Self {
            writer: BufWriter::new(temp),
            destination: destination.to_path_buf(),
        })
    }

    /// Writer for the workload contents
    pub fn writer(&mut self) -> &mut impl Write {
        &mut self.writer
    }

    /// Flush, sync and move the staged file to its destination
    ///
    /// Fails without touching the destination if a file already exists there.
    pub fn commit(self) -> Result<PathBuf> {
        let temp = self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())
            .context("Failed to flush workload file")?;

        temp.as_file()
            .sync_all()
            .context("Failed to sync workload file")?;

        let file: File = temp.persist_noclobber(&self.destination).map_err(|e| e.error).with_context(|| {
            format!("Failed to move workload file into place: {}", self.destination.display())
        })?;
        drop(file);

        Ok(self.destination)
    }
}
