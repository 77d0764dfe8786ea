//! Output targets
//!
//! Picks the file a workload is written to and guarantees it only ever holds a
//! complete workload.
//!
//! # Naming
//!
//! Automatically named outputs follow `{prefix}{n}.{extension}` with the
//! smallest `n` (starting at 0) whose path does not exist yet. Naming runs once,
//! before generation starts.
//!
//! # Atomicity
//!
//! [`file::StagedArtifact`] writes into a hidden temporary file next to the
//! destination and only renames it into place on commit. Dropping it without
//! committing deletes the temporary file.
//!
//! # Example
//!
//! ```no_run
//! use cfgsynth::target::next_free_path;
//! use std::path::Path;
//!
//! let path = next_free_path(Path::new("."), "cfg_synth", "txt");
//! println!("writing {}", path.display());
//! ```

pub mod file;

use std::path::{Path, PathBuf};

/// File name for index `n`
///
/// An empty extension yields `{prefix}{n}` without a trailing dot.
pub fn numbered_name(prefix: &str, n: u64, extension: &str) -> String {
    if extension.is_empty() {
        format!("{}{}", prefix, n)
    } else {
        format!("{}{}.{}", prefix, n, extension)
    }
}

/// First `{prefix}{n}.{extension}` in `dir` that does not exist
pub fn next_free_path(dir: &Path, prefix: &str, extension: &str) -> PathBuf {
    let mut n = 0u64;
    loop {
        let candidate = dir.join(numbered_name(prefix, n, extension));
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_numbered_name() {
        assert_eq!(numbered_name("cfg_synth", 0, "txt"), "cfg_synth0.txt");
        assert_eq!(numbered_name("cfg_synth", 12, "txt"), "cfg_synth12.txt");
        assert_eq!(numbered_name("run", 3, ""), "run3");
    }

    #[test]
    fn test_next_free_path_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            next_free_path(dir.path(), "cfg_synth", "txt"),
            dir.path().join("cfg_synth0.txt")
        );
    }

    #[test]
    fn test_next_free_path_skips_taken() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("cfg_synth0.txt"), "").unwrap();
        fs::write(dir.path().join("cfg_synth1.txt"), "").unwrap();
        fs::write(dir.path().join("cfg_synth3.txt"), "").unwrap();

        assert_eq!(
            next_free_path(dir.path(), "cfg_synth", "txt"),
            dir.path().join("cfg_synth2.txt")
        );
    }

    #[test]
    fn test_next_free_path_ignores_other_prefixes() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("other0.txt"), "").unwrap();
        fs::write(dir.path().join("cfg_synth0.cfg"), "").unwrap();

        assert_eq!(
            next_free_path(dir.path(), "cfg_synth", "txt"),
            dir.path().join("cfg_synth0.txt")
        );
    }
}
