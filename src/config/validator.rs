//! Configuration validation

use super::*;
use anyhow::Result;
use std::path::Path;

/// Validate complete configuration
pub fn validate_config(config: &Config) -> Result<()> {
    validate_output(&config.output)?;
    Ok(())
}

/// Validate output configuration
pub fn validate_output(output: &OutputConfig) -> Result<()> {
    match &output.target {
        OutputTarget::Stdout => {}
        OutputTarget::Path(path) => {
            if path.exists() {
                anyhow::bail!("output file already exists: {}", path.display());
            }
            validate_parent_dir(path, "output")?;
        }
        OutputTarget::AutoName {
            dir,
            prefix,
            extension,
        } => {
            if !dir.is_dir() {
                anyhow::bail!("output directory does not exist: {}", dir.display());
            }
            validate_name_part(prefix, "prefix")?;
            if prefix.is_empty() {
                anyhow::bail!("prefix must not be empty");
            }
            validate_name_part(extension, "extension")?;
            if extension.starts_with('.') {
                anyhow::bail!("extension must not start with '.', got {:?}", extension);
            }
        }
    }

    if let Some(ref summary) = output.summary_json {
        validate_parent_dir(summary, "summary")?;
        if summary.is_dir() {
            anyhow::bail!("summary path is a directory: {}", summary.display());
        }
    }

    Ok(())
}

/// Reject path separators inside a file name component
fn validate_name_part(part: &str, what: &str) -> Result<()> {
    if part.contains('/') || part.contains('\\') {
        anyhow::bail!("{} must not contain path separators, got {:?}", what, part);
    }
    Ok(())
}

/// The directory that will hold `path` must already exist
fn validate_parent_dir(path: &Path, what: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            anyhow::bail!(
                "{} directory does not exist: {}",
                what,
                parent.display()
            );
        }
    }
    Ok(())
}
