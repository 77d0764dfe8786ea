//! Configuration module
//!
//! Handles CLI argument parsing and validation. The generator itself takes no
//! workload configuration: everything here decides where the artifact goes and
//! how the run is seeded and reported.

pub mod cli;
pub mod validator;

use cli::Cli;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Directory scanned for a free name when `--output-dir` is absent
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Complete run configuration
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    pub output: OutputConfig,
    pub generator: GeneratorConfig,
    pub runtime: RuntimeConfig,
}

impl Config {
    /// Build configuration from CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        let target = if cli.stdout {
            OutputTarget::Stdout
        } else if let Some(ref path) = cli.output {
            OutputTarget::Path(path.clone())
        } else {
            OutputTarget::AutoName {
                dir: cli.output_dir.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
                prefix: cli.prefix.clone(),
                extension: cli.extension.clone(),
            }
        };

        Self {
            output: OutputConfig {
                target,
                summary_json: cli.summary_json.clone(),
            },
            generator: GeneratorConfig { seed: cli.seed },
            runtime: RuntimeConfig {
                quiet: cli.quiet,
                debug: cli.debug,
            },
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Serialize)]
pub struct OutputConfig {
    /// Where the workload file goes
    pub target: OutputTarget,
    /// Optional JSON summary export path
    pub summary_json: Option<PathBuf>,
}

/// Workload file destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputTarget {
    /// Standard output
    Stdout,
    /// Exact path chosen by the user
    Path(PathBuf),
    /// First free `{prefix}{n}.{extension}` in `dir`
    AutoName {
        dir: PathBuf,
        prefix: String,
        extension: String,
    },
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::Path(path) => write!(f, "{}", path.display()),
            OutputTarget::AutoName {
                dir,
                prefix,
                extension,
            } => write!(f, "{}/{}<n>.{}", dir.display(), prefix, extension),
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct GeneratorConfig {
    /// Seed for the xoshiro source; entropy when `None`
    pub seed: Option<u64>,
}

/// Runtime configuration
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuntimeConfig {
    /// Suppress the text summary
    pub quiet: bool,
    /// Debug logging
    pub debug: bool,
}
