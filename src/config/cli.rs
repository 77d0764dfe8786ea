//! CLI argument parsing using clap

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// cfgsynth - synthetic workload generator for the traffic-simulation harness
#[derive(Parser, Debug)]
#[command(name = "cfgsynth")]
#[command(version, about, long_about = None)]
pub struct Cli {
    // === Output Options ===
    /// Write the workload to this exact path (must not exist)
    #[arg(short = 'o', long, value_name = "PATH", conflicts_with = "stdout")]
    pub output: Option<PathBuf>,

    /// Directory scanned for a free `{prefix}{n}.{ext}` name [default: .]
    #[arg(long, value_name = "DIR", conflicts_with = "output")]
    pub output_dir: Option<PathBuf>,

    /// File name prefix for automatically named outputs
    #[arg(long, default_value = "cfg_synth")]
    pub prefix: String,

    /// File extension for automatically named outputs
    #[arg(long, default_value = "txt")]
    pub extension: String,

    /// Write the workload to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Export a JSON summary of the generated workload
    #[arg(long, value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    // === Generation Options ===
    /// Seed for reproducible output (random if omitted)
    #[arg(long, env = "CFGSYNTH_SEED")]
    pub seed: Option<u64>,

    // === Runtime Options ===
    /// Do not print the human-readable summary
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations that clap cannot express
    pub fn validate(&self) -> Result<()> {
        if let (Some(out), Some(summary)) = (&self.output, &self.summary_json) {
            if out == summary {
                anyhow::bail!(
                    "--summary-json must differ from --output ({})",
                    out.display()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["cfgsynth"]).unwrap();

        assert_eq!(cli.output, None);
        assert_eq!(cli.output_dir, None);
        assert_eq!(cli.prefix, "cfg_synth");
        assert_eq!(cli.extension, "txt");
        assert!(!cli.stdout);
        assert!(!cli.quiet);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_seed_and_output() {
        let cli = Cli::try_parse_from(["cfgsynth", "--seed", "42", "-o", "work.txt", "-q"]).unwrap();

        assert_eq!(cli.seed, Some(42));
        assert_eq!(cli.output, Some(PathBuf::from("work.txt")));
        assert!(cli.quiet);
    }

    #[test]
    fn test_cli_stdout_conflicts_with_output() {
        let result = Cli::try_parse_from(["cfgsynth", "--stdout", "--output", "a.txt"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_rejects_output_dir_with_output() {
        let result = Cli::try_parse_from(["cfgsynth", "-o", "a.txt", "--output-dir", "/tmp"]);
        assert!(result.is_err());

        // An explicit default directory is still a conflict
        let result = Cli::try_parse_from(["cfgsynth", "-o", "a.txt", "--output-dir", "."]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_cli_output_alone_is_valid() {
        let cli = Cli::try_parse_from(["cfgsynth", "-o", "a.txt"]).unwrap();
        assert_eq!(cli.output_dir, None);
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_output_dir_for_auto_naming() {
        let cli = Cli::try_parse_from(["cfgsynth", "--output-dir", "runs"]).unwrap();
        assert_eq!(cli.output_dir, Some(PathBuf::from("runs")));
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_rejects_summary_over_output() {
        let cli = Cli::try_parse_from(["cfgsynth", "-o", "a.txt", "--summary-json", "a.txt"]).unwrap();
        assert!(cli.validate().is_err());
    }
}
