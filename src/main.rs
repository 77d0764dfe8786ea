//! cfgsynth CLI entry point

use anyhow::{Context, Result};
use cfgsynth::config::{cli::Cli, validator, Config, OutputTarget};
use cfgsynth::distribution::uniform::XoshiroSource;
use cfgsynth::distribution::RandomSource;
use cfgsynth::generator::WorkloadGenerator;
use cfgsynth::output::json::{self, RunSummary};
use cfgsynth::output::{text, TextSink};
use cfgsynth::stats::WorkloadStats;
use cfgsynth::target::{file::StagedArtifact, next_free_path};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_args();
    init_tracing(cli.debug, cli.quiet);
    cli.validate()?;

    info!("cfgsynth v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_cli(&cli);
    validator::validate_config(&config).context("Configuration validation failed")?;
    let config_json = serde_json::to_string(&config)?;
    debug!(config = %config_json, "configuration");

    let rng = match config.generator.seed {
        Some(seed) => XoshiroSource::with_seed(seed),
        None => XoshiroSource::new(),
    };
    let mut generator = WorkloadGenerator::new(rng);
    debug!(destination = %config.output.target, "output target");

    // Naming happens once, before any sampling
    let (destination, stats) = match &config.output.target {
        OutputTarget::Stdout => ("stdout".to_string(), write_stdout(&mut generator)?),
        OutputTarget::Path(path) => write_file(&mut generator, path.clone())?,
        OutputTarget::AutoName {
            dir,
            prefix,
            extension,
        } => {
            let path = next_free_path(dir, prefix, extension);
            debug!(path = %path.display(), "picked free output name");
            write_file(&mut generator, path)?
        }
    };

    info!(
        output = %destination,
        phases = stats.phases(),
        threads = stats.total_threads(),
        devices = stats.device_records(),
        "workload generated"
    );

    if let Some(ref path) = config.output.summary_json {
        let summary = RunSummary::new(destination.clone(), config.generator.seed, stats.clone());
        json::write_summary(path, &summary)?;
        info!(path = %path.display(), "summary written");
    }

    if !config.runtime.quiet && config.output.target != OutputTarget::Stdout {
        text::print_summary(&stats, &destination, config.generator.seed);
    }

    Ok(())
}

/// Generate into a staged file and commit it to `path` on success
///
/// On failure the staged file is dropped, so no partial workload is left.
fn write_file<R: RandomSource>(
    generator: &mut WorkloadGenerator<R>,
    path: PathBuf,
) -> Result<(String, WorkloadStats)> {
    info!(path = %path.display(), "writing workload");

    let mut staged = StagedArtifact::create(&path)?;
    let stats = {
        let mut sink = TextSink::new(staged.writer());
        generator
            .generate(&mut sink)
            .with_context(|| format!("Workload generation failed for {}", path.display()))?
    };
    let path = staged.commit()?;

    Ok((path.display().to_string(), stats))
}

/// Generate in memory and write to stdout only once the workload is complete
fn write_stdout<R: RandomSource>(generator: &mut WorkloadGenerator<R>) -> Result<WorkloadStats> {
    let mut sink = TextSink::new(Vec::new());
    let stats = generator
        .generate(&mut sink)
        .context("Workload generation failed")?;
    let bytes = sink.finish()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    out.write_all(&bytes).context("Failed to write workload to stdout")?;
    out.flush()?;

    Ok(stats)
}

/// Initialize tracing on stderr with an env-driven filter
///
/// `RUST_LOG` wins; otherwise `--debug` selects DEBUG, `--quiet` WARN and the
/// default is INFO.
fn init_tracing(debug: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if debug {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
