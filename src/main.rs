use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use lintbench::cli::{Cli, Commands, OutputFormat};
use lintbench::config::FileConfig;
use lintbench::corpus::{self, BuildProgress};
use lintbench::driver::{BenchmarkDriver, DriverEvent};
use lintbench::report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(FileConfig::default()),
    }
}

/// Rebuild the corpus; errors propagate to a non-zero exit
fn run_setup(file: &FileConfig, output_dir: Option<PathBuf>) -> Result<()> {
    let mut config = file.corpus_config();
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }

    println!("🏗️  Generating test files for benchmark...");
    let summary = corpus::build_with_progress(&config, |progress| match progress {
        BuildProgress::Profile(profile) => println!(
            "📄 Generating {} {} files ({} lines each)...",
            profile.file_count, profile.name, profile.lines_per_file
        ),
        BuildProgress::Patterns { .. } => println!("🎯 Generating pattern-specific files..."),
    })
    .with_context(|| format!("Failed to generate corpus in {}", config.output_dir.display()))?;

    println!(
        "✅ Test files generated successfully! ({} files, digest {})",
        summary.total_files(),
        summary.digest
    );
    Ok(())
}

struct BenchArgs {
    corpus_dir: Option<PathBuf>,
    format: OutputFormat,
    timeout_secs: Option<u64>,
    single_core_cpus: usize,
}

fn run_bench(file: &FileConfig, args: BenchArgs) -> Result<()> {
    let mut config = file.bench_config();
    if let Some(dir) = args.corpus_dir {
        config.corpus_dir = dir;
    }
    config.single_core_cpus = args.single_core_cpus;
    config.timeout = args.timeout_secs.map(Duration::from_secs);

    let driver = BenchmarkDriver::new(config)?;

    // JSON mode keeps stdout a single document; progress moves to stderr
    let progress = |line: String| match args.format {
        OutputFormat::Text => println!("{}", line),
        OutputFormat::Json => eprintln!("{}", line),
    };

    progress(report::banner(
        &driver.config().reference_tool,
        &driver.config().fast_tool,
    ));
    let results = driver.run(|event| match event {
        DriverEvent::PhaseStarted(phase) => progress(report::phase_header(phase)),
        DriverEvent::ToolStarted { tool, cores } => progress(report::run_started(tool, cores)),
        DriverEvent::ToolFinished(result) => progress(report::run_finished(result)),
    });

    match args.format {
        OutputFormat::Text => print!("{}", report::render_text(&results)),
        OutputFormat::Json => println!("{}", report::render_json(&results)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    match args.command {
        Commands::Setup { output_dir } => {
            let file = load_config(args.config.as_deref())?;
            run_setup(&file, output_dir)
        }
        Commands::Bench {
            corpus_dir,
            format,
            timeout_secs,
            single_core_cpus,
        } => {
            // A benchmark run never signals failure through its exit code
            let outcome = load_config(args.config.as_deref()).and_then(|file| {
                run_bench(
                    &file,
                    BenchArgs {
                        corpus_dir,
                        format,
                        timeout_secs,
                        single_core_cpus,
                    },
                )
            });
            if let Err(e) = outcome {
                tracing::error!(error = %e, "benchmark failed");
                eprintln!("Error: {:#}", e);
            }
            Ok(())
        }
    }
}
