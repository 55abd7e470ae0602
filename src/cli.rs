//! CLI argument parsing for lintbench

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Output format for benchmark results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable console report (default)
    Text,
    /// JSON document for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "lintbench")]
#[command(version)]
#[command(
    about = "Generate a synthetic JavaScript corpus and benchmark two linters against it",
    long_about = None
)]
pub struct Cli {
    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    /// TOML configuration file (profiles, output directory, tool commands)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Regenerate the benchmark corpus from scratch
    Setup {
        /// Corpus root (overrides the config file; default: test-files)
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Run both linters single-core then multi-core and compare them
    Bench {
        /// Corpus to lint (overrides the config file; default: test-files)
        #[arg(short = 'd', long = "corpus-dir", value_name = "DIR")]
        corpus_dir: Option<PathBuf>,

        /// Output format for the results block
        #[arg(long = "format", value_enum, default_value = "text")]
        format: OutputFormat,

        /// Kill a linter run after this many seconds
        #[arg(long = "timeout-secs", value_name = "SECS")]
        timeout_secs: Option<u64>,

        /// Cores available during the single-core phase
        #[arg(long = "single-core-cpus", value_name = "N", default_value = "1")]
        single_core_cpus: usize,
    },
}
