//! Two-phase benchmark sweep
//!
//! Runs the reference tool and then the fast tool, first pinned to a
//! restricted core set (simulating a CI runner) and then unrestricted. Every
//! invocation is sequential and blocks until the tool exits or times out.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::{BenchConfig, ToolSpec};
use crate::runner::{run_tool, BenchmarkResult, CoreConfig};

/// One of the two sweep phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    SingleCore,
    MultiCore,
}

impl Phase {
    /// Banner printed before the phase runs
    pub fn title(&self) -> &'static str {
        match self {
            Phase::SingleCore => "SINGLE CORE (CI Environment)",
            Phase::MultiCore => "MULTI-CORE (Local Development)",
        }
    }

    /// Heading used in the results block
    pub fn heading(&self) -> &'static str {
        match self {
            Phase::SingleCore => "🖥️  SINGLE CORE (CI):",
            Phase::MultiCore => "🚀 MULTI-CORE (Local):",
        }
    }
}

/// Events emitted while the sweep runs
#[derive(Debug, Clone, Copy)]
pub enum DriverEvent<'a> {
    PhaseStarted(Phase),
    ToolStarted { tool: &'a ToolSpec, cores: CoreConfig },
    ToolFinished(&'a BenchmarkResult),
}

/// Relative performance of the fast tool against the reference tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// reference / fast duration; None when the fast duration is zero
    pub speedup: Option<f64>,
    /// reference - fast duration in milliseconds
    pub time_saving_ms: f64,
    /// Saving as a percentage of the reference duration
    pub time_saving_percent: Option<f64>,
}

impl Comparison {
    pub fn between(reference: &BenchmarkResult, fast: &BenchmarkResult) -> Self {
        let time_saving_ms = reference.duration_ms - fast.duration_ms;
        Self {
            speedup: ratio(reference.duration_ms, fast.duration_ms),
            time_saving_ms,
            time_saving_percent: ratio(time_saving_ms, reference.duration_ms).map(|r| r * 100.0),
        }
    }
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator > 0.0).then(|| numerator / denominator)
}

/// Both tools' results for one phase
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseResult {
    pub phase: Phase,
    pub reference: BenchmarkResult,
    pub fast: BenchmarkResult,
}

impl PhaseResult {
    pub fn comparison(&self) -> Comparison {
        Comparison::between(&self.reference, &self.fast)
    }
}

/// Complete sweep output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkReport {
    pub corpus_dir: String,
    pub single_core: PhaseResult,
    pub multi_core: PhaseResult,
}

impl BenchmarkReport {
    /// Time saved on a constrained CI runner
    pub fn ci_saving(&self) -> Comparison {
        self.single_core.comparison()
    }
}

/// Runs the configured tools through both phases
#[derive(Debug, Clone)]
pub struct BenchmarkDriver {
    config: BenchConfig,
}

impl BenchmarkDriver {
    /// Create a driver, rejecting unusable configuration
    pub fn new(config: BenchConfig) -> Result<Self> {
        config.validate().context("Invalid benchmark configuration")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchConfig {
        &self.config
    }

    /// Run the full sweep, reporting progress through `on_event`
    pub fn run<F>(&self, mut on_event: F) -> BenchmarkReport
    where
        F: FnMut(DriverEvent<'_>),
    {
        if !self.config.corpus_dir.is_dir() {
            tracing::warn!(
                corpus = %self.config.corpus_dir.display(),
                "corpus directory does not exist, tools will likely report nothing"
            );
        }

        let restricted = CoreConfig::Restricted {
            cores: self.config.single_core_cpus,
        };
        let single_core = self.run_phase(Phase::SingleCore, restricted, &mut on_event);
        let multi_core = self.run_phase(Phase::MultiCore, CoreConfig::Unrestricted, &mut on_event);

        BenchmarkReport {
            corpus_dir: self.config.corpus_dir.display().to_string(),
            single_core,
            multi_core,
        }
    }

    fn run_phase<F>(&self, phase: Phase, cores: CoreConfig, on_event: &mut F) -> PhaseResult
    where
        F: FnMut(DriverEvent<'_>),
    {
        on_event(DriverEvent::PhaseStarted(phase));
        let reference = self.run_one(&self.config.reference_tool, cores, on_event);
        let fast = self.run_one(&self.config.fast_tool, cores, on_event);
        PhaseResult {
            phase,
            reference,
            fast,
        }
    }

    fn run_one<F>(&self, tool: &ToolSpec, cores: CoreConfig, on_event: &mut F) -> BenchmarkResult
    where
        F: FnMut(DriverEvent<'_>),
    {
        on_event(DriverEvent::ToolStarted { tool, cores });
        let result = run_tool(tool, &self.config.corpus_dir, cores, self.config.timeout);
        on_event(DriverEvent::ToolFinished(&result));
        result
    }
}
