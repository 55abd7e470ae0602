//! Benchmark report rendering
//!
//! Text output mirrors the classic console layout: per-run progress lines,
//! a results block per phase with the speedup, the CI time saving, and an
//! issue comparison taken from the single-core runs.

use std::fmt::Write;

use crate::config::ToolSpec;
use crate::driver::{BenchmarkReport, Comparison, Phase, PhaseResult};
use crate::runner::{BenchmarkResult, CoreConfig, RunOutcome};

/// Opening banner for a sweep
pub fn banner(reference: &ToolSpec, fast: &ToolSpec) -> String {
    let title = format!(
        "🚀 CI/CD Performance Benchmark: {} vs {}",
        fast.name, reference.name
    );
    let rule = "=".repeat(title.chars().count());
    format!("{}\n{}\n\n🔍 Testing on generated files...", title, rule)
}

/// Header printed when a phase starts
pub fn phase_header(phase: Phase) -> String {
    format!("\n=== {} ===", phase.title())
}

/// Line printed before a tool runs
pub fn run_started(tool: &ToolSpec, cores: CoreConfig) -> String {
    format!("\n📊 Running {}{}...", tool.name, cores.label())
}

/// Lines printed after a tool finishes
pub fn run_finished(result: &BenchmarkResult) -> String {
    let mut out = String::new();
    if result.outcome.is_success() {
        let _ = writeln!(
            out,
            "✅ {} completed in {:.2}ms",
            result.tool, result.duration_ms
        );
    } else {
        let _ = writeln!(
            out,
            "⚠️  {} completed with warnings in {:.2}ms",
            result.tool, result.duration_ms
        );
    }
    let _ = write!(
        out,
        "   Issues: {} errors, {} warnings",
        result.errors(),
        result.warnings()
    );
    match &result.outcome {
        RunOutcome::TimedOut => {
            let _ = write!(out, "\n   (timed out, counts are from partial output)");
        }
        RunOutcome::LaunchFailed { reason } => {
            let _ = write!(out, "\n   (failed to launch: {})", reason);
        }
        RunOutcome::Success | RunOutcome::NonZeroExit { .. } => {}
    }
    if !result.report.is_structured() {
        let _ = write!(out, "\n   (approximate: output was not JSON)");
    }
    out
}

/// Full results block
pub fn render_text(report: &BenchmarkReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n📋 BENCHMARK RESULTS");
    let _ = writeln!(out, "====================");

    render_phase(&mut out, &report.single_core);
    render_phase(&mut out, &report.multi_core);

    let ci = report.ci_saving();
    let _ = writeln!(
        out,
        "\n💡 CI Time Saving: {:.2}ms ({})",
        ci.time_saving_ms,
        format_percent(&ci)
    );

    let single = &report.single_core;
    let _ = writeln!(out, "\n🔍 Issue Detection Comparison:");
    for result in [&single.reference, &single.fast] {
        let _ = writeln!(
            out,
            "{} found: {} errors, {} warnings",
            result.tool,
            result.errors(),
            result.warnings()
        );
    }
    out
}

fn render_phase(out: &mut String, phase: &PhaseResult) {
    let _ = writeln!(out, "\n{}", phase.phase.heading());
    for result in [&phase.reference, &phase.fast] {
        let _ = writeln!(
            out,
            "{:<8} {:.2}ms ({} errors, {} warnings)",
            format!("{}:", result.tool),
            result.duration_ms,
            result.errors(),
            result.warnings()
        );
    }
    let _ = writeln!(out, "Speedup: {}", format_speedup(&phase.comparison()));
}

/// Pretty-printed JSON document of the whole report
pub fn render_json(report: &BenchmarkReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

fn format_speedup(cmp: &Comparison) -> String {
    match cmp.speedup {
        Some(speedup) => format!("{:.2}x faster", speedup),
        None => "n/a".to_string(),
    }
}

fn format_percent(cmp: &Comparison) -> String {
    match cmp.time_saving_percent {
        Some(percent) => format!("{:.1}%", percent),
        None => "n/a".to_string(),
    }
}
