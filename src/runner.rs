//! External linter invocation
//!
//! Runs one tool to completion, optionally pinned to a subset of CPU cores,
//! and measures wall-clock duration. Failures never abort a benchmark:
//!
//! - non-zero exit is normal for linters that found errors; stdout is parsed
//! - a missing program becomes [`RunOutcome::LaunchFailed`] with zero counts
//! - an exceeded timeout kills the process group and parses what was captured
//!
//! The tool's stderr is inherited so its own progress and errors stay visible.

use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::config::ToolSpec;
use crate::diagnostics::{parse_report, IssueCounts, ParsedReport};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// CPU cores a tool invocation may run on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CoreConfig {
    /// Pinned to cores `0..cores`
    Restricted { cores: usize },
    /// Whatever the scheduler allows
    Unrestricted,
}

impl CoreConfig {
    /// Suffix for progress lines, e.g. " (1 cores)"
    pub fn label(&self) -> String {
        match self {
            CoreConfig::Restricted { cores } => format!(" ({} cores)", cores),
            CoreConfig::Unrestricted => String::new(),
        }
    }
}

/// How a tool invocation ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    Success,
    /// Exited non-zero (usually: lint errors found)
    NonZeroExit { code: Option<i32> },
    /// Killed after exceeding the configured timeout
    TimedOut,
    /// The process could not be started
    LaunchFailed { reason: String },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, RunOutcome::Success)
    }
}

/// Timing and issue counts for one (tool, core configuration) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BenchmarkResult {
    pub tool: String,
    pub cores: CoreConfig,
    pub duration_ms: f64,
    pub report: ParsedReport,
    pub outcome: RunOutcome,
}

impl BenchmarkResult {
    pub fn counts(&self) -> IssueCounts {
        self.report.counts()
    }

    pub fn errors(&self) -> u64 {
        self.report.errors()
    }

    pub fn warnings(&self) -> u64 {
        self.report.warnings()
    }
}

/// Run `spec` against `corpus_dir` and collect its result
pub fn run_tool(
    spec: &ToolSpec,
    corpus_dir: &Path,
    cores: CoreConfig,
    timeout: Option<Duration>,
) -> BenchmarkResult {
    let args = spec.resolved_args(corpus_dir);
    tracing::info!(
        tool = %spec.name,
        command = %spec.command_line(corpus_dir),
        ?cores,
        ?timeout,
        "running tool"
    );

    let mut command = Command::new(&spec.program);
    command
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit());
    if let CoreConfig::Restricted { cores } = cores {
        restrict_to_cores(&mut command, cores);
    }

    let start = Instant::now();
    let (stdout, outcome) = match capture(command, timeout) {
        Ok(captured) => {
            let outcome = if captured.timed_out {
                RunOutcome::TimedOut
            } else {
                match captured.status {
                    Some(status) if status.success() => RunOutcome::Success,
                    Some(status) => RunOutcome::NonZeroExit {
                        code: status.code(),
                    },
                    None => RunOutcome::TimedOut,
                }
            };
            (captured.stdout, outcome)
        }
        Err(e) => {
            tracing::warn!(tool = %spec.name, error = %e, "failed to launch tool");
            (
                String::new(),
                RunOutcome::LaunchFailed {
                    reason: e.to_string(),
                },
            )
        }
    };
    let duration_ms = start.elapsed().as_secs_f64() * 1000.0;

    let report = parse_report(spec.format, &stdout);
    tracing::info!(
        tool = %spec.name,
        duration_ms,
        ?outcome,
        structured = report.is_structured(),
        errors = report.errors(),
        warnings = report.warnings(),
        "tool finished"
    );

    BenchmarkResult {
        tool: spec.name.clone(),
        cores,
        duration_ms,
        report,
        outcome,
    }
}

/// Captured stdout and exit state of a finished child
#[derive(Debug)]
struct Captured {
    stdout: String,
    status: Option<ExitStatus>,
    timed_out: bool,
}

fn capture(mut command: Command, timeout: Option<Duration>) -> io::Result<Captured> {
    let Some(timeout) = timeout else {
        let output = command.spawn()?.wait_with_output()?;
        return Ok(Captured {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            status: Some(output.status),
            timed_out: false,
        });
    };

    // Own process group so a timeout also reaches grandchildren (npx -> node)
    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        command.process_group(0);
    }

    let mut child = command.spawn()?;
    let reader = spawn_stdout_reader(&mut child);
    let deadline = Instant::now() + timeout;

    let (status, timed_out) = loop {
        if let Some(status) = child.try_wait()? {
            break (Some(status), false);
        }
        if Instant::now() >= deadline {
            kill_process_group(&mut child);
            let status = child.wait().ok();
            break (status, true);
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = reader.join().unwrap_or_default();
    Ok(Captured {
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        status,
        timed_out,
    })
}

fn spawn_stdout_reader(child: &mut Child) -> thread::JoinHandle<Vec<u8>> {
    let stdout = child.stdout.take();
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut out) = stdout {
            // Partial output is still useful after a kill
            let _ = out.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(unix)]
fn kill_process_group(child: &mut Child) {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let pgid = Pid::from_raw(child.id() as i32);
    if let Err(e) = killpg(pgid, Signal::SIGKILL) {
        tracing::debug!(error = %e, "killpg failed, killing child only");
        let _ = child.kill();
    }
}

#[cfg(not(unix))]
fn kill_process_group(child: &mut Child) {
    let _ = child.kill();
}

/// Pin the spawned process to cores `0..cores` before it execs
#[cfg(target_os = "linux")]
fn restrict_to_cores(command: &mut Command, cores: usize) {
    use nix::sched::{sched_setaffinity, CpuSet};
    use nix::unistd::Pid;
    use std::os::unix::process::CommandExt;

    let mut set = CpuSet::new();
    for cpu in 0..cores.max(1) {
        if set.set(cpu).is_err() {
            break;
        }
    }

    // SAFETY: the hook only issues sched_setaffinity, a single syscall that
    // neither allocates nor takes locks, so it is safe between fork and exec.
    unsafe {
        command.pre_exec(move || {
            sched_setaffinity(Pid::from_raw(0), &set).map_err(io::Error::from)
        });
    }
}

#[cfg(not(target_os = "linux"))]
fn restrict_to_cores(_command: &mut Command, cores: usize) {
    tracing::warn!(cores, "CPU affinity is not supported on this platform, running unrestricted");
}
