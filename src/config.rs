//! Corpus and benchmark configuration
//!
//! Configuration is an immutable value passed explicitly into
//! [`crate::corpus::build`] and [`crate::driver::BenchmarkDriver`]. Defaults
//! reproduce the standard four-profile corpus and the ESLint/Oxlint pair; a
//! TOML file can override any part of it.
//!
//! # Example lintbench.toml
//!
//! ```toml
//! output_dir = "test-files"
//!
//! [[profile]]
//! name = "tiny"
//! file_count = 10
//! lines_per_file = 20
//!
//! [fast_tool]
//! name = "Oxlint"
//! program = "oxlint"
//! args = ["{corpus}/", "--format=json"]
//! format = "oxlint-json"
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::diagnostics::ToolFormat;
use crate::fixtures::PATTERNS_DIR;

/// Default corpus root, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "test-files";

/// Placeholder in tool arguments replaced by the corpus directory
pub const CORPUS_PLACEHOLDER: &str = "{corpus}";

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate profile name: {0}")]
    DuplicateProfile(String),

    #[error("Invalid profile name '{0}': must be non-empty, not 'patterns', and contain no path separators")]
    InvalidProfileName(String),

    #[error("Profile '{0}' must have at least one line per file")]
    ZeroLinesPerFile(String),

    #[error("Tool '{0}' has an empty program")]
    EmptyProgram(String),

    #[error("Restricted phase needs at least one core")]
    NoCores,
}

/// A named slice of the corpus: how many files, how long each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeProfile {
    pub name: String,
    pub file_count: u32,
    pub lines_per_file: u64,
}

impl SizeProfile {
    pub fn new(name: impl Into<String>, file_count: u32, lines_per_file: u64) -> Self {
        Self {
            name: name.into(),
            file_count,
            lines_per_file,
        }
    }

    /// File name for the zero-based `index`, e.g. `small-file-1.js`
    pub fn file_name(&self, index: u32) -> String {
        format!("{}-file-{}.js", self.name, u64::from(index) + 1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let bad_name = self.name.is_empty()
            || self.name == PATTERNS_DIR
            || self.name == "."
            || self.name == ".."
            || self.name.contains(['/', '\\']);
        if bad_name {
            return Err(ConfigError::InvalidProfileName(self.name.clone()));
        }
        if self.lines_per_file == 0 {
            return Err(ConfigError::ZeroLinesPerFile(self.name.clone()));
        }
        Ok(())
    }
}

/// The four standard profiles: 450 generated files in total
pub fn default_profiles() -> Vec<SizeProfile> {
    vec![
        SizeProfile::new("small", 100, 50),
        SizeProfile::new("medium", 200, 200),
        SizeProfile::new("large", 100, 1000),
        SizeProfile::new("xlarge", 50, 5000),
    ]
}

/// Everything the corpus builder needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    pub output_dir: PathBuf,
    pub profiles: Vec<SizeProfile>,
}

impl CorpusConfig {
    pub fn new(output_dir: impl Into<PathBuf>, profiles: Vec<SizeProfile>) -> Self {
        Self {
            output_dir: output_dir.into(),
            profiles,
        }
    }

    /// Check profile names are unique and usable as directory names
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for profile in &self.profiles {
            profile.validate()?;
            if !seen.insert(profile.name.as_str()) {
                return Err(ConfigError::DuplicateProfile(profile.name.clone()));
            }
        }
        Ok(())
    }

    /// Number of generated (non-pattern) files
    pub fn generated_file_count(&self) -> u64 {
        self.profiles.iter().map(|p| u64::from(p.file_count)).sum()
    }
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR, default_profiles())
    }
}

/// How to invoke one linter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    /// Display name used in the report
    pub name: String,
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    pub format: ToolFormat,
}

impl ToolSpec {
    /// The slower reference linter
    pub fn eslint() -> Self {
        Self {
            name: "ESLint".to_string(),
            program: "npx".to_string(),
            args: vec![
                "eslint".to_string(),
                format!("{CORPUS_PLACEHOLDER}/**/*.js"),
                "--format=json".to_string(),
            ],
            format: ToolFormat::EslintJson,
        }
    }

    /// The fast linter under evaluation
    pub fn oxlint() -> Self {
        Self {
            name: "Oxlint".to_string(),
            program: "oxlint".to_string(),
            args: vec![
                format!("{CORPUS_PLACEHOLDER}/"),
                "--format=json".to_string(),
            ],
            format: ToolFormat::OxlintJson,
        }
    }

    /// Arguments with the corpus placeholder substituted
    pub fn resolved_args(&self, corpus_dir: &Path) -> Vec<String> {
        let corpus = corpus_dir.to_string_lossy();
        self.args
            .iter()
            .map(|arg| arg.replace(CORPUS_PLACEHOLDER, &corpus))
            .collect()
    }

    /// Program and resolved arguments joined for display
    pub fn command_line(&self, corpus_dir: &Path) -> String {
        std::iter::once(self.program.clone())
            .chain(self.resolved_args(corpus_dir))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram(self.name.clone()));
        }
        Ok(())
    }
}

/// Everything the benchmark driver needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub corpus_dir: PathBuf,
    /// Slower tool, measured first in each phase
    pub reference_tool: ToolSpec,
    /// Faster tool, measured second in each phase
    pub fast_tool: ToolSpec,
    /// Cores `0..single_core_cpus` allowed during the restricted phase
    pub single_core_cpus: usize,
    /// Kill an invocation after this long (None waits forever)
    pub timeout: Option<Duration>,
}

impl BenchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.single_core_cpus == 0 {
            return Err(ConfigError::NoCores);
        }
        self.reference_tool.validate()?;
        self.fast_tool.validate()
    }
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            reference_tool: ToolSpec::eslint(),
            fast_tool: ToolSpec::oxlint(),
            single_core_cpus: 1,
            timeout: None,
        }
    }
}

/// On-disk TOML configuration; every field optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub profile: Vec<SizeProfile>,
    pub reference_tool: Option<ToolSpec>,
    pub fast_tool: Option<ToolSpec>,
}

impl FileConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Corpus configuration with this file's overrides applied
    pub fn corpus_config(&self) -> CorpusConfig {
        let mut config = CorpusConfig::default();
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if !self.profile.is_empty() {
            config.profiles = self.profile.clone();
        }
        config
    }

    /// Benchmark configuration with this file's overrides applied
    pub fn bench_config(&self) -> BenchConfig {
        let mut config = BenchConfig::default();
        if let Some(dir) = &self.output_dir {
            config.corpus_dir = dir.clone();
        }
        if let Some(tool) = &self.reference_tool {
            config.reference_tool = tool.clone();
        }
        if let Some(tool) = &self.fast_tool {
            config.fast_tool = tool.clone();
        }
        config
    }
}
