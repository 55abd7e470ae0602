//! Corpus layout builder
//!
//! Turns a [`CorpusConfig`] into a directory tree:
//!
//! ```text
//! <output_dir>/
//!   <profile>/<profile>-file-<n>.js   one per file, composed with seed n-1
//!   patterns/<fixture>.js             the four hand-authored files
//! ```
//!
//! An existing output directory is removed first. Any I/O failure aborts the
//! build; there is no partial-corpus recovery since a rebuild is cheap.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::composer::compose;
use crate::config::{ConfigError, CorpusConfig, SizeProfile};
use crate::fixtures::{PatternFile, PATTERNS_DIR, PATTERN_FILES};

/// Errors that abort a corpus build
#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Invalid corpus configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to remove existing corpus at {path}: {source}")]
    Clean {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for corpus operations
pub type Result<T> = std::result::Result<T, CorpusError>;

/// One file ready to be written, relative to the corpus root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub relative_path: PathBuf,
    pub content: String,
}

impl GeneratedFile {
    /// Compose file `index` of `profile`, seeded by its index
    pub fn for_profile(profile: &SizeProfile, index: u32) -> Self {
        Self {
            relative_path: Path::new(&profile.name).join(profile.file_name(index)),
            content: compose(profile.lines_per_file, u64::from(index)),
        }
    }

    fn for_pattern(pattern: &PatternFile) -> Self {
        Self {
            relative_path: Path::new(PATTERNS_DIR).join(pattern.file_name),
            content: pattern.content.to_string(),
        }
    }
}

/// Progress notifications emitted while building
#[derive(Debug, Clone, Copy)]
pub enum BuildProgress<'a> {
    /// About to generate every file of a profile
    Profile(&'a SizeProfile),
    /// About to write the fixed pattern files
    Patterns { count: usize },
}

/// What a finished build wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusSummary {
    pub root: PathBuf,
    pub generated_files: u64,
    pub pattern_files: u64,
    pub total_lines: u64,
    pub total_bytes: u64,
    /// SHA-256 over every (relative path, content) pair in write order
    pub digest: String,
}

impl CorpusSummary {
    pub fn total_files(&self) -> u64 {
        self.generated_files + self.pattern_files
    }
}

/// Rebuild the corpus described by `config`
pub fn build(config: &CorpusConfig) -> Result<CorpusSummary> {
    build_with_progress(config, |_| {})
}

/// Rebuild the corpus, reporting progress through `on_progress`
pub fn build_with_progress<F>(config: &CorpusConfig, mut on_progress: F) -> Result<CorpusSummary>
where
    F: FnMut(BuildProgress<'_>),
{
    config.validate()?;

    let root = config.output_dir.as_path();
    clean(root)?;
    create_dir(root)?;

    let mut writer = CorpusWriter::new(root);

    for profile in &config.profiles {
        on_progress(BuildProgress::Profile(profile));
        tracing::info!(
            profile = %profile.name,
            files = profile.file_count,
            lines_per_file = profile.lines_per_file,
            "generating profile"
        );
        create_dir(&root.join(&profile.name))?;

        for index in 0..profile.file_count {
            writer.write(GeneratedFile::for_profile(profile, index))?;
        }
        writer.generated_files += u64::from(profile.file_count);
    }

    on_progress(BuildProgress::Patterns {
        count: PATTERN_FILES.len(),
    });
    create_dir(&root.join(PATTERNS_DIR))?;
    for pattern in &PATTERN_FILES {
        writer.write(GeneratedFile::for_pattern(pattern))?;
        writer.pattern_files += 1;
    }

    let summary = writer.finish();
    tracing::info!(
        root = %summary.root.display(),
        files = summary.total_files(),
        digest = %summary.digest,
        "corpus built"
    );
    Ok(summary)
}

struct CorpusWriter<'a> {
    root: &'a Path,
    hasher: Sha256,
    generated_files: u64,
    pattern_files: u64,
    total_lines: u64,
    total_bytes: u64,
}

impl<'a> CorpusWriter<'a> {
    fn new(root: &'a Path) -> Self {
        Self {
            root,
            hasher: Sha256::new(),
            generated_files: 0,
            pattern_files: 0,
            total_lines: 0,
            total_bytes: 0,
        }
    }

    /// Write one file and fold it into the digest; the content is dropped here
    fn write(&mut self, file: GeneratedFile) -> Result<()> {
        let path = self.root.join(&file.relative_path);
        fs::write(&path, &file.content).map_err(|source| CorpusError::Write {
            path: path.clone(),
            source,
        })?;
        tracing::trace!(path = %path.display(), bytes = file.content.len(), "wrote file");

        self.hasher
            .update(file.relative_path.to_string_lossy().as_bytes());
        self.hasher.update([0u8]);
        self.hasher.update(file.content.as_bytes());
        self.hasher.update([0u8]);
        self.total_lines += file.content.lines().count() as u64;
        self.total_bytes += file.content.len() as u64;
        Ok(())
    }

    fn finish(self) -> CorpusSummary {
        CorpusSummary {
            root: self.root.to_path_buf(),
            generated_files: self.generated_files,
            pattern_files: self.pattern_files,
            total_lines: self.total_lines,
            total_bytes: self.total_bytes,
            digest: hex::encode(self.hasher.finalize()),
        }
    }
}

fn clean(root: &Path) -> Result<()> {
    match fs::remove_dir_all(root) {
        Ok(()) => {
            tracing::debug!(root = %root.display(), "removed existing corpus");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(CorpusError::Clean {
            path: root.to_path_buf(),
            source,
        }),
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| CorpusError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
