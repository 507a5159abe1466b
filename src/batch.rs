//! Batch processing: every PDF of an input directory to JSON files.
//!
//! Files are processed one at a time in lexicographic name order. A file
//! that cannot be read or written is recorded in the [`BatchReport`] and
//! the batch moves on; only a missing input directory or an uncreatable
//! output directory stops the run.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::Outliner;

/// What happened to one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
    /// JSON written with this many headings
    Written {
        /// Number of outline entries
        headings: usize,
    },
    /// Nothing written
    Failed(String),
}

/// Outcome for one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    /// Input PDF
    pub input: PathBuf,
    /// Target JSON path
    pub output: PathBuf,
    /// Result
    pub status: FileStatus,
}

impl FileOutcome {
    /// Whether the JSON was written.
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Written { .. })
    }
}

impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        match &self.status {
            FileStatus::Written { headings } => {
                write!(f, "{} -> {} ({} headings)", name, self.output.display(), headings)
            }
            FileStatus::Failed(reason) => write!(f, "{}: {}", name, reason),
        }
    }
}

/// Outcomes of a batch run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One outcome per discovered PDF
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    /// Number of files processed.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Number of JSON files written.
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    /// Outcomes of files that produced no JSON.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Number of files that produced no JSON.
    pub fn failed(&self) -> usize {
        self.total() - self.succeeded()
    }
}

/// List the `*.pdf` files of a directory (extension case-insensitive),
/// sorted by file name.
pub fn discover_pdfs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Output path for an input PDF: `<output_dir>/<stem>.json`.
pub fn output_path_for(input: &Path, output_dir: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "output".to_string());
    output_dir.join(format!("{}.json", stem))
}

/// Runs the pipeline over a directory.
#[derive(Debug)]
pub struct BatchRunner {
    input_dir: PathBuf,
    output_dir: PathBuf,
    outliner: Outliner,
}

impl BatchRunner {
    /// Create a runner with default pipeline options.
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            outliner: Outliner::new(),
        }
    }

    /// Use a configured pipeline.
    pub fn with_outliner(mut self, outliner: Outliner) -> Self {
        self.outliner = outliner;
        self
    }

    /// Input directory.
    pub fn input_dir(&self) -> &Path {
        &self.input_dir
    }

    /// Output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Check the directories and list the input PDFs.
    ///
    /// Fails when the input directory cannot be listed or the output
    /// directory cannot be created.
    pub fn prepare(&self) -> Result<Vec<PathBuf>> {
        if !self.input_dir.is_dir() {
            return Err(Error::Other(format!(
                "Input directory not found: {}",
                self.input_dir.display()
            )));
        }
        let files = discover_pdfs(&self.input_dir)?;
        fs::create_dir_all(&self.output_dir).map_err(|source| Error::Write {
            path: self.output_dir.clone(),
            source,
        })?;
        Ok(files)
    }

    /// Process every PDF.
    pub fn run(&self) -> Result<BatchReport> {
        self.run_with_progress(|_| {})
    }

    /// Process every PDF, calling `on_file` after each one.
    pub fn run_with_progress<F>(&self, mut on_file: F) -> Result<BatchReport>
    where
        F: FnMut(&FileOutcome),
    {
        let files = self.prepare()?;
        log::info!(
            "Processing {} PDF files from {}",
            files.len(),
            self.input_dir.display()
        );

        let mut report = BatchReport::default();
        for input in files {
            let outcome = self.process_file(&input);
            on_file(&outcome);
            report.outcomes.push(outcome);
        }
        Ok(report)
    }

    /// Process one PDF into the output directory.
    pub fn process_file(&self, input: &Path) -> FileOutcome {
        let output = output_path_for(input, &self.output_dir);
        let status = match self.write_one(input, &output) {
            Ok(headings) => FileStatus::Written { headings },
            Err(e) => {
                log::warn!("Skipping {}: {}", input.display(), e);
                FileStatus::Failed(e.to_string())
            }
        };
        FileOutcome {
            input: input.to_path_buf(),
            output,
            status,
        }
    }

    fn write_one(&self, input: &Path, output: &Path) -> Result<usize> {
        let result = self.outliner.extract(input)?;
        result.write_to(output)?;
        Ok(result.document.outline.len())
    }
}

/// Process a directory with default options.
pub fn run_batch(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Result<BatchReport> {
    BatchRunner::new(input_dir, output_dir).run()
}
