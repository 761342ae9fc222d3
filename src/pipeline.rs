use crate::emit::{SuiteOptions, render_suite};
use crate::error::GenerateError;
use crate::fixture::load_fixtures;
use crate::types::{CheckOutcome, FixtureSet, GenerationSummary};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

pub const DEFAULT_INPUT: &str = "test/ais_test_payloads.txt";
pub const DEFAULT_OUTPUT: &str = "test/auto_test_payloads.c";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub suite: SuiteOptions,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_INPUT), PathBuf::from(DEFAULT_OUTPUT))
    }
}

impl GenerateOptions {
    /// Options for the given paths, with the banner names taken from them.
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        let mut suite = SuiteOptions::default();
        if let Some(name) = input.file_name() {
            suite.source_name = name.to_string_lossy().into_owned();
        }
        if let Some(name) = output.file_name() {
            suite.output_name = name.to_string_lossy().into_owned();
        }
        Self {
            input,
            output,
            suite,
        }
    }
}

/// Renders the suite text without touching the output file.
pub fn render_from_fixtures(fixtures: &FixtureSet, options: &GenerateOptions) -> String {
    render_suite(&fixtures.records, &options.suite).to_source()
}

pub fn generate(options: &GenerateOptions) -> Result<GenerationSummary, GenerateError> {
    let fixtures = load_fixtures(&options.input)?;
    let text = render_from_fixtures(&fixtures, options);
    persist_suite(&options.output, &text)?;
    info!(
        file = %options.output.display(),
        cases = fixtures.records.len(),
        "wrote generated suite"
    );
    Ok(GenerationSummary {
        line_count: fixtures.line_count,
        generated: fixtures.records.len(),
        skipped: fixtures.skipped,
        bytes_written: text.len(),
    })
}

pub fn check(options: &GenerateOptions) -> Result<CheckOutcome, GenerateError> {
    let fixtures = load_fixtures(&options.input)?;
    let expected = render_from_fixtures(&fixtures, options);
    if !options.output.exists() {
        warn!(file = %options.output.display(), "generated suite is missing");
        return Ok(CheckOutcome::Missing);
    }
    let current = fs::read(&options.output).map_err(|source| GenerateError::ReadOutput {
        path: options.output.clone(),
        source,
    })?;
    if current == expected.as_bytes() {
        Ok(CheckOutcome::UpToDate)
    } else {
        warn!(file = %options.output.display(), "generated suite is stale");
        Ok(CheckOutcome::Stale)
    }
}

/// Replaces `path` with `text` in one rename, so a failed write leaves the
/// previous file (or no file) rather than a truncated suite.
pub fn persist_suite(path: &Path, text: &str) -> Result<(), GenerateError> {
    let write_err = |source: std::io::Error| GenerateError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(text.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
