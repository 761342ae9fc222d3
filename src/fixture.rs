//! Reader for the line-oriented payload fixture format:
//!
//! ```text
//! # type payload                         mmsi       extras...
//! 1 13HOI:0P0000VD>PfTNEoHo5Bl0000 227006760 callsign=TEST
//! ```
//!
//! Blank lines and `#` comments are skipped but still consume a line index, so
//! generated test names stay tied to the raw position in the file.

use crate::error::GenerateError;
use crate::types::{
    Extra, FixtureSet, KeyedField, LineIndex, NumericField, SkipReason, SkippedLine, TestRecord,
};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const COMMENT_MARKER: char = '#';
pub const BIN_LEN_PREFIX: &str = "bin_len";
const REQUIRED_TOKENS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Record(TestRecord),
    Skipped(SkipReason),
}

pub fn load_fixtures(path: &Path) -> Result<FixtureSet, GenerateError> {
    if !path.exists() {
        return Err(GenerateError::MissingInput {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path).map_err(|source| GenerateError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let set = parse_fixture_lines(content.lines())?;
    info!(
        file = %path.display(),
        lines = set.line_count,
        records = set.records.len(),
        "loaded payload fixtures"
    );
    Ok(set)
}

/// Parses every line in order. The first malformed numeric column aborts the
/// whole batch.
pub fn parse_fixture_lines<I, S>(lines: I) -> Result<FixtureSet, GenerateError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut set = FixtureSet::default();
    for (index, line) in lines.into_iter().enumerate() {
        set.line_count = index + 1;
        match parse_fixture_line(index, line.as_ref())? {
            ParsedLine::Record(record) => set.records.push(record),
            ParsedLine::Skipped(reason) => {
                debug!(line = index + 1, ?reason, "skipping fixture line");
                set.skipped.push(SkippedLine { index, reason });
            }
        }
    }
    Ok(set)
}

pub fn parse_fixture_line(index: LineIndex, line: &str) -> Result<ParsedLine, GenerateError> {
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(ParsedLine::Skipped(SkipReason::Blank));
    }
    if trimmed.starts_with(COMMENT_MARKER) {
        return Ok(ParsedLine::Skipped(SkipReason::Comment));
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.len() < REQUIRED_TOKENS {
        return Ok(ParsedLine::Skipped(SkipReason::TooFewTokens(tokens.len())));
    }

    let message_type = parse_number(index, line, NumericField::MessageType, tokens[0])?;
    let payload = tokens[1].to_string();
    let mmsi = parse_number(index, line, NumericField::Mmsi, tokens[2])?;

    let mut extras = Vec::new();
    for token in &tokens[REQUIRED_TOKENS..] {
        match classify_extra(token) {
            Some(extra) => extras.push(extra),
            None => debug!(line = index + 1, token, "ignoring unrecognized fixture token"),
        }
    }

    Ok(ParsedLine::Record(TestRecord {
        index,
        message_type,
        payload,
        mmsi,
        extras,
    }))
}

/// Any token starting with `bin_len` is a flag, whatever follows the prefix
/// (`bin_len`, `bin_len>0`, `bin_len=12` all mean the same thing).
pub fn classify_extra(token: &str) -> Option<Extra> {
    if token.starts_with(BIN_LEN_PREFIX) {
        return Some(Extra::BinaryLength);
    }
    let (key, value) = token.split_once('=')?;
    let field = KeyedField::from_key(key)?;
    Some(Extra::Keyed {
        field,
        value: value.to_string(),
    })
}

fn parse_number(
    index: LineIndex,
    line: &str,
    field: NumericField,
    token: &str,
) -> Result<i64, GenerateError> {
    token
        .parse::<i64>()
        .map_err(|source| GenerateError::MalformedNumber {
            line: index + 1,
            field,
            token: token.to_string(),
            content: line.to_string(),
            source,
        })
}
