use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::NumericField;

/// Failures that abort a generation run. Nothing is written once one of these
/// is raised.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("fixture file {} does not exist", path.display())]
    MissingInput { path: PathBuf },
    #[error("failed to read fixture file {}: {source}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {field} token {token:?} is not a base-10 integer ({source}): {content:?}")]
    MalformedNumber {
        /// 1-based, as shown by editors.
        line: usize,
        field: NumericField,
        token: String,
        content: String,
        #[source]
        source: ParseIntError,
    },
    #[error("failed to read generated suite {}: {source}", path.display())]
    ReadOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write generated suite {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
