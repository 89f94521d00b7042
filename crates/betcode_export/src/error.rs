//! Error types for the bet code export pipeline.

use std::path::PathBuf;

use betcode_io_xlsx::XlsxWriteError;
use thiserror::Error;

use crate::spec::EnumBetCodeId;

/// Date formatter failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Display pattern contains an unsupported or malformed specifier.
    #[error("invalid date display pattern '{0}'")]
    InvalidPattern(String),
}

/// Failure to convert one record into an export row.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RowMappingError {
    /// Record carries no creation timestamp.
    #[error("creation timestamp is missing")]
    MissingTimestamp,

    /// Amount is NaN or infinite and has no numeric cell representation.
    #[error("{field} is not a finite number: {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },

    /// Timestamp could not be formatted.
    #[error(transparent)]
    Format(#[from] FormatError),
}

/// Encoder failures.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Configured output directory does not exist.
    #[error("output directory does not exist: {path}")]
    OutputDirMissing { path: PathBuf },

    /// Target file exists and the conflict strategy forbids replacing it.
    #[error("output file already exists: {path}")]
    FileExists { path: PathBuf },

    /// Filesystem failure while delivering the file.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Workbook could not be built.
    #[error(transparent)]
    Xlsx(#[from] XlsxWriteError),

    /// Encoder refused the table for an environment-specific reason.
    #[error("encoder rejected the table: {0}")]
    Rejected(String),
}

/// Terminal failure of one export call.
#[derive(Debug, Error)]
pub enum ExportError {
    /// No records were supplied.
    #[error("no bet code records to export")]
    EmptyInput,

    /// One record could not be mapped; the whole batch is aborted.
    #[error("failed to map record #{index} (id {id}): {source}")]
    RowMapping {
        index: usize,
        id: EnumBetCodeId,
        #[source]
        source: RowMappingError,
    },

    /// Encoder could not produce or deliver the file.
    #[error("failed to encode export file: {0}")]
    Encoding(#[from] EncodeError),
}
