//! Error types for OBJ loading.

use std::{io, path::PathBuf};

use thiserror::Error;

/// Result type for OBJ loading.
pub type ObjResult<T> = Result<T, ObjError>;

/// Every way an OBJ load can fail. Line numbers are 1-based.
///
/// A load either yields a whole mesh or one of these; partial meshes are
/// never returned.
#[derive(Debug, Error)]
pub enum ObjError {
    /// The source file could not be opened.
    #[error("failed to open OBJ file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading a line from the source failed (I/O error or invalid UTF-8).
    #[error("failed to read OBJ line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    /// A `v` or `vt` record ended before all of its fields were present.
    #[error("missing {what} on line {line}")]
    MissingField { line: usize, what: &'static str },

    /// A numeric field did not parse, or parsed to a non-finite value.
    #[error("invalid {what} '{token}' on line {line}")]
    InvalidNumber {
        line: usize,
        what: &'static str,
        token: String,
    },

    /// A face element is not of the form `P`, `P/T`, `P//` or `P/T/N`.
    #[error("malformed face element '{token}' on line {line}")]
    MalformedFace { line: usize, token: String },

    /// A face references a position that has not been declared.
    #[error("position index {index} out of range ({count} positions declared) on line {line}")]
    PositionOutOfRange {
        line: usize,
        index: i64,
        count: usize,
    },
}

impl ObjError {
    /// Line the error was found on, if it came from parsing rather than opening.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Open { .. } => None,
            Self::Read { line, .. }
            | Self::MissingField { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::MalformedFace { line, .. }
            | Self::PositionOutOfRange { line, .. } => Some(*line),
        }
    }
}
