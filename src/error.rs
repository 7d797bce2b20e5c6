//! # Error Types
//!
//! All errors raised while turning harmonic-analysis tables into charts.
//!
//! ## Scope
//! - Per-piece errors (`DataFormat`, `InvalidPiece`, `Io`) abort one chart only;
//!   the driver logs them and moves on to the next piece.
//! - `UnrecognizedCadenceCode` is never returned as a failure. It is collected
//!   as a diagnostic so the driver can log it as a warning.
//! - Run-level errors (`OutputPath`, `NoInput`, `AllPiecesFailed`,
//!   `InvalidPattern`) terminate the run with a non-zero exit status.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    /// Malformed positional data: bad time signature or onset, events out of order.
    ///
    /// # Example
    /// ```
    /// # use modplan::ChartError;
    /// let err = ChartError::DataFormat {
    ///     measure: 12,
    ///     message: "Invalid time signature: 3-4".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Data format error at measure 12: Invalid time signature: 3-4");
    /// ```
    #[error("Data format error at measure {measure}: {message}")]
    DataFormat { measure: i64, message: String },

    /// A cadence type outside PAC/IAC/HC/EVCAD/DEC.
    #[error("Unrecognized cadence type '{code}' in {piece}")]
    UnrecognizedCadenceCode { code: String, piece: String },

    /// The output directory or an output file cannot be created or written.
    #[error("Cannot write to {}: {source}", .path.display())]
    OutputPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An input file could not be read.
    #[error("Cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The piece document is not valid YAML or misses required fields.
    #[error("Invalid piece data: {message}")]
    InvalidPiece { message: String },

    #[error("Invalid file pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("No input pieces found")]
    NoInput,

    #[error("All {count} pieces failed")]
    AllPiecesFailed { count: usize },
}

impl ChartError {
    /// Whether this error ends the whole run rather than a single piece.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ChartError::OutputPath { .. }
                | ChartError::NoInput
                | ChartError::AllPiecesFailed { .. }
                | ChartError::InvalidPattern { .. }
        )
    }
}
