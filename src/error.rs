use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while building or writing a worksheet.
#[derive(Debug, Error)]
pub enum WorksheetError {
    /// Bad operation name, inverted range, zero divisor, empty grid, ...
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Failed to finalise {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One student's worksheet failed; the batch carries on without it.
    #[error("Worksheet for '{student}' failed: {source}")]
    Render {
        student: String,
        #[source]
        source: Box<WorksheetError>,
    },
}

impl WorksheetError {
    /// Shorthand for [`WorksheetError::InvalidConfiguration`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        WorksheetError::InvalidConfiguration(msg.into())
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, WorksheetError::InvalidConfiguration(_))
    }
}

/// Result type for worksheet operations.
pub type Result<T> = std::result::Result<T, WorksheetError>;
