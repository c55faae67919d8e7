//! Error types for dataset exploration

use std::fmt;
use std::path::PathBuf;

/// Main error type for all explorer operations
///
/// Per-image failures never surface as this type at the run level: analyses
/// capture them into their own error lists. Everything that does reach the
/// caller is either a dataset-level problem or a configuration mistake.
#[derive(Debug)]
pub enum ExplorerError {
    /// Failed to decode an image from the filesystem
    ImageLoad {
        /// File that failed to decode
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// The dataset root contains no files or no classes
    EmptyDataset {
        /// Dataset root that was scanned
        root: PathBuf,
    },

    /// Parameter or configuration validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Reading the dataset or writing outputs failed
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to draw or write a figure
    Render {
        /// Destination of the figure
        path: PathBuf,
        /// Description of the drawing failure
        reason: String,
    },

    /// Feature extraction produced an unusable result
    Computation {
        /// Reducer or accumulator that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for ExplorerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Cannot decode image '{}': {source}", path.display())
            }
            Self::EmptyDataset { root } => {
                write!(
                    f,
                    "Dataset at '{}' is empty: expected <root>/<class>/<image> files",
                    root.display()
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Render { path, reason } => {
                write!(f, "Failed to render figure '{}': {reason}", path.display())
            }
            Self::Computation { operation, reason } => {
                write!(f, "Cannot compute {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for ExplorerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for explorer results
pub type Result<T> = std::result::Result<T, ExplorerError>;

impl From<image::ImageError> for ExplorerError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ExplorerError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ExplorerError {
    ExplorerError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> ExplorerError {
    ExplorerError::Computation {
        operation,
        reason: reason.to_string(),
    }
}

/// Create a render error for the figure at `path`
pub fn render_error(path: impl Into<PathBuf>, reason: &impl ToString) -> ExplorerError {
    ExplorerError::Render {
        path: path.into(),
        reason: reason.to_string(),
    }
}
