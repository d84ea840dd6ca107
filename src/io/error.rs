//! Error types for catalog construction, collapse runs and output export

use crate::spatial::orientation::Orientation;
use std::fmt;
use std::path::PathBuf;

/// Main error type for all collapse operations
#[derive(Debug)]
pub enum CollapseError {
    /// No catalog tile satisfies the chosen neighbours of a cell
    ///
    /// Fatal to the run that raised it. The cell keeps no chosen tile.
    Exhausted {
        /// Row of the cell
        x: usize,
        /// Column of the cell
        y: usize,
    },

    /// Tile builder finished without a payload
    MissingValue,

    /// Tile definition lacks a socket code for one side
    MissingSocket {
        /// Side without a socket code
        orientation: Orientation,
    },

    /// Two socket codes of different length were compared
    SocketLengthMismatch {
        /// Side whose socket code was compared
        orientation: Orientation,
        /// Length of the socket code on that side
        expected: usize,
        /// Length of the code it was compared against
        found: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile rotation other than a quarter turn multiple
    InvalidRotation {
        /// Rotation in degrees as found in the rule file
        degrees: i32,
    },

    /// Rule file is not a valid catalog definition
    CatalogParse {
        /// Path to the rule file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to load a tile image from filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered board to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CollapseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exhausted { x, y } => {
                write!(
                    f,
                    "No valid candidate at ({x}, {y}): there is no way to complete this generation"
                )
            }
            Self::MissingValue => write!(f, "Tile has no value"),
            Self::MissingSocket { orientation } => {
                write!(f, "Tile has no socket code for side {orientation}")
            }
            Self::SocketLengthMismatch {
                orientation,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Socket code length mismatch on side {orientation}: expected {expected}, found {found}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidRotation { degrees } => {
                write!(
                    f,
                    "Invalid rotation {degrees}: must be one of 0, 90, 180, 270"
                )
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Failed to parse rules '{}': {source}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
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
        }
    }
}

impl std::error::Error for CollapseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::CatalogParse { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl CollapseError {
    /// Whether this error ended a run for lack of candidates
    ///
    /// Callers may start a fresh run with another seed after this error;
    /// every other kind is a configuration or I/O failure that a retry cannot fix.
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted { .. })
    }
}

/// Convenience type alias for collapse results
pub type Result<T> = std::result::Result<T, CollapseError>;

impl From<std::io::Error> for CollapseError {
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
) -> CollapseError {
    CollapseError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
