// Error types for sigfeat
// Uses thiserror for the error taxonomy shared by the parser and renderers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sigfeat operations
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors raised while loading declarations or rendering features
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Declaration file or directory could not be read
    #[error("IO error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed bound, ambiguity list, protocol list or key/value token
    #[error("Format error: {0}")]
    Format(String),

    /// Declaration line has no `type` key
    #[error("Feature type not specified")]
    MissingType,

    /// Declaration line names a type that is not recognized
    #[error("Unrecognized feature type: {0}")]
    UnknownType(String),

    /// IP feature configured with a version other than 4 or 6
    #[error("Unsupported IP version: {0}")]
    UnsupportedVersion(u8),

    /// Protocol feature with nothing to draw from
    #[error("Protocol feature '{0}' has an empty proto_list")]
    EmptyProtocolList(String),

    /// A line-level error tagged with its 1-based line number
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<FeatureError>,
    },
}

impl FeatureError {
    /// Shorthand for building a `Format` error
    pub fn format(msg: impl Into<String>) -> Self {
        FeatureError::Format(msg.into())
    }
}
