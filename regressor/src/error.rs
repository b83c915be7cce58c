use std::fmt;

/// All errors produced by the regressor crate.
#[derive(Debug)]
pub enum RegressorError {
    /// The model artifact could not be read from disk.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// The model artifact was read but its content is malformed.
    Artifact(String),
    /// A shape invariant was violated (e.g. mismatched vector lengths).
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// An input is invalid for semantic reasons.
    InvalidInput(&'static str),
}

impl fmt::Display for RegressorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read '{path}': {source}"),
            Self::Artifact(msg) => write!(f, "invalid model artifact: {msg}"),
            Self::ShapeMismatch {
                what,
                got,
                expected,
            } => {
                write!(f, "shape mismatch for {what}: got {got}, expected {expected}")
            }
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
        }
    }
}

impl std::error::Error for RegressorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
