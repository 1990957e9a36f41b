use std::fmt;

/// Result type for caretrace-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Request could not be sent or its body not read
    Http(reqwest::Error),

    /// Server answered with a non-success status
    Api { status: u16, body: String },

    /// IO operation failed
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Response or file body is not the expected JSON
    Json(serde_json::Error),

    /// Invalid operation or state
    InvalidOperation(String),
}

impl Error {
    /// Failures of the remote side, which views degrade to an empty state.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http(err) => write!(f, "HTTP error: {}", err),
            Error::Api { status, body } if body.is_empty() => {
                write!(f, "API error: status {}", status)
            }
            Error::Api { status, body } => write!(f, "API error: status {}: {}", status, body),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::InvalidOperation(msg) => write!(f, "Invalid operation: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Http(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Api { .. } | Error::Config(_) | Error::InvalidOperation(_) => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<caretrace_types::Error> for Error {
    fn from(err: caretrace_types::Error) -> Self {
        match err {
            caretrace_types::Error::Json(err) => Error::Json(err),
            other => Error::InvalidOperation(other.to_string()),
        }
    }
}

impl From<caretrace_engine::AnnotationRejection> for Error {
    fn from(err: caretrace_engine::AnnotationRejection) -> Self {
        Error::InvalidOperation(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
