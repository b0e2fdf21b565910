//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Collaborator
//! failures (catalog lookups, remote execution) are carried opaquely in
//! [`Error::Upstream`] so callers see them unchanged.

use thiserror::Error;

/// Boxed source error from a catalog client.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the toolkit.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: bad function names, conflicting conversion inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// No client was supplied and the context has no default.
    #[error("no client provided, either set the client when creating a toolkit or register a default client")]
    MissingClient,

    /// A toolkit was requested with no function names.
    #[error("cannot create tool instances without function_names being provided")]
    EmptyFunctionList,

    /// Opaque collaborator failure (unknown function, permission denied, execution failure).
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience constructors
impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream {
            message: msg.into(),
            source: None,
        }
    }

    pub fn upstream_with(msg: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Upstream {
            message: msg.into(),
            source: Some(source.into()),
        }
    }

    /// True for failures that originated in a collaborator.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Error::Upstream { .. })
    }
}
