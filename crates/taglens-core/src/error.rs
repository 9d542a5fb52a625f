//! Error types for taglens

/// Result type alias using taglens's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for classification operations
///
/// Variants carry owned strings rather than source errors so an outcome can
/// be broadcast to every caller coalesced onto one in-flight job.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// Input was empty or whitespace-only
    #[error("invalid input: text must contain at least one non-whitespace character")]
    InvalidInput,

    /// Caller's wait budget elapsed before the classification finished
    #[error("classification timed out")]
    Timeout,

    /// The remote inference call failed
    #[error("upstream error: {0}")]
    Upstream(String),

    /// The remote service answered with a payload the core cannot use
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Generic internal errors
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Create a new malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
