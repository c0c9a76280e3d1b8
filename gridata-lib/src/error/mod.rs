//! Error types

mod api;
mod validation;

pub use api::*;
pub use validation::*;

/// Top-level error type for all library operations.
///
/// Every failure is returned as part of the operation's `Result`; nothing is
/// fatal to the process and every operation can be retried by re-invoking it
/// with the same or corrected input.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Transport or server failure during an API call.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local, field-scoped validation failure. Produced before a request is
    /// ever issued; blocks submission entirely.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// Returns `true` if the request never completed (network failure or
    /// timeout), as opposed to a server-side rejection.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Api(ApiError::Network(_)) | Error::Api(ApiError::Timeout(_))
        )
    }

    /// Returns the HTTP status code if this is a server error response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(api) => api.status_code(),
            Error::Validation(_) => None,
        }
    }

    /// Returns the server's error message verbatim, if this is a server
    /// error response.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Api(ApiError::Http { message, .. }) => Some(message),
            _ => None,
        }
    }
}
