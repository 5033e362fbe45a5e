//! Error types for docsync-host.

use thiserror::Error;

/// All errors that can arise from talking to the remote host.
#[derive(Debug, Error)]
pub enum HostError {
    /// Connection, DNS, TLS or timeout failure: no HTTP response.
    #[error("transport error calling {url}: {message}")]
    Transport { url: String, message: String },

    /// The host answered with a non-success status.
    #[error("{url} returned HTTP {status}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body was not the JSON we expected.
    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: std::io::Error,
    },

    /// The host answered, but without data docsync depends on (a deleted
    /// PR head repository, a fork without parent, ...).
    #[error("host response is missing {what}")]
    Missing { what: String },

    /// A write operation was attempted on an anonymous client.
    #[error("{operation} requires an authenticated client; anonymous access is read-only")]
    Unauthenticated { operation: &'static str },
}

impl HostError {
    /// `true` for HTTP 422 responses, which GitHub uses for rejected writes
    /// such as a duplicate pull request.
    pub fn is_unprocessable(&self) -> bool {
        matches!(self, HostError::Status { status: 422, .. })
    }
}
