//! Error types for document fetching.

/// Fragment served when the document server answers with a non-200 status.
pub const UNAVAILABLE_FRAGMENT: &str =
    "<p>Unable to load documentation from GitHub. Please check the repository URL.</p>";

/// Error from fetching a remote document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, unreadable body).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    /// Server answered with a status other than `200 OK`.
    #[error("HTTP status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },
}

impl FetchError {
    /// HTML fragment shown in place of the document.
    #[must_use]
    pub fn fallback_fragment(&self) -> String {
        match self {
            Self::Status { .. } => UNAVAILABLE_FRAGMENT.to_owned(),
            Self::Http(err) => format!("<p>Error loading documentation: {err}</p>"),
        }
    }
}
