//! Client error types.

/// Errors that can occur when using the App Store client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The private key could not be loaded.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),

    /// The signing primitive rejected the key or algorithm.
    #[error(
        "failed to sign authentication token; the private key is likely malformed \
         or not an ES256 (P-256) key: {0}"
    )]
    Signing(#[source] jsonwebtoken::errors::Error),

    /// A local precondition failed; no request was sent.
    #[error("validation error: {0}")]
    Validation(String),

    /// The vendor or the transport rejected the request after the retry
    /// policy was exhausted.
    #[error("App Store Server API error: {message}")]
    Api {
        /// Normalized message, with the HTTP status appended when known.
        message: String,
        /// HTTP status code, absent for transport failures.
        status: Option<u16>,
        /// Vendor error code from the response body.
        error_code: Option<i64>,
    },

    /// The response did not contain the requested record.
    #[error("not found: {0}")]
    NotFound(String),

    /// A signed payload required by the operation could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// HTTP status code of an API error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => *status,
            _ => None,
        }
    }
}

/// Errors that can occur while loading the private key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialError {
    /// The value is neither a readable file nor inline PEM text.
    #[error("invalid private key: must be either a readable file path or PEM key content")]
    InvalidSource,

    /// The PEM text lacks its header or footer marker.
    #[error("malformed PEM private key: missing {missing} marker")]
    MalformedEnvelope {
        /// `"header"` or `"footer"`.
        missing: &'static str,
    },
}
