//! Signed payload decoding.
//!
//! The vendor returns transaction and renewal information as compact signed
//! tokens (`header.claims.signature`). This module reads the claims segment.
//!
//! # Security
//!
//! Signatures are **not** verified by default. Trust rests on the TLS
//! connection to the vendor host. Callers that receive signed payloads from
//! anywhere else (e.g. forwarded by an app) should install a
//! [`SignatureVerifier`] with [`PayloadDecoder::with_verifier`].

use std::sync::Arc;

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use serde::de::DeserializeOwned;

/// URL-safe base64 that accepts segments with or without padding.
const SEGMENT_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Hook for verifying a signed payload before it is decoded.
pub trait SignatureVerifier: Send + Sync {
    /// Check the signature of a compact token.
    ///
    /// # Errors
    ///
    /// Returns a reason when the token must not be trusted.
    fn verify(&self, token: &str) -> Result<(), String>;
}

/// Why a signed payload could not be decoded.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The token does not have exactly three segments.
    #[error("expected 3 dot-separated segments, found {0}")]
    SegmentCount(usize),

    /// The claims segment is not base64url.
    #[error("invalid base64 in claims segment: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The claims segment is not the expected JSON.
    #[error("invalid JSON in claims segment: {0}")]
    Json(#[from] serde_json::Error),

    /// The installed verifier rejected the token.
    #[error("signature rejected: {0}")]
    Rejected(String),
}

/// Decodes the claims segment of vendor-signed payloads.
#[derive(Clone, Default)]
pub struct PayloadDecoder {
    verifier: Option<Arc<dyn SignatureVerifier>>,
}

impl PayloadDecoder {
    /// Create a decoder that does not verify signatures.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that runs `verifier` before decoding.
    #[must_use]
    pub fn with_verifier(verifier: Arc<dyn SignatureVerifier>) -> Self {
        Self {
            verifier: Some(verifier),
        }
    }

    /// Whether a signature verifier is installed.
    #[must_use]
    pub fn verifies_signatures(&self) -> bool {
        self.verifier.is_some()
    }

    /// Decode the claims of `token`, reporting why it failed.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] describing the first check that failed.
    pub fn try_decode<T: DeserializeOwned>(&self, token: &str) -> Result<T, DecodeError> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != 3 {
            return Err(DecodeError::SegmentCount(segments.len()));
        }

        if let Some(verifier) = &self.verifier {
            verifier.verify(token).map_err(DecodeError::Rejected)?;
        }

        let bytes = SEGMENT_ENGINE.decode(segments[1])?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Decode the claims of `token`, logging and returning `None` on failure.
    #[must_use]
    pub fn decode<T: DeserializeOwned>(&self, token: &str) -> Option<T> {
        match self.try_decode(token) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to decode signed payload");
                None
            }
        }
    }

    /// Decode the claims of `token` as untyped JSON.
    #[must_use]
    pub fn decode_claims(&self, token: &str) -> Option<serde_json::Value> {
        self.decode(token)
    }
}

impl std::fmt::Debug for PayloadDecoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PayloadDecoder")
            .field("verifies_signatures", &self.verifies_signatures())
            .finish()
    }
}

/// Build an unsigned compact token around `claims`, for tests.
#[cfg(test)]
pub(crate) fn fake_signed_payload(claims: &serde_json::Value) -> String {
    let header = SEGMENT_ENGINE.encode(br#"{"alg":"ES256","x5c":[]}"#);
    let body = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}
