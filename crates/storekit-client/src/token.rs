//! Authentication token minting.
//!
//! Every request to the App Store Server API carries a bearer token signed
//! with the team's ES256 key. Tokens are minted per request and never cached.

use std::fmt;

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::ClientError;

/// Audience claim expected by the App Store Server API.
pub const AUDIENCE: &str = "appstoreconnect-v1";

/// Lifetime of a minted token, in seconds.
pub const TOKEN_LIFETIME_SECS: i64 = 3600;

/// Claims of an authentication token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issuer ID from App Store Connect.
    pub iss: String,
    /// Issued at, in seconds since the epoch.
    pub iat: i64,
    /// Expiry, in seconds since the epoch.
    pub exp: i64,
    /// Always [`AUDIENCE`].
    pub aud: String,
    /// Bundle identifier of the app.
    pub bid: String,
}

/// Signs authentication tokens from the loaded key and static identifiers.
#[derive(Clone)]
pub struct TokenMinter {
    issuer_id: String,
    key_id: String,
    bundle_id: String,
    private_key_pem: String,
}

impl TokenMinter {
    /// Create a minter from normalized PEM text.
    #[must_use]
    pub fn new(
        issuer_id: impl Into<String>,
        key_id: impl Into<String>,
        bundle_id: impl Into<String>,
        private_key_pem: impl Into<String>,
    ) -> Self {
        Self {
            issuer_id: issuer_id.into(),
            key_id: key_id.into(),
            bundle_id: bundle_id.into(),
            private_key_pem: private_key_pem.into(),
        }
    }

    /// Mint a token issued now.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Signing`] if the key is not a valid EC private key.
    pub fn mint(&self) -> Result<String, ClientError> {
        self.mint_at(Utc::now().timestamp())
    }

    /// Mint a token with an explicit issued-at time, in seconds since the epoch.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Signing`] if the key is not a valid EC private key.
    pub fn mint_at(&self, issued_at: i64) -> Result<String, ClientError> {
        let mut header = Header::new(Algorithm::ES256);
        header.kid = Some(self.key_id.clone());
        header.typ = Some("JWT".to_string());

        let claims = self.claims_at(issued_at);

        let key = EncodingKey::from_ec_pem(self.private_key_pem.as_bytes())
            .map_err(ClientError::Signing)?;

        encode(&header, &claims, &key).map_err(ClientError::Signing)
    }

    /// Claims a token issued at `issued_at` carries.
    #[must_use]
    pub fn claims_at(&self, issued_at: i64) -> TokenClaims {
        TokenClaims {
            iss: self.issuer_id.clone(),
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
            aud: AUDIENCE.to_string(),
            bid: self.bundle_id.clone(),
        }
    }
}

impl fmt::Debug for TokenMinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenMinter")
            .field("issuer_id", &self.issuer_id)
            .field("key_id", &self.key_id)
            .field("bundle_id", &self.bundle_id)
            .field("private_key_pem", &"<redacted>")
            .finish()
    }
}
