//! Shared helpers for client integration tests.

#![allow(dead_code)] // Not every helper is used by every test file

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;
use storekit_client::{AppStoreClient, ClientConfig, ClientOptions, Environment};
use wiremock::MockServer;

/// Path to the test signing key.
pub const KEY_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/AuthKey_TEST.p8");

/// Public half of the test signing key.
pub const PUBLIC_KEY: &str = include_str!("../fixtures/AuthKey_TEST.pub.pem");

/// Issuer used by every test client.
pub const ISSUER_ID: &str = "57246542-96fe-1a63-e053-0824d011072a";

/// Key ID used by every test client.
pub const KEY_ID: &str = "TESTKEY123";

/// Bundle ID used by every test client.
pub const BUNDLE_ID: &str = "com.example.app";

/// Two mock vendor hosts standing in for production and sandbox.
pub struct TestHarness {
    /// Mock production host.
    pub production: MockServer,
    /// Mock sandbox host.
    pub sandbox: MockServer,
}

impl TestHarness {
    /// Start both hosts.
    pub async fn start() -> Self {
        Self {
            production: MockServer::start().await,
            sandbox: MockServer::start().await,
        }
    }

    /// Options pointing the client at the mock hosts.
    pub fn options(&self) -> ClientOptions {
        ClientOptions::new()
            .with_timeout_seconds(5)
            .with_production_url(self.production.uri())
            .with_sandbox_url(self.sandbox.uri())
    }

    /// Client that falls back between the hosts.
    pub fn client(&self) -> AppStoreClient {
        AppStoreClient::with_options(config(), self.options()).expect("client should build")
    }

    /// Client pinned to `environment`.
    pub fn pinned_client(&self, environment: Environment) -> AppStoreClient {
        AppStoreClient::with_options(config().with_environment(environment), self.options())
            .expect("client should build")
    }

    /// Requests seen by the production host.
    pub async fn production_requests(&self) -> Vec<wiremock::Request> {
        self.production.received_requests().await.unwrap_or_default()
    }

    /// Requests seen by the sandbox host.
    pub async fn sandbox_requests(&self) -> Vec<wiremock::Request> {
        self.sandbox.received_requests().await.unwrap_or_default()
    }
}

/// Configuration backed by the test key file.
pub fn config() -> ClientConfig {
    ClientConfig::new(ISSUER_ID, KEY_ID, KEY_PATH, BUNDLE_ID)
}

/// Wrap `claims` in a compact token with a dummy signature.
pub fn signed_payload(claims: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"ES256","x5c":[]}"#);
    let body = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{body}.c2lnbmF0dXJl")
}

/// Bearer token sent with `request`.
pub fn bearer_token(request: &wiremock::Request) -> Option<String> {
    request
        .headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
}
