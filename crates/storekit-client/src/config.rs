//! Client configuration.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use storekit_core::Environment;

use crate::error::ClientError;

/// Locations tried for the secrets file, relative to the working directory.
const SECRETS_PATHS: [&str; 2] = [".secrets/appstore.json", "../.secrets/appstore.json"];

/// Credentials and identity of the app talking to the App Store Server API.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Issuer ID from App Store Connect.
    pub issuer_id: String,

    /// ID of the in-app purchase key.
    pub key_id: String,

    /// PEM text of the key, or a path to a `.p8` file holding it.
    pub private_key: String,

    /// Bundle ID of the app.
    pub bundle_id: String,

    /// Pins every call to one environment. `None` enables fallback.
    pub environment: Option<Environment>,
}

/// Secrets file structure.
#[derive(Debug, Deserialize)]
struct AppStoreSecrets {
    issuer_id: String,
    key_id: String,
    private_key: String,
    bundle_id: String,
    #[serde(default)]
    environment: Option<String>,
}

impl ClientConfig {
    /// Create a configuration without a pinned environment.
    #[must_use]
    pub fn new(
        issuer_id: impl Into<String>,
        key_id: impl Into<String>,
        private_key: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Self {
        Self {
            issuer_id: issuer_id.into(),
            key_id: key_id.into(),
            private_key: private_key.into(),
            bundle_id: bundle_id.into(),
            environment: None,
        }
    }

    /// Pin every call to `environment`.
    #[must_use]
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Load configuration from a secrets file or the environment.
    ///
    /// `.secrets/appstore.json` is tried first; otherwise `APPLE_ISSUER_ID`,
    /// `APPLE_KEY_ID`, `APPLE_PRIVATE_KEY`, `APPLE_BUNDLE_ID` and the optional
    /// `APPLE_ENVIRONMENT` are read.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if a variable is missing or the
    /// environment name is not recognized.
    pub fn from_env() -> Result<Self, ClientError> {
        for path in &SECRETS_PATHS {
            if Path::new(path).exists() {
                let config = Self::from_secrets_file(path)?;
                tracing::info!(path = %path, "Loaded App Store secrets from file");
                return Ok(config);
            }
        }

        tracing::debug!("App Store secrets file not found, using environment variables");
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if a required variable is
    /// missing or blank, or the environment name is not recognized.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ClientError::Configuration(format!("{name} is not set")))
        };

        let config = Self::new(
            required("APPLE_ISSUER_ID")?,
            required("APPLE_KEY_ID")?,
            required("APPLE_PRIVATE_KEY")?,
            required("APPLE_BUNDLE_ID")?,
        );

        match lookup("APPLE_ENVIRONMENT").filter(|value| !value.trim().is_empty()) {
            Some(name) => Ok(config.with_environment(parse_environment(&name)?)),
            None => Ok(config),
        }
    }

    /// Load configuration from a JSON secrets file.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Configuration`] if the file cannot be read or
    /// parsed.
    pub fn from_secrets_file(path: impl AsRef<Path>) -> Result<Self, ClientError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClientError::Configuration(format!("cannot read {}: {e}", path.display()))
        })?;
        let secrets: AppStoreSecrets = serde_json::from_str(&contents).map_err(|e| {
            ClientError::Configuration(format!("invalid secrets file {}: {e}", path.display()))
        })?;

        let config = Self::new(
            secrets.issuer_id,
            secrets.key_id,
            secrets.private_key,
            secrets.bundle_id,
        );
        match secrets.environment {
            Some(name) => Ok(config.with_environment(parse_environment(&name)?)),
            None => Ok(config),
        }
    }
}

fn parse_environment(name: &str) -> Result<Environment, ClientError> {
    name.parse()
        .map_err(|e: storekit_core::CoreError| ClientError::Configuration(e.to_string()))
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("issuer_id", &self.issuer_id)
            .field("key_id", &self.key_id)
            .field("private_key", &"<redacted>")
            .field("bundle_id", &self.bundle_id)
            .field("environment", &self.environment)
            .finish()
    }
}

/// Options for the HTTP side of the client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,

    /// Base URL used for production calls.
    pub production_url: String,

    /// Base URL used for sandbox calls.
    pub sandbox_url: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            production_url: Environment::Production.default_base_url().to_string(),
            sandbox_url: Environment::Sandbox.default_base_url().to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Override the production base URL.
    #[must_use]
    pub fn with_production_url(mut self, url: impl Into<String>) -> Self {
        self.production_url = url.into();
        self
    }

    /// Override the sandbox base URL.
    #[must_use]
    pub fn with_sandbox_url(mut self, url: impl Into<String>) -> Self {
        self.sandbox_url = url.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn from_lookup_reads_all_variables() {
        let env = vars(&[
            ("APPLE_ISSUER_ID", "issuer"),
            ("APPLE_KEY_ID", "KEY123"),
            ("APPLE_PRIVATE_KEY", "/keys/AuthKey.p8"),
            ("APPLE_BUNDLE_ID", "com.example.app"),
            ("APPLE_ENVIRONMENT", "Sandbox"),
        ]);

        let config = ClientConfig::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.issuer_id, "issuer");
        assert_eq!(config.key_id, "KEY123");
        assert_eq!(config.private_key, "/keys/AuthKey.p8");
        assert_eq!(config.bundle_id, "com.example.app");
        assert_eq!(config.environment, Some(Environment::Sandbox));
    }

    #[test]
    fn from_lookup_leaves_environment_unpinned() {
        let env = vars(&[
            ("APPLE_ISSUER_ID", "issuer"),
            ("APPLE_KEY_ID", "KEY123"),
            ("APPLE_PRIVATE_KEY", "key"),
            ("APPLE_BUNDLE_ID", "com.example.app"),
        ]);

        let config = ClientConfig::from_lookup(|name| env.get(name).cloned()).unwrap();
        assert_eq!(config.environment, None);
    }

    #[test]
    fn from_lookup_reports_missing_variable() {
        let env = vars(&[("APPLE_ISSUER_ID", "issuer"), ("APPLE_KEY_ID", " ")]);

        let err = ClientConfig::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(ref m) if m == "APPLE_KEY_ID is not set"));
    }

    #[test]
    fn from_lookup_rejects_unknown_environment() {
        let env = vars(&[
            ("APPLE_ISSUER_ID", "issuer"),
            ("APPLE_KEY_ID", "KEY123"),
            ("APPLE_PRIVATE_KEY", "key"),
            ("APPLE_BUNDLE_ID", "com.example.app"),
            ("APPLE_ENVIRONMENT", "staging"),
        ]);

        let err = ClientConfig::from_lookup(|name| env.get(name).cloned()).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn from_secrets_file_parses_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let secrets = serde_json::json!({
            "issuer_id": "issuer",
            "key_id": "KEY123",
            "private_key": "key",
            "bundle_id": "com.example.app",
            "environment": "production"
        });
        write!(file, "{secrets}").unwrap();

        let config = ClientConfig::from_secrets_file(file.path()).unwrap();
        assert_eq!(config.key_id, "KEY123");
        assert_eq!(config.environment, Some(Environment::Production));
    }

    #[test]
    fn from_secrets_file_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClientConfig::from_secrets_file(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }

    #[test]
    fn debug_redacts_private_key() {
        let config = ClientConfig::new("issuer", "KEY123", "super-secret-pem", "com.example.app");
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("super-secret-pem"));
    }

    #[test]
    fn default_options() {
        let options = ClientOptions::default();
        assert_eq!(options.timeout_seconds, 30);
        assert_eq!(options.production_url, storekit_core::PRODUCTION_BASE_URL);
        assert_eq!(options.sandbox_url, storekit_core::SANDBOX_BASE_URL);
    }

    #[test]
    fn options_builder() {
        let options = ClientOptions::new()
            .with_timeout_seconds(5)
            .with_sandbox_url("http://localhost:9000");
        assert_eq!(options.timeout_seconds, 5);
        assert_eq!(options.sandbox_url, "http://localhost:9000");
    }
}
