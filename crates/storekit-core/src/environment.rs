//! Vendor environments.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Base URL of the production App Store Server API.
pub const PRODUCTION_BASE_URL: &str = "https://api.storekit.itunes.apple.com/inApps/v1";

/// Base URL of the sandbox App Store Server API.
pub const SANDBOX_BASE_URL: &str = "https://api.storekit-sandbox.itunes.apple.com/inApps/v1";

/// One of the two vendor-hosted deployments of the API.
///
/// Serializes with the vendor's spelling (`"Production"`, `"Sandbox"`); parsing
/// from a string is case-insensitive so configuration can use `sandbox`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Environment {
    /// Live purchases.
    #[default]
    Production,
    /// Test purchases made with sandbox accounts and Xcode builds.
    Sandbox,
}

impl Environment {
    /// The other environment.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Production => Self::Sandbox,
            Self::Sandbox => Self::Production,
        }
    }

    /// Base URL of the vendor host for this environment.
    #[must_use]
    pub const fn default_base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::Sandbox => SANDBOX_BASE_URL,
        }
    }

    /// Lowercase name, as used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::Sandbox => "sandbox",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" => Ok(Self::Production),
            "sandbox" => Ok(Self::Sandbox),
            _ => Err(CoreError::InvalidEnvironment(s.to_string())),
        }
    }
}
