//! Environment routing.
//!
//! Each call takes an immutable [`RoutePlan`] up front: a pinned client always
//! targets its configured environment, an unpinned client tries the last
//! environment that answered successfully and then the other one. Only a
//! successful response updates that hint, so concurrent failing calls cannot
//! flip each other's routes.

use std::sync::atomic::{AtomicU8, Ordering};

use storekit_core::Environment;

const PRODUCTION: u8 = 0;
const SANDBOX: u8 = 1;

const fn encode(environment: Environment) -> u8 {
    match environment {
        Environment::Production => PRODUCTION,
        Environment::Sandbox => SANDBOX,
    }
}

const fn decode(value: u8) -> Environment {
    if value == SANDBOX {
        Environment::Sandbox
    } else {
        Environment::Production
    }
}

/// Environments one call may target, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    attempts: Vec<Environment>,
}

impl RoutePlan {
    /// Environments to try, first to last.
    #[must_use]
    pub fn attempts(&self) -> &[Environment] {
        &self.attempts
    }

    /// The environment of the first attempt.
    #[must_use]
    pub fn primary(&self) -> Environment {
        self.attempts[0]
    }

    /// Whether a fallback environment is available.
    #[must_use]
    pub fn has_fallback(&self) -> bool {
        self.attempts.len() > 1
    }
}

/// Resolves environments to base URLs and tracks the preferred environment.
#[derive(Debug)]
pub struct EnvironmentRouter {
    pinned: Option<Environment>,
    hint: AtomicU8,
    production_url: String,
    sandbox_url: String,
}

impl EnvironmentRouter {
    /// Create a router with the vendor's base URLs.
    #[must_use]
    pub fn new(pinned: Option<Environment>) -> Self {
        Self::with_base_urls(
            pinned,
            Environment::Production.default_base_url(),
            Environment::Sandbox.default_base_url(),
        )
    }

    /// Create a router with custom base URLs.
    #[must_use]
    pub fn with_base_urls(
        pinned: Option<Environment>,
        production_url: impl Into<String>,
        sandbox_url: impl Into<String>,
    ) -> Self {
        let initial = pinned.unwrap_or(Environment::Production);
        Self {
            pinned,
            hint: AtomicU8::new(encode(initial)),
            production_url: production_url.into().trim_end_matches('/').to_string(),
            sandbox_url: sandbox_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Whether the environment was fixed by configuration.
    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned.is_some()
    }

    /// The environment the next call will try first.
    #[must_use]
    pub fn current(&self) -> Environment {
        self.pinned.unwrap_or_else(|| decode(self.hint.load(Ordering::Acquire)))
    }

    /// Route for one call.
    #[must_use]
    pub fn plan(&self) -> RoutePlan {
        let primary = self.current();
        let attempts = if self.is_pinned() {
            vec![primary]
        } else {
            vec![primary, primary.other()]
        };
        RoutePlan { attempts }
    }

    /// Remember the environment that just answered successfully.
    ///
    /// Has no effect on a pinned router.
    pub fn record_success(&self, environment: Environment) {
        if self.is_pinned() {
            return;
        }
        let previous = self.hint.swap(encode(environment), Ordering::AcqRel);
        if previous != encode(environment) {
            tracing::info!(
                from = %decode(previous),
                to = %environment,
                "Preferred App Store environment changed"
            );
        }
    }

    /// Base URL for `environment`.
    #[must_use]
    pub fn base_url(&self, environment: Environment) -> &str {
        match environment {
            Environment::Production => &self.production_url,
            Environment::Sandbox => &self.sandbox_url,
        }
    }
}
