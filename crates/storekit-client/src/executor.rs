//! Authenticated request execution.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use storekit_core::Environment;

use crate::error::ClientError;
use crate::retry::{AttemptFailure, EnvironmentFallback, RetryPolicy};
use crate::router::EnvironmentRouter;
use crate::token::TokenMinter;
use crate::transport::{HttpMethod, HttpRequest, HttpTransport};

/// Body fields checked, in order, for a human-readable vendor error.
const MESSAGE_FIELDS: [&str; 4] = ["message", "errorMessage", "error", "errorCode"];

/// Capability the domain services depend on.
#[async_trait]
pub trait Requester: Send + Sync {
    /// Perform one authenticated call and return the JSON response body.
    ///
    /// `path` is relative to the API version prefix, e.g. `/history/123`.
    /// An empty success body is returned as `Value::Null`.
    ///
    /// # Errors
    ///
    /// Returns a [`ClientError`] when signing fails or every permitted
    /// attempt failed.
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError>;

    /// The environment the next call will try first.
    fn current_environment(&self) -> Environment;
}

/// Mints a token, routes, sends and applies the retry policy for each call.
pub struct RequestExecutor {
    minter: TokenMinter,
    router: EnvironmentRouter,
    transport: Arc<dyn HttpTransport>,
    policy: Arc<dyn RetryPolicy>,
}

impl RequestExecutor {
    /// Create an executor with the [`EnvironmentFallback`] policy.
    #[must_use]
    pub fn new(
        minter: TokenMinter,
        router: EnvironmentRouter,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            minter,
            router,
            transport,
            policy: Arc::new(EnvironmentFallback),
        }
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.policy = policy;
        self
    }

    /// The environment router.
    #[must_use]
    pub fn router(&self) -> &EnvironmentRouter {
        &self.router
    }

    async fn attempt(
        &self,
        environment: Environment,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Result<Value, AttemptFailure>, ClientError> {
        let bearer_token = self.minter.mint()?;
        let url = format!("{}{}", self.router.base_url(environment), path);

        tracing::debug!(%method, %url, %environment, "Sending App Store request");

        let request = HttpRequest {
            method,
            url,
            bearer_token,
            body: body.cloned(),
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => return Ok(Err(AttemptFailure::Transport(e.0))),
        };

        if !response.is_success() {
            return Ok(Err(AttemptFailure::Status {
                status: response.status,
                body: response.body,
            }));
        }

        if response.body.trim().is_empty() {
            return Ok(Ok(Value::Null));
        }

        Ok(Ok(serde_json::from_str(&response.body)?))
    }
}

#[async_trait]
impl Requester for RequestExecutor {
    async fn execute(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ClientError> {
        let plan = self.router.plan();
        let limit = self.policy.max_attempts().max(1);
        let attempts = &plan.attempts()[..plan.attempts().len().min(limit)];

        for (index, &environment) in attempts.iter().enumerate() {
            match self.attempt(environment, method, path, body.as_ref()).await? {
                Ok(value) => {
                    self.router.record_success(environment);
                    return Ok(value);
                }
                Err(failure) => {
                    tracing::warn!(
                        %method,
                        path = %path,
                        %environment,
                        attempt = index + 1,
                        error = %failure,
                        "App Store request failed"
                    );

                    let is_last = index + 1 == attempts.len();
                    if is_last || !self.policy.should_retry(&failure) {
                        return Err(normalize_failure(failure));
                    }
                }
            }
        }

        Err(ClientError::Configuration("retry policy permits no attempts".into()))
    }

    fn current_environment(&self) -> Environment {
        self.router.current()
    }
}

impl std::fmt::Debug for RequestExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestExecutor")
            .field("minter", &self.minter)
            .field("router", &self.router)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

/// Convert the last failed attempt into [`ClientError::Api`].
///
/// The message prefers a vendor message field, then the raw body, then the
/// status reason; the HTTP status is appended when there is one.
pub(crate) fn normalize_failure(failure: AttemptFailure) -> ClientError {
    match failure {
        AttemptFailure::Transport(message) => ClientError::Api {
            message,
            status: None,
            error_code: None,
        },
        AttemptFailure::Status { status, body } => {
            let parsed: Option<Value> = serde_json::from_str(&body).ok();
            let error_code = parsed
                .as_ref()
                .and_then(|v| v.get("errorCode"))
                .and_then(Value::as_i64);

            let message = parsed
                .as_ref()
                .and_then(vendor_message)
                .or_else(|| {
                    let raw = body.trim();
                    (!raw.is_empty()).then(|| raw.to_string())
                })
                .unwrap_or_else(|| {
                    reqwest::StatusCode::from_u16(status)
                        .ok()
                        .and_then(|s| s.canonical_reason())
                        .unwrap_or("request failed")
                        .to_string()
                });

            ClientError::Api {
                message: format!("{message} (HTTP {status})"),
                status: Some(status),
                error_code,
            }
        }
    }
}

fn vendor_message(body: &Value) -> Option<String> {
    MESSAGE_FIELDS.iter().find_map(|field| match body.get(field)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
