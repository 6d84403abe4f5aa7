//! App Store Server API client.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::Value;
use storekit_core::{
    AccountTenure, ConsumptionRequest, Environment, SubscriptionStatus, TransactionInfo,
};
use uuid::Uuid;

use crate::config::{ClientConfig, ClientOptions};
use crate::credentials::load_private_key;
use crate::decoder::{PayloadDecoder, SignatureVerifier};
use crate::error::ClientError;
use crate::executor::{RequestExecutor, Requester};
use crate::retry::RetryPolicy;
use crate::router::EnvironmentRouter;
use crate::services::{ConsumptionService, SubscriptionService, TransactionService};
use crate::token::TokenMinter;
use crate::transport::{HttpTransport, ReqwestTransport};

/// Client for the App Store Server API.
///
/// Cheap to share behind an [`Arc`]; every call mints its own token and
/// fixes its route up front.
#[derive(Clone)]
pub struct AppStoreClient {
    executor: Arc<RequestExecutor>,
    subscriptions: SubscriptionService,
    transactions: TransactionService,
    consumption: ConsumptionService,
}

impl AppStoreClient {
    /// Create a client with default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        Self::builder(config).build()
    }

    /// Create a client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot be loaded or the HTTP
    /// client cannot be built.
    pub fn with_options(config: ClientConfig, options: ClientOptions) -> Result<Self, ClientError> {
        Self::builder(config).options(options).build()
    }

    /// Start building a client.
    #[must_use]
    pub fn builder(config: ClientConfig) -> AppStoreClientBuilder {
        AppStoreClientBuilder::new(config)
    }

    /// Environment the next unpinned call will try first.
    #[must_use]
    pub fn current_environment(&self) -> Environment {
        self.executor.current_environment()
    }

    /// Subscription operations.
    #[must_use]
    pub fn subscriptions(&self) -> &SubscriptionService {
        &self.subscriptions
    }

    /// Transaction operations.
    #[must_use]
    pub fn transactions(&self) -> &TransactionService {
        &self.transactions
    }

    /// Consumption reporting.
    #[must_use]
    pub fn consumption(&self) -> &ConsumptionService {
        &self.consumption
    }

    /// Status of the subscription an original transaction belongs to.
    ///
    /// # Errors
    ///
    /// See [`SubscriptionService::get_subscription_status`].
    pub async fn get_subscription_status(
        &self,
        original_transaction_id: &str,
    ) -> Result<SubscriptionStatus, ClientError> {
        self.subscriptions
            .get_subscription_status(original_transaction_id)
            .await
    }

    /// Statuses of every subscription group, as the vendor sent them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_subscription_statuses(
        &self,
        original_transaction_id: &str,
    ) -> Result<Value, ClientError> {
        self.subscriptions
            .get_all_subscription_statuses(original_transaction_id)
            .await
    }

    /// Fetch and decode a single transaction.
    ///
    /// # Errors
    ///
    /// See [`TransactionService::verify_purchase`].
    pub async fn verify_purchase(
        &self,
        transaction_id: &str,
    ) -> Result<Option<TransactionInfo>, ClientError> {
        self.transactions.verify_purchase(transaction_id).await
    }

    /// Fetch and decode a customer's transaction history.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_transaction_history(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<Option<TransactionInfo>>, ClientError> {
        self.transactions.get_transaction_history(transaction_id).await
    }

    /// Look up an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn lookup_order(&self, order_id: &str) -> Result<Value, ClientError> {
        self.transactions.lookup_order(order_id).await
    }

    /// Look up refunded transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refund_lookup(&self, transaction_id: &str) -> Result<Value, ClientError> {
        self.transactions.refund_lookup(transaction_id).await
    }

    /// Send consumption information for a refund request.
    ///
    /// # Errors
    ///
    /// See [`ConsumptionService::send_consumption_information`].
    pub async fn send_consumption_information(
        &self,
        transaction_id: &str,
        request: &ConsumptionRequest,
    ) -> Result<(), ClientError> {
        self.consumption
            .send_consumption_information(transaction_id, request)
            .await
    }

    /// Link a purchase to the app's user account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn set_app_account_token(
        &self,
        original_transaction_id: &str,
        app_account_token: Uuid,
    ) -> Result<(), ClientError> {
        self.transactions
            .set_app_account_token(original_transaction_id, app_account_token)
            .await
    }

    /// Tenure bucket of an account created at `since`.
    #[must_use]
    pub fn get_account_tenure(&self, since: DateTime<Utc>) -> AccountTenure {
        self.transactions.get_account_tenure(since)
    }
}

impl std::fmt::Debug for AppStoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppStoreClient")
            .field("executor", &self.executor)
            .finish_non_exhaustive()
    }
}

/// Builder for [`AppStoreClient`].
pub struct AppStoreClientBuilder {
    config: ClientConfig,
    options: ClientOptions,
    transport: Option<Arc<dyn HttpTransport>>,
    retry_policy: Option<Arc<dyn RetryPolicy>>,
    verifier: Option<Arc<dyn SignatureVerifier>>,
}

impl AppStoreClientBuilder {
    fn new(config: ClientConfig) -> Self {
        Self {
            config,
            options: ClientOptions::default(),
            transport: None,
            retry_policy: None,
            verifier: None,
        }
    }

    /// Set the client options.
    #[must_use]
    pub fn options(mut self, options: ClientOptions) -> Self {
        self.options = options;
        self
    }

    /// Send requests through `transport` instead of the default HTTP client.
    #[must_use]
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: Arc<dyn RetryPolicy>) -> Self {
        self.retry_policy = Some(policy);
        self
    }

    /// Verify signed payloads before decoding them.
    #[must_use]
    pub fn signature_verifier(mut self, verifier: Arc<dyn SignatureVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if an identity field is blank, the private key cannot
    /// be loaded, or the HTTP client cannot be built.
    pub fn build(self) -> Result<AppStoreClient, ClientError> {
        let Self {
            config,
            options,
            transport,
            retry_policy,
            verifier,
        } = self;

        for (name, value) in [
            ("issuer_id", &config.issuer_id),
            ("key_id", &config.key_id),
            ("bundle_id", &config.bundle_id),
        ] {
            if value.trim().is_empty() {
                return Err(ClientError::Configuration(format!("{name} must not be empty")));
            }
        }

        let private_key = load_private_key(&config.private_key)?;
        let minter = TokenMinter::new(
            config.issuer_id,
            config.key_id,
            config.bundle_id,
            private_key,
        );
        let router = EnvironmentRouter::with_base_urls(
            config.environment,
            options.production_url,
            options.sandbox_url,
        );
        let transport: Arc<dyn HttpTransport> = if let Some(transport) = transport {
            transport
        } else {
            let timeout = Duration::from_secs(options.timeout_seconds);
            Arc::new(ReqwestTransport::new(timeout)?)
        };

        let mut executor = RequestExecutor::new(minter, router, transport);
        if let Some(policy) = retry_policy {
            executor = executor.with_retry_policy(policy);
        }
        let executor = Arc::new(executor);

        let decoder = if let Some(verifier) = verifier {
            PayloadDecoder::with_verifier(verifier)
        } else {
            tracing::info!("Signed payloads will be decoded without signature verification");
            PayloadDecoder::new()
        };

        let requester: Arc<dyn Requester> = executor.clone();
        Ok(AppStoreClient {
            subscriptions: SubscriptionService::new(requester.clone(), decoder.clone()),
            transactions: TransactionService::new(requester.clone(), decoder),
            consumption: ConsumptionService::new(requester),
            executor,
        })
    }
}
