//! App Store Server API client.
//!
//! Authenticates with short-lived ES256 tokens, routes each call to the
//! production or sandbox host (falling back to the other host once when the
//! environment is not pinned) and decodes the signed transaction payloads the
//! vendor returns.
//!
//! # Example
//!
//! ```no_run
//! use storekit_client::{AppStoreClient, ClientConfig, ConsumptionRequest, ConsumptionStatus,
//!     DeliveryStatus, Platform};
//!
//! # async fn example() -> Result<(), storekit_client::ClientError> {
//! let client = AppStoreClient::new(ClientConfig::new(
//!     "57246542-96fe-1a63-e053-0824d011072a",
//!     "2X9R4HXF34",
//!     "/etc/appstore/AuthKey_2X9R4HXF34.p8",
//!     "com.example.app",
//! ))?;
//!
//! // Check a subscription
//! let status = client.get_subscription_status("2000000123456789").await?;
//! println!("{}: {}", status.original_transaction_id, status.status_type.as_str());
//!
//! // Answer a refund request
//! let request = ConsumptionRequest::new(
//!     ConsumptionStatus::PartiallyConsumed,
//!     Platform::Apple,
//!     false,
//!     DeliveryStatus::DeliveredWorking,
//! )
//! .with_customer_consent(true);
//! client.send_consumption_information("2000000123456789", &request).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Signed payloads
//!
//! Payloads are decoded without signature verification unless a
//! [`SignatureVerifier`] is installed through [`AppStoreClientBuilder`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod config;
mod credentials;
mod decoder;
mod error;
mod executor;
mod retry;
mod router;
pub mod services;
mod token;
mod transport;
pub mod types;

pub use client::{AppStoreClient, AppStoreClientBuilder};
pub use config::{ClientConfig, ClientOptions};
pub use credentials::{load_private_key, PEM_FOOTER, PEM_HEADER};
pub use decoder::{DecodeError, PayloadDecoder, SignatureVerifier};
pub use error::{ClientError, CredentialError};
pub use executor::{RequestExecutor, Requester};
pub use retry::{AttemptFailure, EnvironmentFallback, NoRetry, RetryPolicy};
pub use router::{EnvironmentRouter, RoutePlan};
pub use services::{ConsumptionService, SubscriptionService, TransactionService};
pub use token::{TokenClaims, TokenMinter, AUDIENCE, TOKEN_LIFETIME_SECS};
pub use transport::{
    HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
};

pub use storekit_core::{
    account_tenure, AccountTenure, ConsumptionRequest, ConsumptionStatus, DeliveryStatus,
    Environment, LifetimeDollars, PlayTime, Platform, RefundPreference, RenewalInfo,
    SubscriptionStatus, SubscriptionStatusType, TransactionInfo, UserStatus,
};
