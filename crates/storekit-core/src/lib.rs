//! Core types for the App Store Server API client.
//!
//! This crate provides the vendor data model shared by the client crate:
//!
//! - **Environments**: `Environment` and the default API base URLs
//! - **Consumption**: `ConsumptionRequest` and its integer enumerations
//! - **Tenure**: bucketing an account's age into `AccountTenure`
//! - **Records**: decoded `TransactionInfo` / `RenewalInfo` payloads and the
//!   `SubscriptionStatus` view built from them
//!
//! # Enumerations
//!
//! Every vendor enumeration travels over the wire as a small integer. The
//! Rust enums serialize to and from those integers, so a `ConsumptionRequest`
//! can be sent with `serde_json` directly.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

#[macro_use]
mod macros;

pub mod consumption;
pub mod environment;
pub mod error;
pub mod subscription;
pub mod tenure;
pub mod transaction;

pub use consumption::{
    AccountTenure, ConsumptionRequest, ConsumptionStatus, DeliveryStatus, LifetimeDollars,
    PlayTime, Platform, RefundPreference, UserStatus,
};
pub use environment::{Environment, PRODUCTION_BASE_URL, SANDBOX_BASE_URL};
pub use error::{CoreError, Result};
pub use subscription::{SubscriptionStatus, SubscriptionStatusType};
pub use tenure::account_tenure;
pub use transaction::{RenewalInfo, TransactionInfo};
