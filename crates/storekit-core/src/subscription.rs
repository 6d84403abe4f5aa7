//! Subscription status view.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::transaction::{RenewalInfo, TransactionInfo};

/// Symbolic form of the vendor's numeric subscription status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionStatusType {
    /// The subscription is active (1).
    Active,
    /// The subscription expired (2).
    Expired,
    /// The vendor is retrying billing (3).
    BillingRetry,
    /// Billing failed but service continues during the grace period (4).
    BillingGracePeriod,
    /// The vendor revoked the subscription (5).
    Revoked,
    /// A status code this crate does not know.
    Unknown,
}

impl SubscriptionStatusType {
    /// Map a vendor status code.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Active,
            2 => Self::Expired,
            3 => Self::BillingRetry,
            4 => Self::BillingGracePeriod,
            5 => Self::Revoked,
            _ => Self::Unknown,
        }
    }

    /// Symbolic name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Expired => "EXPIRED",
            Self::BillingRetry => "BILLING_RETRY",
            Self::BillingGracePeriod => "BILLING_GRACE_PERIOD",
            Self::Revoked => "REVOKED",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Whether the customer should currently have access.
    #[must_use]
    pub const fn grants_access(self) -> bool {
        matches!(self, Self::Active | Self::BillingGracePeriod)
    }
}

/// Current status of one subscription, built from decoded vendor payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionStatus {
    /// Identifier of the first transaction in the renewal chain.
    pub original_transaction_id: String,
    /// Numeric status reported by the vendor.
    pub status: i32,
    /// Symbolic form of `status`.
    pub status_type: SubscriptionStatusType,
    /// Expiry of the latest transaction; the epoch when absent.
    pub expiration_date: DateTime<Utc>,
    /// Decoded latest transaction.
    pub transaction_info: TransactionInfo,
    /// Decoded renewal information.
    pub renewal_info: RenewalInfo,
}
