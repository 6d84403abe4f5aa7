//! Decoded transaction and renewal payloads.
//!
//! The vendor returns these as signed compact tokens. After the claims segment
//! has been decoded, it deserializes into the structs below. Every field is
//! optional because the vendor omits fields that do not apply to a product
//! type; fields this crate does not model are kept in `extra`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Convert vendor milliseconds since the epoch to a UTC timestamp.
fn from_millis(millis: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(millis)
}

/// A decoded signed transaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    /// Unique identifier of this transaction.
    pub transaction_id: Option<String>,
    /// Identifier of the first transaction in the renewal chain.
    pub original_transaction_id: Option<String>,
    /// Identifier of the subscription purchase across devices.
    pub web_order_line_item_id: Option<String>,
    /// Bundle identifier of the app.
    pub bundle_id: Option<String>,
    /// Product identifier of the in-app purchase.
    pub product_id: Option<String>,
    /// Subscription group the product belongs to.
    pub subscription_group_identifier: Option<String>,
    /// Purchase time, in milliseconds since the epoch.
    pub purchase_date: Option<i64>,
    /// Time of the original purchase, in milliseconds since the epoch.
    pub original_purchase_date: Option<i64>,
    /// Subscription expiry, in milliseconds since the epoch.
    pub expires_date: Option<i64>,
    /// Number of consumables purchased.
    pub quantity: Option<u32>,
    /// Product type, e.g. `Auto-Renewable Subscription`.
    #[serde(rename = "type")]
    pub product_type: Option<String>,
    /// Whether the customer bought it or has access through Family Sharing.
    pub in_app_ownership_type: Option<String>,
    /// Time the vendor signed the payload, in milliseconds since the epoch.
    pub signed_date: Option<i64>,
    /// Vendor environment name (`Production` or `Sandbox`).
    pub environment: Option<String>,
    /// `PURCHASE` or `RENEWAL`.
    pub transaction_reason: Option<String>,
    /// Three-letter storefront country code.
    pub storefront: Option<String>,
    /// Vendor storefront identifier.
    pub storefront_id: Option<String>,
    /// Price in milliunits of `currency`.
    pub price: Option<i64>,
    /// ISO 4217 currency code.
    pub currency: Option<String>,
    /// UUID the app associated with the customer's account.
    pub app_account_token: Option<String>,
    /// Time the vendor refunded or revoked the transaction.
    pub revocation_date: Option<i64>,
    /// Reason for the revocation.
    pub revocation_reason: Option<i32>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TransactionInfo {
    /// Expiry as a timestamp; the epoch when the payload carries none.
    #[must_use]
    pub fn expiration_date(&self) -> DateTime<Utc> {
        self.expires_date
            .and_then(from_millis)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Purchase time as a timestamp.
    #[must_use]
    pub fn purchased_at(&self) -> Option<DateTime<Utc>> {
        self.purchase_date.and_then(from_millis)
    }

    /// Original purchase time as a timestamp.
    #[must_use]
    pub fn originally_purchased_at(&self) -> Option<DateTime<Utc>> {
        self.original_purchase_date.and_then(from_millis)
    }

    /// Whether the vendor revoked this transaction.
    #[must_use]
    pub fn is_revoked(&self) -> bool {
        self.revocation_date.is_some()
    }
}

/// A decoded signed renewal payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewalInfo {
    /// Identifier of the first transaction in the renewal chain.
    pub original_transaction_id: Option<String>,
    /// Product the subscription renews to.
    pub auto_renew_product_id: Option<String>,
    /// Product currently subscribed to.
    pub product_id: Option<String>,
    /// 1 when auto-renew is on, 0 when off.
    pub auto_renew_status: Option<i32>,
    /// Why the subscription expired.
    pub expiration_intent: Option<i32>,
    /// End of the billing grace period, in milliseconds since the epoch.
    pub grace_period_expires_date: Option<i64>,
    /// Whether the vendor is still trying to renew.
    pub is_in_billing_retry_period: Option<bool>,
    /// Whether the customer accepted a price increase.
    pub price_increase_status: Option<i32>,
    /// Next renewal time, in milliseconds since the epoch.
    pub renewal_date: Option<i64>,
    /// Time the vendor signed the payload, in milliseconds since the epoch.
    pub signed_date: Option<i64>,
    /// Vendor environment name (`Production` or `Sandbox`).
    pub environment: Option<String>,
    /// Fields not modelled above.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl RenewalInfo {
    /// Whether the subscription will renew automatically.
    #[must_use]
    pub fn will_auto_renew(&self) -> bool {
        self.auto_renew_status == Some(1)
    }

    /// Next renewal time as a timestamp.
    #[must_use]
    pub fn renews_at(&self) -> Option<DateTime<Utc>> {
        self.renewal_date.and_then(from_millis)
    }
}
