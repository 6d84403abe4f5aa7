//! Request and response bodies of the App Store Server API.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Response of `GET /subscriptions/{originalTransactionId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    /// Vendor environment name.
    pub environment: Option<String>,
    /// Bundle identifier of the app.
    pub bundle_id: Option<String>,
    /// Apple ID of the app.
    pub app_apple_id: Option<i64>,
    /// One entry per subscription group.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<SubscriptionGroupStatus>,
}

/// Latest transactions of one subscription group.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionGroupStatus {
    /// Subscription group identifier.
    pub subscription_group_identifier: Option<String>,
    /// Most recent transaction per original transaction.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub last_transactions: Vec<LastTransaction>,
}

/// One entry of `lastTransactions`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastTransaction {
    /// Identifier of the first transaction in the renewal chain.
    pub original_transaction_id: Option<String>,
    /// Numeric subscription status.
    pub status: Option<i32>,
    /// Signed `TransactionInfo`.
    pub signed_transaction_info: Option<String>,
    /// Signed `RenewalInfo`.
    pub signed_renewal_info: Option<String>,
}

/// Response of `GET /transactions/{transactionId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfoResponse {
    /// Signed `TransactionInfo`.
    pub signed_transaction_info: Option<String>,
}

/// Response of `GET /history/{transactionId}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    /// Token for requesting the next page.
    pub revision: Option<String>,
    /// Bundle identifier of the app.
    pub bundle_id: Option<String>,
    /// Vendor environment name.
    pub environment: Option<String>,
    /// Whether more pages exist.
    #[serde(default)]
    pub has_more: bool,
    /// Signed transactions, oldest first.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub signed_transactions: Vec<String>,
}

/// Body of `PUT /transactions/{originalTransactionId}/appAccountToken`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppAccountTokenRequest {
    /// UUID that links the purchase to the app's user account.
    pub app_account_token: Uuid,
}

/// Read an explicit `null` list as empty.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_lists_read_as_empty() {
        let status: StatusResponse = serde_json::from_value(json!({"data": null})).unwrap();
        assert!(status.data.is_empty());

        let group: SubscriptionGroupStatus =
            serde_json::from_value(json!({"lastTransactions": null})).unwrap();
        assert!(group.last_transactions.is_empty());

        let history: HistoryResponse =
            serde_json::from_value(json!({"signedTransactions": null})).unwrap();
        assert!(history.signed_transactions.is_empty());
    }
}
