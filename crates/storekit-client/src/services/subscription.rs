//! Subscription status lookups.

use std::sync::Arc;

use serde_json::Value;
use storekit_core::{RenewalInfo, SubscriptionStatus, SubscriptionStatusType, TransactionInfo};

use super::require_id;
use crate::decoder::PayloadDecoder;
use crate::error::ClientError;
use crate::executor::Requester;
use crate::transport::HttpMethod;
use crate::types::StatusResponse;

/// Reads subscription statuses.
#[derive(Clone)]
pub struct SubscriptionService {
    requester: Arc<dyn Requester>,
    decoder: PayloadDecoder,
}

impl SubscriptionService {
    /// Create the service.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>, decoder: PayloadDecoder) -> Self {
        Self { requester, decoder }
    }

    /// Status of the subscription started by `original_transaction_id`.
    ///
    /// Uses the first transaction of the first subscription group in the
    /// response and decodes its signed transaction and renewal info.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotFound`] when the response has no group, no
    /// transaction or no signed fields, and [`ClientError::Decode`] when a
    /// signed field cannot be decoded.
    pub async fn get_subscription_status(
        &self,
        original_transaction_id: &str,
    ) -> Result<SubscriptionStatus, ClientError> {
        let id = require_id("original transaction id", original_transaction_id)?;
        let body = self
            .requester
            .execute(HttpMethod::Get, &format!("/subscriptions/{id}"), None)
            .await?;
        let response: StatusResponse = serde_json::from_value(body)?;

        let entry = response
            .data
            .into_iter()
            .next()
            .and_then(|group| group.last_transactions.into_iter().next())
            .ok_or_else(|| ClientError::NotFound(format!("no subscription data for {id}")))?;

        let (Some(signed_transaction), Some(signed_renewal)) =
            (entry.signed_transaction_info, entry.signed_renewal_info)
        else {
            return Err(ClientError::NotFound(format!(
                "subscription {id} is missing signed transaction or renewal info"
            )));
        };

        let transaction_info: TransactionInfo = self
            .decoder
            .decode(&signed_transaction)
            .ok_or_else(|| ClientError::Decode("signed transaction info".into()))?;
        let renewal_info: RenewalInfo = self
            .decoder
            .decode(&signed_renewal)
            .ok_or_else(|| ClientError::Decode("signed renewal info".into()))?;

        let status = entry.status.unwrap_or_default();
        let original_transaction_id = entry
            .original_transaction_id
            .or_else(|| transaction_info.original_transaction_id.clone())
            .unwrap_or_else(|| id.to_string());

        tracing::debug!(
            original_transaction_id = %original_transaction_id,
            status,
            "Fetched subscription status"
        );

        Ok(SubscriptionStatus {
            original_transaction_id,
            status,
            status_type: SubscriptionStatusType::from_code(status),
            expiration_date: transaction_info.expiration_date(),
            transaction_info,
            renewal_info,
        })
    }

    /// Statuses of every subscription related to `original_transaction_id`,
    /// returned as the vendor sent them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_all_subscription_statuses(
        &self,
        original_transaction_id: &str,
    ) -> Result<Value, ClientError> {
        let id = require_id("original transaction id", original_transaction_id)?;
        self.requester
            .execute(HttpMethod::Get, &format!("/subscriptions/{id}/all"), None)
            .await
    }
}
