//! Transaction lookups, history and account linking.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;
use storekit_core::{AccountTenure, TransactionInfo};
use uuid::Uuid;

use super::require_id;
use crate::decoder::PayloadDecoder;
use crate::error::ClientError;
use crate::executor::Requester;
use crate::transport::HttpMethod;
use crate::types::{AppAccountTokenRequest, HistoryResponse, TransactionInfoResponse};

/// Reads transactions and manages their account tokens.
///
/// Signed transactions that fail to decode are returned as `None` rather than
/// failing the whole call; the failure is logged by the decoder.
#[derive(Clone)]
pub struct TransactionService {
    requester: Arc<dyn Requester>,
    decoder: PayloadDecoder,
}

impl TransactionService {
    /// Create the service.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>, decoder: PayloadDecoder) -> Self {
        Self { requester, decoder }
    }

    /// Fetch and decode a single transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response carries no
    /// signed transaction.
    pub async fn verify_purchase(
        &self,
        transaction_id: &str,
    ) -> Result<Option<TransactionInfo>, ClientError> {
        let id = require_id("transaction id", transaction_id)?;
        let body = self
            .requester
            .execute(HttpMethod::Get, &format!("/transactions/{id}"), None)
            .await?;
        let response: TransactionInfoResponse = serde_json::from_value(body)?;

        let signed = response
            .signed_transaction_info
            .ok_or_else(|| ClientError::NotFound(format!("no signed transaction for {id}")))?;

        Ok(self.decoder.decode(&signed))
    }

    /// Fetch and decode a customer's transaction history.
    ///
    /// Entries keep the vendor's order; an entry is `None` when its signed
    /// payload could not be decoded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn get_transaction_history(
        &self,
        transaction_id: &str,
    ) -> Result<Vec<Option<TransactionInfo>>, ClientError> {
        let id = require_id("transaction id", transaction_id)?;
        let body = self
            .requester
            .execute(HttpMethod::Get, &format!("/history/{id}"), None)
            .await?;
        let response: HistoryResponse = serde_json::from_value(body)?;

        if response.has_more {
            tracing::debug!(
                transaction_id = %id,
                revision = ?response.revision,
                "Transaction history has more pages"
            );
        }

        Ok(response
            .signed_transactions
            .iter()
            .map(|signed| self.decoder.decode(signed))
            .collect())
    }

    /// Look up the transactions of a customer's order, as the vendor sent them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn lookup_order(&self, order_id: &str) -> Result<Value, ClientError> {
        let id = require_id("order id", order_id)?;
        self.requester
            .execute(HttpMethod::Get, &format!("/lookup/{id}"), None)
            .await
    }

    /// Look up refunded transactions, as the vendor sent them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn refund_lookup(&self, transaction_id: &str) -> Result<Value, ClientError> {
        let id = require_id("transaction id", transaction_id)?;
        self.requester
            .execute(HttpMethod::Get, &format!("/refund/lookup/{id}"), None)
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
        let id = require_id("original transaction id", original_transaction_id)?;
        let body = serde_json::to_value(AppAccountTokenRequest { app_account_token })?;
        self.requester
            .execute(
                HttpMethod::Put,
                &format!("/transactions/{id}/appAccountToken"),
                Some(body),
            )
            .await?;
        Ok(())
    }

    /// Tenure bucket of an account created at `since`.
    #[must_use]
    pub fn get_account_tenure(&self, since: DateTime<Utc>) -> AccountTenure {
        storekit_core::account_tenure(since)
    }
}
