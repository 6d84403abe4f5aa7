//! Consumption reporting for refund requests.

use std::sync::Arc;

use storekit_core::ConsumptionRequest;

use super::require_id;
use crate::error::ClientError;
use crate::executor::Requester;
use crate::transport::HttpMethod;

/// Sends consumption information.
#[derive(Clone)]
pub struct ConsumptionService {
    requester: Arc<dyn Requester>,
}

impl ConsumptionService {
    /// Create the service.
    #[must_use]
    pub fn new(requester: Arc<dyn Requester>) -> Self {
        Self { requester }
    }

    /// Send consumption information for `transaction_id`.
    ///
    /// The vendor acknowledges with an empty response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Validation`] without contacting the vendor when
    /// the customer has not consented, or an error if the request fails.
    pub async fn send_consumption_information(
        &self,
        transaction_id: &str,
        request: &ConsumptionRequest,
    ) -> Result<(), ClientError> {
        if !request.customer_consented {
            return Err(ClientError::Validation(
                "customer consent is required to send consumption information".into(),
            ));
        }

        let id = require_id("transaction id", transaction_id)?;
        let body = serde_json::to_value(request)?;

        self.requester
            .execute(
                HttpMethod::Put,
                &format!("/transactions/consumption/{id}"),
                Some(body),
            )
            .await?;

        tracing::info!(transaction_id = %id, "Sent consumption information");
        Ok(())
    }
}
