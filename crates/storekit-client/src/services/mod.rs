//! Domain services built on a [`Requester`](crate::executor::Requester).

pub mod consumption;
pub mod subscription;
pub mod transaction;

pub use consumption::ConsumptionService;
pub use subscription::SubscriptionService;
pub use transaction::TransactionService;

use crate::error::ClientError;

/// Check an identifier before it becomes a path segment.
///
/// Only ASCII letters, digits, `-` and `_` are accepted.
fn require_id<'a>(kind: &str, value: &'a str) -> Result<&'a str, ClientError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ClientError::Validation(format!("{kind} must not be empty")));
    }
    if !value.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
        return Err(ClientError::Validation(format!(
            "{kind} contains characters not allowed in a path segment: {value:?}"
        )));
    }
    Ok(value)
}
