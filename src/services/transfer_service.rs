use tracing::{info, warn};
use crate::api::BankApi;
use crate::api::bank::{ApiError, TransferRequest};
use crate::utils::coerce_number;

pub const TRANSFER_OK: &str = "Transfer successful!";
pub const TRANSFER_FAILED: &str = "Transfer failed";

/// Build the request from raw form text. The recipient is not validated and
/// the amount is only coerced, so NaN and negative values go through.
pub fn build_transfer(to_email: &str, amount: &str) -> TransferRequest {
    TransferRequest {
        to_email: to_email.to_string(),
        amount: coerce_number(amount),
    }
}

pub async fn execute_transfer(
    api: &dyn BankApi,
    token: &str,
    request: &TransferRequest,
) -> Result<(), ApiError> {
    match api.transfer(token, request).await {
        Ok(()) => {
            info!("Transfer of {} to {} accepted", request.amount, request.to_email);
            Ok(())
        }
        Err(e) => {
            warn!("Transfer to {} failed: {}", request.to_email, e);
            Err(e)
        }
    }
}
