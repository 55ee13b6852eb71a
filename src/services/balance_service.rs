use tracing::warn;
use crate::api::BankApi;
use crate::api::bank::ApiError;
use crate::utils::format_number;

pub const FETCH_FAILED: &str = "Failed to fetch balance";

/// Fetch the account balance for the session token
pub async fn get_balance(api: &dyn BankApi, token: &str) -> Result<f64, ApiError> {
    match api.balance(token).await {
        Ok(response) => Ok(response.balance),
        Err(e) => {
            warn!("Balance fetch failed: {}", e);
            Err(e)
        }
    }
}

pub fn render_balance(balance: f64) -> String {
    format!("Balance: ${}", format_number(balance))
}
