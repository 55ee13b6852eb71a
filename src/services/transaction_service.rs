use tracing::warn;
use crate::api::BankApi;
use crate::api::bank::{ApiError, Transaction};
use crate::utils::format_number;

pub const FETCH_FAILED: &str = "Failed to fetch transactions";
pub const EMPTY_HISTORY: &str = "No transactions yet.";

/// Fetch the transaction history, kept in the order the API returns it
pub async fn get_transactions(api: &dyn BankApi, token: &str) -> Result<Vec<Transaction>, ApiError> {
    match api.transactions(token).await {
        Ok(transactions) => Ok(transactions),
        Err(e) => {
            warn!("Transaction fetch failed: {}", e);
            Err(e)
        }
    }
}

/// Date part of an ISO-8601 timestamp: everything before the first `T`
pub fn date_portion(date: &str) -> &str {
    date.split('T').next().unwrap_or(date)
}

pub fn format_transaction(tx: &Transaction) -> String {
    format!(
        "{}: {} → {} : ${}",
        date_portion(&tx.date),
        tx.from,
        tx.to,
        format_number(tx.amount)
    )
}

/// One line per transaction, or a placeholder when there are none
pub fn render_transactions(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return EMPTY_HISTORY.to_string();
    }

    transactions
        .iter()
        .map(|tx| format!("  • {}", format_transaction(tx)))
        .collect::<Vec<_>>()
        .join("\n")
}
