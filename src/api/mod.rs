pub mod bank;

use async_trait::async_trait;
use bank::{ApiError, BalanceResponse, LoginRequest, LoginResponse, Transaction, TransferRequest};

/// The remote money-transfer API as seen by the views
///
/// Every call is a single request: no retry, no timeout beyond the transport's own.
#[async_trait]
pub trait BankApi: Send + Sync {
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError>;
    async fn balance(&self, token: &str) -> Result<BalanceResponse, ApiError>;
    async fn transactions(&self, token: &str) -> Result<Vec<Transaction>, ApiError>;
    async fn transfer(&self, token: &str, request: &TransferRequest) -> Result<(), ApiError>;
}
