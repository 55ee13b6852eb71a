pub mod auth_service;
pub mod balance_service;
pub mod transaction_service;
pub mod transfer_service;
