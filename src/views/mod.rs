//! The two screens of the client
//!
//! Views own their form state and turn API results into notifications and
//! navigation; they never print anything themselves.

pub mod dashboard;
pub mod login;

pub use dashboard::{DashboardView, Mount};
pub use login::LoginView;
