//! Data models shared by the views and the shell
//!
//! Wire types for the remote API live in `api::bank::models`; this module
//! holds the client-side state that never leaves the process.

pub mod notification;
pub mod route;

pub use notification::Toasts;
pub use route::Route;
