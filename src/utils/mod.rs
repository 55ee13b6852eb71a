pub mod encryption;
pub mod number;

pub use number::{coerce_number, format_number};
