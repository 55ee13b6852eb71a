//! Session store errors.

use thiserror::Error;

use crate::utils::encryption::CryptoError;

/// Errors that can occur while reading or writing the session store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O error on the backing file
    #[error("Session file error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialisation error
    #[error("Session file is not valid JSON: {0}")]
    Serialisation(#[from] serde_json::Error),

    /// A stored value could not be sealed or opened
    #[error("Session value could not be decrypted: {0}")]
    Crypto(#[from] CryptoError),
}
