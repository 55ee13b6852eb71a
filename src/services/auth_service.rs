use thiserror::Error;
use tracing::{error, info, warn};
use crate::api::BankApi;
use crate::api::bank::{ApiError, LoginRequest};
use crate::session::{Session, SessionContext, StoreError};

pub const LOGIN_OK: &str = "Login successful!";
pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Error)]
pub enum LoginError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Could not store session: {0}")]
    Store(#[from] StoreError),
}

impl LoginError {
    pub fn user_message(&self) -> String {
        match self {
            LoginError::Api(e) => e.user_message(LOGIN_FAILED),
            LoginError::Store(_) => LOGIN_FAILED.to_string(),
        }
    }
}

/// Exchange credentials for a session and persist it
///
/// Credentials are sent exactly as typed; nothing is stored unless the API
/// accepts them.
pub async fn login(
    api: &dyn BankApi,
    session: &SessionContext,
    email: &str,
    password: &str,
) -> Result<Session, LoginError> {
    let credentials = LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    };

    let response = api.login(&credentials).await.map_err(|e| {
        warn!("Login for {} rejected: {}", email, e);
        e
    })?;

    let new_session = Session {
        token: response.token,
        user_id: response.user_id,
    };

    session.save(&new_session).map_err(|e| {
        error!("Failed to persist session: {}", e);
        e
    })?;

    info!("Logged in as {}", email);
    Ok(new_session)
}

/// Drop the local session. No server-side invalidation exists.
pub fn logout(session: &SessionContext) -> Result<(), StoreError> {
    session.clear()
}
