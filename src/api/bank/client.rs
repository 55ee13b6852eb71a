use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use super::models::{
    ApiError, BalanceResponse, LoginRequest, LoginResponse, Transaction, TransferRequest,
};
use crate::api::BankApi;
use tracing::{debug, warn};

/// HTTP client for the money-transfer API
pub struct BankClient {
    http_client: HttpClient,
    base_url: String,
}

impl BankClient {
    /// Create a new client against the given base URL
    pub fn new(base_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Create default headers, with the raw session token when given
    fn create_headers(token: Option<&str>) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(token) = token {
            // Sent as-is, no scheme prefix
            let auth_value = HeaderValue::from_str(token)
                .map_err(|e| ApiError::RequestError(format!("Failed to create auth header: {}", e)))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Turn a non-success response into an `ApiError`
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let body_text = response.text().await.unwrap_or_default();

        if status >= 500 {
            warn!("Server error {}: {}", status, body_text);
        } else {
            debug!("Request rejected with status {}", status);
        }

        ApiError::from_status(status, &body_text)
    }

    /// Send a prepared request, mapping transport failures and error statuses
    async fn dispatch(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        Ok(response)
    }
}

#[async_trait]
impl BankApi for BankClient {
    /// POST /login
    ///
    /// Exchanges credentials for a session token and user id. Credentials are
    /// sent exactly as typed.
    async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, ApiError> {
        debug!("POST /login for {}", credentials.email);
        let request = self.http_client
            .post(self.url("/login"))
            .headers(Self::create_headers(None)?)
            .json(credentials);

        self.dispatch(request)
            .await?
            .json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /balance
    async fn balance(&self, token: &str) -> Result<BalanceResponse, ApiError> {
        debug!("GET /balance");
        let request = self.http_client
            .get(self.url("/balance"))
            .headers(Self::create_headers(Some(token))?);

        self.dispatch(request)
            .await?
            .json::<BalanceResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// GET /transactions
    async fn transactions(&self, token: &str) -> Result<Vec<Transaction>, ApiError> {
        debug!("GET /transactions");
        let request = self.http_client
            .get(self.url("/transactions"))
            .headers(Self::create_headers(Some(token))?);

        self.dispatch(request)
            .await?
            .json::<Vec<Transaction>>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }

    /// POST /transfer
    ///
    /// Any 2xx counts as success; the body is not inspected.
    async fn transfer(&self, token: &str, request: &TransferRequest) -> Result<(), ApiError> {
        debug!("POST /transfer to {}", request.to_email);
        let request = self.http_client
            .post(self.url("/transfer"))
            .headers(Self::create_headers(Some(token))?)
            .json(request);

        self.dispatch(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = BankClient::new("http://localhost:5000/".to_string());
        assert_eq!(client.url("/balance"), "http://localhost:5000/balance");
    }

    #[test]
    fn test_token_is_sent_without_scheme() {
        let headers = BankClient::create_headers(Some("abc.def")).unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "abc.def");

        let headers = BankClient::create_headers(None).unwrap();
        assert!(headers.get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unprintable_token_is_rejected() {
        let err = BankClient::create_headers(Some("bad\ntoken")).unwrap_err();
        assert!(matches!(err, ApiError::RequestError(_)));
    }
}
