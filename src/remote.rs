//! HTTP client for the server-side basket.
//!
//! Mirrors the backend's mutation endpoints: every call is a same-origin
//! style POST carrying the CSRF token, answered with the server's
//! authoritative basket representation. This client never touches local
//! basket state; [`crate::sync::SyncedBasket`] composes the two.

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

/// Cookie the server issues for cross-site request forgery protection.
pub const CSRF_COOKIE: &str = "csrftoken";

const CSRF_HEADER: &str = "X-CSRFToken";

/// Error during a remote basket mutation.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Network-level failure; the mutation may or may not have been applied.
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server refused the mutation.
    #[error("Server rejected request ({status}): {message}")]
    Api { status: StatusCode, message: String },

    /// A 2xx response whose body is not a basket representation.
    #[error("Malformed server response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Server-confirmed basket representation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteBasket {
    pub total: f64,
    pub items: Vec<RemoteItem>,
}

/// One basket line as the server reports it. The server carries no display
/// metadata; names and prices stay client-side.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteItem {
    pub product_id: u32,
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error_msg: String,
}

/// Client for the basket mutation endpoints.
#[derive(Debug, Clone)]
pub struct BasketClient {
    base_url: String,
    csrf_token: String,
    client: Client,
}

impl BasketClient {
    /// The CSRF token is an explicit dependency; callers usually read it
    /// from the [`CSRF_COOKIE`] in their jar.
    pub fn new(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            csrf_token: csrf_token.into(),
            client: Client::new(),
        }
    }

    /// Add one unit of the product to the server-side basket.
    pub async fn add_product(&self, product_id: u32) -> Result<RemoteBasket, RemoteError> {
        self.mutate("add-product", product_id).await
    }

    /// Remove one unit of the product from the server-side basket.
    pub async fn remove_product(&self, product_id: u32) -> Result<RemoteBasket, RemoteError> {
        self.mutate("remove-product", product_id).await
    }

    /// Empty the server-side basket. The server answers with plain text,
    /// not a basket representation.
    pub async fn clear_basket(&self) -> Result<(), RemoteError> {
        let url = format!("{}/eboutic/basket/clear/", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api { status, message });
        }
        Ok(())
    }

    fn mutation_url(&self, operation: &str, product_id: u32) -> String {
        format!("{}/eboutic/basket/{operation}/{product_id}/", self.base_url)
    }

    /// No retry and no timeout beyond the transport defaults; failures
    /// propagate to the caller.
    async fn mutate(&self, operation: &str, product_id: u32) -> Result<RemoteBasket, RemoteError> {
        let url = self.mutation_url(operation, product_id);
        let response = self
            .client
            .post(&url)
            .header(CSRF_HEADER, &self.csrf_token)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error_msg)
                .unwrap_or(text);
            return Err(RemoteError::Api { status, message });
        }
        Ok(serde_json::from_str(&text)?)
    }
}
