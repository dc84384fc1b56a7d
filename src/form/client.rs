use reqwest::{Client, Url};
use serde::Deserialize;

use super::{FormError, Result, SubscribeApi};
use crate::web::types::{DeserSubscription, ValidEmail};

const SUBSCRIBE_PATH: &str = "api/subscribe";

/// Talks to the relay's subscribe endpoint over HTTP.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http_client: Client,
    subscribe_url: Url,
}

impl RelayClient {
    /// `base_url` is where the relay is served from, e.g. `http://127.0.0.1:8080` or
    /// `https://example.com/newsletter`. A path prefix is kept.
    pub fn new<S: AsRef<str>>(base_url: S) -> Result<Self> {
        let base_url = base_url.as_ref();
        let base_url = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let subscribe_url = Url::parse(&base_url)
            .and_then(|url| url.join(SUBSCRIBE_PATH))
            .map_err(|e| FormError::UrlParsing(e.to_string()))?;

        Ok(RelayClient {
            http_client: Client::new(),
            subscribe_url,
        })
    }

    pub fn subscribe_url(&self) -> &Url {
        &self.subscribe_url
    }
}

impl SubscribeApi for RelayClient {
    async fn subscribe(&self, email: &ValidEmail) -> Result<()> {
        let resp = self
            .http_client
            .post(self.subscribe_url.clone())
            .json(&DeserSubscription::new(email.as_ref()))
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body: RelayErrorBody = resp.json().await.unwrap_or_default();
        Err(FormError::Rejected {
            status,
            message: body.error,
        })
    }
}

/// Error body the relay answers with: `{"error": "..."}`.
#[derive(Debug, Default, Deserialize)]
pub struct RelayErrorBody {
    pub error: Option<String>,
}
