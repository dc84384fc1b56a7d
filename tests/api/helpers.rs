use std::{net::SocketAddr, sync::OnceLock};

use anyhow::Result;
use newsletter_signup::{
    config::{AppConfig, NetConfig, ProviderConfig},
    init_dbg_tracing, App,
};
use secrecy::SecretString;
use serde_json::Value;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key-us21";
pub const TEST_LIST_ID: &str = "a1b2c3d4e5";
pub const MEMBERS_PATH: &str = "/3.0/lists/a1b2c3d4e5/members";

pub struct TestApp {
    pub addr: SocketAddr,
    pub http_client: reqwest::Client,
    /// Stands in for Mailchimp.
    pub provider_server: MockServer,
}

/// Set `TEST_LOG` to see the app's logs while testing.
fn init_test_subscriber() {
    static SUBSCRIBER: OnceLock<()> = OnceLock::new();
    SUBSCRIBER.get_or_init(|| {
        if std::env::var("TEST_LOG").is_ok() {
            init_dbg_tracing();
        }
    });
}

/// Every provider value set, pointing at the mock provider.
pub fn full_provider_config(provider_uri: String) -> ProviderConfig {
    ProviderConfig {
        api_key: Some(SecretString::from(TEST_API_KEY.to_string())),
        list_id: Some(TEST_LIST_ID.to_string()),
        datacenter: Some("us21".to_string()),
        api_base_url: Some(provider_uri),
    }
}

impl TestApp {
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with(full_provider_config).await
    }

    /// Spawns the app on a random port, `provider_config` gets the mock provider's uri.
    pub async fn spawn_with<F>(provider_config: F) -> Result<Self>
    where
        F: FnOnce(String) -> ProviderConfig,
    {
        init_test_subscriber();

        let provider_server = MockServer::start().await;
        let config = AppConfig {
            // Trying to bind port 0 will trigger an OS scan for an available port
            net_config: NetConfig {
                host: [127, 0, 0, 1],
                app_port: 0,
            },
            provider_config: provider_config(provider_server.uri()),
        };

        let app = App::build_from_config(config).await?;
        let addr = app.local_addr()?;
        tokio::spawn(newsletter_signup::serve(app));

        Ok(TestApp {
            addr,
            http_client: reqwest::Client::new(),
            provider_server,
        })
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn post_subscribe(&self, body: &Value) -> Result<reqwest::Response> {
        let res = self
            .http_client
            .post(format!("{}/api/subscribe", self.url()))
            .json(body)
            .send()
            .await?;
        Ok(res)
    }
}
