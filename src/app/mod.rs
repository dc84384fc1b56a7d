pub mod serve;

// re-export
pub use serve::{router, serve};

use std::{net::SocketAddr, sync::Arc};

use derive_more::Deref;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    config::{AppConfig, ProviderConfig},
    MailingListClient, Result,
};

// ###################################
// ->  Structs
// ###################################
pub struct App {
    pub app_state: AppState,
    pub listener: TcpListener,
}
impl App {
    pub fn new(app_state: AppState, listener: TcpListener) -> Self {
        App {
            app_state,
            listener,
        }
    }

    pub async fn build_from_config(config: AppConfig) -> Result<Self> {
        // Missing provider values are not fatal here, every request reports them on its own.
        if let Err(er) = config.provider_config.resolve() {
            tracing::warn!("{:<20} - {er}", "Provider config:");
        }

        let app_state = AppState::new(MailingListClient::new(), config.provider_config);

        let addr = SocketAddr::from((config.net_config.host, config.net_config.app_port));
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        info!("{:<20} - {}", "Listening on:", addr);

        let app = App::new(app_state, listener);
        Ok(app)
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }
}

pub struct InternalState {
    pub mailing_list_client: MailingListClient,
    pub provider_config: ProviderConfig,
}

/// Application state containing all global data.
/// It implements `Deref` to easily access the fields on `InternalState`
/// Uses an `Arc` so it can be cloned around.
#[derive(Clone, Deref)]
pub struct AppState(Arc<InternalState>);

impl AppState {
    pub fn new(mailing_list_client: MailingListClient, provider_config: ProviderConfig) -> Self {
        AppState(Arc::new(InternalState {
            mailing_list_client,
            provider_config,
        }))
    }
}
