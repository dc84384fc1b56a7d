use reqwest::{Client, StatusCode};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use strum_macros::AsRefStr;

use crate::{config::ProviderSettings, web::types::ValidEmail};

/// Mailchimp reports an address that is already on the list with this title.
pub const MEMBER_EXISTS_TITLE: &str = "Member Exists";

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberStatus {
    Subscribed,
}

/// Adds members to a Mailchimp audience (list).
/// Holds a single `reqwest::Client` so connections get reused between requests.
#[derive(Debug, Clone, Default)]
pub struct MailingListClient {
    pub http_client: Client,
}

impl MailingListClient {
    pub fn new() -> Self {
        MailingListClient {
            http_client: Client::new(),
        }
    }

    /// Creates a `subscribed` member for `email` on the configured list.
    pub async fn add_member(&self, settings: &ProviderSettings, email: &ValidEmail) -> Result<()> {
        let url = members_url(settings)?;
        let member = NewMember {
            email_address: email.as_ref(),
            status: MemberStatus::Subscribed,
        };

        let resp = self
            .http_client
            .post(url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("apikey {}", settings.api_key.expose_secret()),
            )
            .json(&member)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        // The error body is informational, an unreadable one still means the provider refused.
        let body: ProviderErrorBody = resp.json().await.unwrap_or_default();
        tracing::error!(
            "{:<12} - Mailchimp error: {:?} {:?}",
            "ADD_MEMBER",
            body.title,
            body.detail
        );

        if body.title.as_deref() == Some(MEMBER_EXISTS_TITLE) {
            return Err(Error::MemberExists);
        }

        Err(Error::Provider {
            status,
            title: body.title,
            detail: body.detail,
        })
    }
}

fn members_url(settings: &ProviderSettings) -> Result<reqwest::Url> {
    let url = format!(
        "{}/3.0/lists/{}/members",
        settings.base_url, settings.list_id
    );
    reqwest::Url::parse(&url).map_err(|e| Error::UrlParsing(e.to_string()))
}

#[derive(Serialize)]
pub struct NewMember<'a> {
    pub email_address: &'a str,
    pub status: MemberStatus,
}

/// The part of Mailchimp's problem-details body we care about.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderErrorBody {
    pub title: Option<String>,
    pub detail: Option<String>,
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("url parsing error: {0}")]
    UrlParsing(String),
    #[error("the member is already on the list")]
    MemberExists,
    #[error("provider responded with {status}: {title:?} {detail:?}")]
    Provider {
        status: StatusCode,
        title: Option<String>,
        detail: Option<String>,
    },

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}
