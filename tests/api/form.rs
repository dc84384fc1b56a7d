//! The form controller driving a running relay.

use anyhow::Result;
use newsletter_signup::{
    config::ProviderConfig,
    form::{FormStatus, RelayClient, SubscribeForm, FALLBACK_ERROR_MSG, SUCCESS_MSG},
};
use serde_json::json;
use wiremock::{
    matchers::{any, method, path},
    Mock, ResponseTemplate,
};

use crate::helpers::{full_provider_config, TestApp, MEMBERS_PATH};

#[tokio::test]
async fn form_subscribes_through_the_relay() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(MEMBERS_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let client = RelayClient::new(app.url())?;
    let mut form = SubscribeForm::new();

    let status = form.submit(&client, "  user@example.com ").await;

    assert_eq!(FormStatus::Success, status);
    assert_eq!(Some(SUCCESS_MSG), form.message());

    Ok(())
}

#[tokio::test]
async fn form_shows_the_relay_error_message() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(path(MEMBERS_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "title": "Member Exists", "status": 400 })),
        )
        .expect(1)
        .mount(&app.provider_server)
        .await;

    let client = RelayClient::new(app.url())?;
    let mut form = SubscribeForm::new();

    let status = form.submit(&client, "user@example.com").await;

    assert_eq!(FormStatus::Error, status);
    assert_eq!(Some("Este e-mail já está inscrito."), form.message());
    assert!(!form.is_submit_disabled());

    Ok(())
}

#[tokio::test]
async fn form_shows_the_generic_error_when_relay_is_misconfigured() -> Result<()> {
    let app = TestApp::spawn_with(|uri| ProviderConfig {
        list_id: None,
        ..full_provider_config(uri)
    })
    .await?;

    let client = RelayClient::new(app.url())?;
    let mut form = SubscribeForm::new();

    let status = form.submit(&client, "user@example.com").await;

    assert_eq!(FormStatus::Error, status);
    assert_eq!(Some("Internal Server Error"), form.message());

    Ok(())
}

#[tokio::test]
async fn form_falls_back_when_relay_is_unreachable() -> Result<()> {
    // Nothing listens on the discard port.
    let client = RelayClient::new("http://127.0.0.1:9")?;
    let mut form = SubscribeForm::new();

    let status = form.submit(&client, "user@example.com").await;

    assert_eq!(FormStatus::Error, status);
    assert_eq!(Some(FALLBACK_ERROR_MSG), form.message());

    Ok(())
}

#[tokio::test]
async fn form_never_calls_the_relay_for_invalid_emails() -> Result<()> {
    let app = TestApp::spawn().await?;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.provider_server)
        .await;

    let client = RelayClient::new(app.url())?;
    let mut form = SubscribeForm::new();

    let status = form.submit(&client, "not-an-email").await;

    assert_eq!(FormStatus::Idle, status);
    assert!(form.field_error().is_some());

    Ok(())
}
