use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{field, info, Span};

use crate::{
    web::{
        types::{DataParsingError, DeserSubscription, ValidSubscription},
        Error, WebResult,
    },
    AppState,
};

pub const SUBSCRIBE_SUCCESS_MSG: &str = "Success! Please check your email.";

/// Validates the email, then adds it to the configured Mailchimp list.
/// The order matters: an invalid email is rejected even when the provider isn't configured.
#[tracing::instrument(
    name = "Relaying a new subscription",
    skip(app_state, payload),
    fields(subscriber_email = field::Empty)
)]
pub async fn subscribe(
    State(app_state): State<AppState>,
    payload: Result<Json<DeserSubscription>, JsonRejection>,
) -> WebResult<(StatusCode, Json<Value>)> {
    let Json(subscription) =
        payload.map_err(|rejection| DataParsingError::BodyRejected(rejection.body_text()))?;
    Span::current().record("subscriber_email", field::display(&subscription.email));

    let subscription = ValidSubscription::try_from(subscription)?;

    let settings = app_state.provider_config.resolve()?;
    app_state
        .mailing_list_client
        .add_member(&settings, &subscription.email)
        .await?;

    info!("SUCCESS");
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": SUBSCRIBE_SUCCESS_MSG })),
    ))
}

/// Every method other than POST on the subscribe route.
pub async fn method_not_allowed() -> WebResult<()> {
    Err(Error::MethodNotAllowed)
}
