//! The signup form controller.
//!
//! Holds the state of a single-field form (idle, submitting, success, error), validates the
//! email with the same rules as the relay before anything goes over the network and turns
//! the relay's answer into the message shown to the user.

mod client;

pub use client::{RelayClient, RelayErrorBody};

use std::future::Future;

use reqwest::StatusCode;
use strum_macros::AsRefStr;
use tracing::warn;

use crate::web::types::ValidEmail;

pub const INVALID_EMAIL_MSG: &str = "Por favor, insira um e-mail válido.";
pub const SUCCESS_MSG: &str = "Obrigado! Você foi inscrito com sucesso.";
pub const FALLBACK_ERROR_MSG: &str = "Ocorreu um erro. Tente novamente.";
pub const SUCCESS_HEADLINE: &str = "Inscrição Confirmada!";
pub const SUBMIT_LABEL: &str = "Inscrever-se agora";
pub const SUBMITTING_LABEL: &str = "Inscrevendo...";

// ###################################
// ->   STRUCTS
// ###################################
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, AsRefStr)]
pub enum FormStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

/// The network seam of the form: sends a validated email to the relay.
pub trait SubscribeApi {
    fn subscribe(&self, email: &ValidEmail) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Default)]
pub struct SubscribeForm {
    status: FormStatus,
    message: Option<String>,
    field_error: Option<&'static str>,
}

// ###################################
// ->   IMPLs
// ###################################
impl SubscribeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    /// The success confirmation or the error returned by the relay.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Inline validation message for the email field.
    pub fn field_error(&self) -> Option<&str> {
        self.field_error
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submit_disabled() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Validates `email` locally. On success moves to `Submitting` and hands back the email to
    /// send, otherwise sets the field error and leaves the status alone.
    pub fn begin_submit(&mut self, email: &str) -> Option<ValidEmail> {
        if self.is_submit_disabled() {
            return None;
        }

        match ValidEmail::parse(email.trim()) {
            Ok(email) => {
                self.field_error = None;
                self.status = FormStatus::Submitting;
                Some(email)
            }
            Err(_) => {
                self.field_error = Some(INVALID_EMAIL_MSG);
                None
            }
        }
    }

    /// Records the relay's answer for the submission started by `begin_submit`.
    pub fn finish_submit(&mut self, outcome: Result<()>) -> FormStatus {
        match outcome {
            Ok(()) => {
                self.status = FormStatus::Success;
                self.message = Some(SUCCESS_MSG.to_string());
            }
            Err(er) => {
                warn!("{:<12} - subscription failed: {er}", "FORM");
                self.status = FormStatus::Error;
                self.message = Some(er.client_message().unwrap_or(FALLBACK_ERROR_MSG).to_string());
            }
        }

        self.status
    }

    /// Validates and, when valid, submits `email` through `api`.
    pub async fn submit<A>(&mut self, api: &A, email: &str) -> FormStatus
    where
        A: SubscribeApi,
    {
        let Some(email) = self.begin_submit(email) else {
            return self.status;
        };

        let outcome = api.subscribe(&email).await;
        self.finish_submit(outcome)
    }
}

// ###################################
// ->   ERROR & RESULT
// ###################################
pub type Result<T> = core::result::Result<T, FormError>;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
    #[error("relay rejected the subscription with {status}: {message:?}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("invalid relay url: {0}")]
    UrlParsing(String),

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

impl FormError {
    /// The message the relay wants shown, if it sent a usable one.
    pub fn client_message(&self) -> Option<&str> {
        match self {
            FormError::Rejected {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }
}
