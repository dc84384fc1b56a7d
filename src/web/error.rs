use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use strum_macros::AsRefStr;

use crate::{config::ConfigError, mailing_list, web::types::DataParsingError};

pub type WebResult<T> = core::result::Result<T, Error>;

#[derive(Debug, AsRefStr, thiserror::Error)]
pub enum Error {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("mailing list provider is not configured: {0}")]
    ProviderConfig(#[from] ConfigError),
    #[error("mailing list client error: {0}")]
    MailingList(#[from] mailing_list::Error),
}

impl Error {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        use ClientError::*;

        match self {
            Error::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, MethodNotAllowed),
            Error::DataParsing(_) => (StatusCode::BAD_REQUEST, InvalidEmail),
            Error::MailingList(mailing_list::Error::MemberExists) => {
                (StatusCode::BAD_REQUEST, AlreadySubscribed)
            }
            Error::MailingList(mailing_list::Error::Provider { .. }) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ProviderError)
            }
            // Misconfiguration is never described to the client.
            _ => (StatusCode::INTERNAL_SERVER_ERROR, ServiceError),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::debug!("{:<12} - into_response(Error: {self:?})", "INTO_RESP");

        // Construct a response
        let mut res = StatusCode::INTERNAL_SERVER_ERROR.into_response();

        // Insert the Error into response so that it can be retrieved later.
        res.extensions_mut().insert(Arc::new(self));

        res
    }
}

/// What the client gets to see, its `Display` is the message in the response body.
#[derive(Debug, Clone, PartialEq, Eq, AsRefStr, derive_more::Display)]
pub enum ClientError {
    #[display("E-mail inválido")]
    InvalidEmail,
    #[display("Method not allowed")]
    MethodNotAllowed,
    #[display("Este e-mail já está inscrito.")]
    AlreadySubscribed,
    #[display("Erro ao conectar com Mailchimp.")]
    ProviderError,
    #[display("Internal Server Error")]
    ServiceError,
}
