//! The request bodies the relay accepts and the validated types built from them.
//! `ValidEmail` is shared with the form controller so both sides agree on the grammar.

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

// ###################################
// ->   STRUCTS
// ###################################
/// Deserializable Subscription
/// A Subscription request as received, the email may still be invalid.
#[derive(Debug, Deserialize, Serialize)]
pub struct DeserSubscription {
    pub email: String,
}

impl DeserSubscription {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

/// Validated Subscription
#[derive(Debug, Clone)]
pub struct ValidSubscription {
    pub email: ValidEmail,
}

impl TryFrom<DeserSubscription> for ValidSubscription {
    type Error = DataParsingError;

    fn try_from(deser_sub: DeserSubscription) -> Result<Self, Self::Error> {
        Ok(ValidSubscription {
            email: ValidEmail::parse(deser_sub.email)?,
        })
    }
}

/// Validated Subscriber Email
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref();

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        if value.validate_email() {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email invalid")]
    EmailInvalid,
    #[error("email too long")]
    EmailTooLong,
    #[error("request body rejected: {0}")]
    BodyRejected(String),
}
