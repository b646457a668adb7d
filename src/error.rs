use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::error;

use crate::mailer::DispatchError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Malformed payload")]
    MalformedPayload,

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for field: {0}")]
    InvalidFormat(&'static str),

    #[error("Field '{field}' exceeds the limit of {limit} characters")]
    FieldTooLong { field: &'static str, limit: usize },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Mail service configuration missing (RESEND_API_KEY)")]
    ConfigMissing,

    #[error("Failed to send email")]
    ProviderFailure(Value),

    #[error("Mail service unreachable")]
    TransportFailure(#[source] reqwest::Error),
}

impl From<DispatchError> for AppError {
    fn from(e: DispatchError) -> Self {
        match e {
            DispatchError::Provider { details, .. } => AppError::ProviderFailure(details),
            DispatchError::Transport(e) => AppError::TransportFailure(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MalformedPayload
            | AppError::MissingField(_)
            | AppError::InvalidFormat(_)
            | AppError::FieldTooLong { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::ConfigMissing
            | AppError::ProviderFailure(_)
            | AppError::TransportFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Provider and transport detail is logged here in full; callers only
        // ever see the generic message plus the provider's response body.
        let body = match &self {
            AppError::ProviderFailure(details) => {
                error!(details = %details, "Mail provider rejected the message");
                json!({ "error": self.to_string(), "details": details })
            }
            AppError::TransportFailure(e) => {
                error!("Mail provider unreachable: {e}");
                json!({ "error": self.to_string() })
            }
            AppError::ConfigMissing => {
                error!("{self}");
                json!({ "error": self.to_string() })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
