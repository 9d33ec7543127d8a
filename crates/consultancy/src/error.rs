use crate::assistant::AssistantError;
use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::content::ContentError;
use crate::storage::RepositoryError;
use crate::subscriptions::SubscriptionError;
use crate::telemetry::TelemetryError;
use crate::validation::ValidationErrors;
use crate::workflows::leads::LeadServiceError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::error;

static EXPOSE_INTERNAL_DETAILS: AtomicBool = AtomicBool::new(false);

/// Toggle whether 500 bodies carry the underlying message. Off by default;
/// the server turns it on in development.
pub fn expose_internal_details(enabled: bool) {
    EXPOSE_INTERNAL_DETAILS.store(enabled, Ordering::Relaxed);
}

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Validation(ValidationErrors),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    Unavailable(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Validation(err) => write!(f, "{}", err),
            AppError::Unauthorized(message)
            | AppError::Forbidden(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message)
            | AppError::Unavailable(message)
            | AppError::Internal(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Validation(errors) => json!({
                "error": "Validation failed",
                "details": errors.details,
            }),
            _ if status == StatusCode::INTERNAL_SERVER_ERROR => {
                error!(error = %self, "request failed");
                if EXPOSE_INTERNAL_DETAILS.load(Ordering::Relaxed) {
                    json!({ "error": self.to_string() })
                } else {
                    json!({ "error": "internal server error" })
                }
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::Validation(ValidationErrors::single("body", value.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::Validation(ValidationErrors::single("query", value.body_text()))
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => Self::NotFound("resource not found".to_string()),
            RepositoryError::Conflict(_) => Self::Conflict(value.to_string()),
            RepositoryError::Unavailable(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<LeadServiceError> for AppError {
    fn from(value: LeadServiceError) -> Self {
        match value {
            LeadServiceError::Validation(errors) => Self::Validation(errors),
            LeadServiceError::Repository(RepositoryError::NotFound) => {
                Self::NotFound("lead not found".to_string())
            }
            LeadServiceError::Repository(err) => err.into(),
            err @ LeadServiceError::StatusRegression { .. } => Self::Conflict(err.to_string()),
        }
    }
}

impl From<ContentError> for AppError {
    fn from(value: ContentError) -> Self {
        match value {
            ContentError::Validation(errors) => Self::Validation(errors),
            ContentError::DuplicateSlug(_) => Self::Conflict(value.to_string()),
            ContentError::Repository(RepositoryError::NotFound) => {
                Self::NotFound("content not found".to_string())
            }
            ContentError::Repository(err) => err.into(),
        }
    }
}

impl From<SubscriptionError> for AppError {
    fn from(value: SubscriptionError) -> Self {
        match value {
            SubscriptionError::Validation(errors) => Self::Validation(errors),
            SubscriptionError::AlreadySubscribed(_) => Self::Conflict(value.to_string()),
            SubscriptionError::NotSubscribed(_) => Self::NotFound(value.to_string()),
            SubscriptionError::Repository(err) => err.into(),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::InvalidCredentials
            | AuthError::MissingToken
            | AuthError::InvalidToken(_) => Self::Unauthorized(value.to_string()),
            AuthError::InsufficientRole { .. } => Self::Forbidden(value.to_string()),
            AuthError::Validation(errors) => Self::Validation(errors),
            AuthError::Repository(err) => err.into(),
            AuthError::Hashing(_) | AuthError::Signing(_) => Self::Internal(value.to_string()),
        }
    }
}

impl From<AssistantError> for AppError {
    fn from(value: AssistantError) -> Self {
        match value {
            AssistantError::Validation(errors) => Self::Validation(errors),
        }
    }
}
