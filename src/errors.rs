use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

/// Domain-specific error types for the VIX teaching service.
/// The calculator itself never fails. Errors come from:
/// - parameter writes rejected by the store's range policy
/// - lookups of unknown fields, presets or panels
/// - request bodies, paths or query strings that fail to deserialize
/// - startup configuration and the session channel
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unknown parameter field: {0}")]
    UnknownField(String),

    #[error("unknown preset: {0}")]
    UnknownPreset(String),

    #[error("unknown panel: {0}")]
    UnknownPanel(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("channel closed: {0}")]
    ChannelClosed(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl AppError {
    /// Stable machine-readable code sent to dashboard clients.
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "out_of_range",
            Self::InvalidInput(_) => "invalid_input",
            Self::UnknownField(_) => "unknown_field",
            Self::UnknownPreset(_) => "unknown_preset",
            Self::UnknownPanel(_) => "unknown_panel",
            Self::Config(_) => "config",
            Self::ChannelClosed(_) => "session_unavailable",
            Self::Parse(_) => "parse",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::OutOfRange { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InvalidInput(_) | Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::UnknownField(_) | Self::UnknownPreset(_) | Self::UnknownPanel(_) => {
                StatusCode::NOT_FOUND
            }
            Self::ChannelClosed(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }
        let body = serde_json::json!({
            "error": {
                "code": self.code(),
                "message": self.to_string(),
            }
        });
        (status, Json(body)).into_response()
    }
}

// Extractor rejections carry axum's plain-text body; re-wrap them so every
// failed request answers with the JSON envelope.

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        AppError::Parse(e.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(e: QueryRejection) -> Self {
        AppError::Parse(e.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(e: PathRejection) -> Self {
        AppError::Parse(e.body_text())
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for AppError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        AppError::ChannelClosed("session command channel".into())
    }
}

impl From<tokio::sync::oneshot::error::RecvError> for AppError {
    fn from(_: tokio::sync::oneshot::error::RecvError) -> Self {
        AppError::ChannelClosed("session reply dropped".into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
