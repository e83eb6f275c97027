use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] pulse_core::Error),

    #[error(transparent)]
    Provider(#[from] pulse_providers::Error),

    #[error("No report available to download. Please analyze a website first.")]
    NoReport,

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Status relayed to the client for each failure kind
    pub fn status(&self) -> StatusCode {
        use pulse_core::Error as Core;
        use pulse_providers::Error as Provider;

        match self {
            Error::Core(Core::NoAnalysis) | Error::NoReport => StatusCode::BAD_REQUEST,
            Error::Core(Core::EmptyConversation) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Provider(Provider::Upstream { .. }) => StatusCode::BAD_REQUEST,
            Error::Provider(Provider::Request {
                status: Some(status),
                ..
            }) => StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
            Error::Provider(Provider::Request { status: None, .. }) => StatusCode::BAD_GATEWAY,
            Error::Provider(Provider::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            Error::Provider(Provider::Payload { .. }) => StatusCode::BAD_GATEWAY,
            Error::Provider(Provider::Configuration(_)) | Error::Server(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        } else {
            tracing::warn!("{}", self);
        }

        (status, Json(serde_json::json!({ "detail": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (Error::Core(pulse_core::Error::NoAnalysis), StatusCode::BAD_REQUEST),
            (Error::NoReport, StatusCode::BAD_REQUEST),
            (
                Error::Core(pulse_core::Error::InvalidReport("x".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                Error::Provider(pulse_providers::Error::Timeout { provider: "PageSpeed" }),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                Error::Provider(pulse_providers::Error::Request {
                    provider: "PageSpeed",
                    status: Some(429),
                    message: String::new(),
                }),
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                Error::Provider(pulse_providers::Error::Payload {
                    provider: "PageSpeed",
                    message: String::new(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (
                Error::Provider(pulse_providers::Error::Upstream {
                    provider: "PageSpeed",
                    message: String::new(),
                }),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.status(), expected, "{}", error);
        }
    }
}
