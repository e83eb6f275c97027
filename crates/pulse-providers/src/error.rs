use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Transport failure or non-success status
    #[error("Error calling {provider} API: {message}")]
    Request {
        provider: &'static str,
        status: Option<u16>,
        message: String,
    },

    #[error("Timed out waiting for {provider} API")]
    Timeout { provider: &'static str },

    /// Successful response whose body is not what we expect
    #[error("Invalid response from {provider} API: {message}")]
    Payload {
        provider: &'static str,
        message: String,
    },

    /// Error reported by the provider in its own error payload
    #[error("{provider} API Error: {message}")]
    Upstream {
        provider: &'static str,
        message: String,
    },
}

impl Error {
    /// Classify a reqwest failure for the given provider
    pub(crate) fn transport(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Error::Timeout { provider }
        } else {
            Error::Request {
                provider,
                status: err.status().map(|s| s.as_u16()),
                message: format!("Network error: {}", err),
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
