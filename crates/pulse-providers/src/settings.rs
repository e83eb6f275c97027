use crate::{Error, Result};
use std::time::Duration;

pub const PAGESPEED_ENDPOINT: &str = "https://www.googleapis.com/pagespeedonline/v5/runPagespeed";
pub const GROQ_ENDPOINT: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "llama3-70b-8192";

/// Upper bound on a single PageSpeed run
pub const PAGESPEED_TIMEOUT: Duration = Duration::from_secs(60);

/// Credentials and endpoints for both providers.
///
/// Built once at startup; a missing key is a fatal configuration error rather
/// than something each request discovers.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    pub pagespeed_api_key: String,
    pub groq_api_key: String,
    pub model: String,
    pub pagespeed_endpoint: String,
    pub groq_endpoint: String,
    pub pagespeed_timeout: Duration,
}

impl ProviderSettings {
    /// Validate both secrets and apply defaults for everything else
    pub fn new(pagespeed_api_key: Option<String>, groq_api_key: Option<String>) -> Result<Self> {
        Ok(Self {
            pagespeed_api_key: require("PAGESPEED_API_KEY", pagespeed_api_key)?,
            groq_api_key: require("GROQ_API_KEY", groq_api_key)?,
            model: DEFAULT_MODEL.to_string(),
            pagespeed_endpoint: PAGESPEED_ENDPOINT.to_string(),
            groq_endpoint: GROQ_ENDPOINT.to_string(),
            pagespeed_timeout: PAGESPEED_TIMEOUT,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_pagespeed_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.pagespeed_endpoint = endpoint.into();
        self
    }

    pub fn with_groq_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.groq_endpoint = endpoint.into();
        self
    }

    pub fn with_pagespeed_timeout(mut self, timeout: Duration) -> Self {
        self.pagespeed_timeout = timeout;
        self
    }
}

fn require(name: &str, value: Option<String>) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Configuration(format!(
            "{} is not set; add it to the environment or .env",
            name
        ))),
    }
}
