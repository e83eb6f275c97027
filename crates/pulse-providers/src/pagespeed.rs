use crate::settings::ProviderSettings;
use crate::{Error, ReportProvider, Result};
use async_trait::async_trait;
use pulse_core::Strategy;
use pulse_core::report::{Node, RawReport};

const PROVIDER: &str = "PageSpeed";

/// Client for the PageSpeed Insights v5 `runPagespeed` endpoint
pub struct PageSpeedClient {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl PageSpeedClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.pagespeed_timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.pagespeed_api_key.clone(),
            endpoint: settings.pagespeed_endpoint.clone(),
        })
    }
}

#[async_trait]
impl ReportProvider for PageSpeedClient {
    async fn fetch_report(&self, url: &str, strategy: Strategy) -> Result<RawReport> {
        tracing::info!("Running PageSpeed analysis for {} ({})", url, strategy.as_str());

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("url", url),
                ("key", self.api_key.as_str()),
                ("strategy", strategy.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        if !status.is_success() {
            tracing::error!("PageSpeed returned {}", status);
            // PageSpeed explains most failures (bad URL, quota) in its own payload
            let message = serde_json::from_str::<RawReport>(&body)
                .ok()
                .and_then(|value| upstream_error(&value))
                .unwrap_or(body);
            return Err(Error::Request {
                provider: PROVIDER,
                status: Some(status.as_u16()),
                message,
            });
        }

        let report: RawReport = serde_json::from_str(&body).map_err(|e| Error::Payload {
            provider: PROVIDER,
            message: format!("response is not JSON: {}", e),
        })?;

        validate_response(report)
    }
}

/// Accept a decoded PageSpeed body only if it carries a Lighthouse result
pub fn validate_response(report: RawReport) -> Result<RawReport> {
    if let Some(message) = upstream_error(&report) {
        return Err(Error::Upstream {
            provider: PROVIDER,
            message,
        });
    }

    if report.get("lighthouseResult").is_none() {
        return Err(Error::Payload {
            provider: PROVIDER,
            message: "'lighthouseResult' not found".to_string(),
        });
    }

    Ok(report)
}

fn upstream_error(report: &RawReport) -> Option<String> {
    let error = Node::new(report).get("error");
    if !error.exists() {
        return None;
    }
    Some(error.str("message").unwrap_or("Unknown API error").to_string())
}
