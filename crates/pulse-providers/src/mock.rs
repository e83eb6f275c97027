//! In-memory providers for tests and offline runs

use crate::{ChunkStream, Error, LanguageModel, ReportProvider, Result};
use async_trait::async_trait;
use pulse_core::Strategy;
use pulse_core::conversation::Prompt;
use pulse_core::report::RawReport;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Serves canned reports keyed by URL
#[derive(Clone, Default)]
pub struct StaticReportProvider {
    reports: HashMap<String, RawReport>,
    requests: Arc<Mutex<Vec<(String, Strategy)>>>,
}

impl StaticReportProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_report(mut self, url: impl Into<String>, report: RawReport) -> Self {
        self.reports.insert(url.into(), report);
        self
    }

    /// Every `(url, strategy)` fetched so far
    pub async fn requests(&self) -> Vec<(String, Strategy)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl ReportProvider for StaticReportProvider {
    async fn fetch_report(&self, url: &str, strategy: Strategy) -> Result<RawReport> {
        self.requests.lock().await.push((url.to_string(), strategy));

        self.reports
            .get(url)
            .cloned()
            .ok_or_else(|| Error::Upstream {
                provider: "PageSpeed",
                message: format!("No report for {}", url),
            })
    }
}

/// Returns a fixed completion and a fixed chunk sequence, recording every
/// prompt it is given
#[derive(Clone)]
pub struct ScriptedLanguageModel {
    completion: String,
    chunks: Vec<String>,
    prompts: Arc<Mutex<Vec<Prompt>>>,
    fail: bool,
}

impl ScriptedLanguageModel {
    pub fn new(completion: impl Into<String>, chunks: Vec<String>) -> Self {
        Self {
            completion: completion.into(),
            chunks,
            prompts: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A model whose every call fails with a request error
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new("", Vec::new())
        }
    }

    pub async fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }

    async fn record(&self, prompt: &Prompt) -> Result<()> {
        self.prompts.lock().await.push(prompt.clone());
        if self.fail {
            return Err(Error::Request {
                provider: "Groq",
                status: Some(503),
                message: "model unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LanguageModel for ScriptedLanguageModel {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        self.record(prompt).await?;
        Ok(self.completion.clone())
    }

    async fn stream(&self, prompt: &Prompt) -> Result<ChunkStream> {
        self.record(prompt).await?;
        Ok(ChunkStream::from_chunks(self.chunks.clone()))
    }
}
