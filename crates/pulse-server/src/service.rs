//! Request handling independent of the HTTP layer.

use crate::session::{SessionKey, SessionStore};
use crate::{Error, Result};
use pulse_core::Strategy;
use pulse_core::analysis::{DisplayMetric, analyze_report};
use pulse_core::conversation::{ChatTurn, Prompt};
use pulse_core::report::{REPORT_FILENAME, ReportWriter};
use pulse_providers::{ChunkStream, GroqClient, LanguageModel, PageSpeedClient, ProviderSettings, ReportProvider};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    #[serde(default)]
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub performance_score: u8,
    pub metrics: Vec<DisplayMetric>,
    pub initial_suggestion: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    pub history: Vec<ChatTurn>,
}

/// Serialized report ready to be sent as an attachment
#[derive(Debug, Clone)]
pub struct ReportDownload {
    pub filename: &'static str,
    pub body: String,
}

/// Ties the report provider, the language model and the session store
/// together
#[derive(Clone)]
pub struct PulseService {
    reports: Arc<dyn ReportProvider>,
    model: Arc<dyn LanguageModel>,
    sessions: SessionStore,
}

impl PulseService {
    pub fn new(reports: Arc<dyn ReportProvider>, model: Arc<dyn LanguageModel>) -> Self {
        Self {
            reports,
            model,
            sessions: SessionStore::new(),
        }
    }

    /// Service backed by PageSpeed Insights and Groq
    pub fn from_settings(settings: &ProviderSettings) -> Result<Self> {
        let reports = PageSpeedClient::new(settings)?;
        let model = GroqClient::new(settings)?;
        Ok(Self::new(Arc::new(reports), Arc::new(model)))
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Fetch, digest and summarize a page. The session is only updated once
    /// every step has succeeded.
    pub async fn analyze(&self, key: &SessionKey, request: &AnalysisRequest) -> Result<AnalysisResponse> {
        tracing::info!("Analyzing {} ({})", request.url, request.strategy.as_str());

        let report = self.reports.fetch_report(&request.url, request.strategy).await?;
        let analysis = analyze_report(&report, &request.url)?;

        let prompt = Prompt::initial_suggestion(&analysis.digest_text)?;
        let initial_suggestion = self.model.complete(&prompt).await?;

        self.sessions
            .record_analysis(key, request.url.clone(), report, analysis.digest_text)
            .await;

        Ok(AnalysisResponse {
            performance_score: analysis.performance_score,
            metrics: analysis.metrics,
            initial_suggestion,
        })
    }

    /// Stream an answer to the last turn, grounded on the session's digest
    pub async fn chat(&self, key: &SessionKey, turns: &[ChatTurn]) -> Result<ChunkStream> {
        let digest = self
            .sessions
            .current_digest(key)
            .await
            .ok_or(Error::Core(pulse_core::Error::NoAnalysis))?;

        let prompt = Prompt::chat(turns, &digest)?;
        tracing::debug!("Streaming chat answer for session {}", key);

        Ok(self.model.stream(&prompt).await?)
    }

    /// The session's raw report, serialized as pretty JSON
    pub async fn download(&self, key: &SessionKey) -> Result<ReportDownload> {
        let snapshot = self.sessions.current_report(key).await.ok_or(Error::NoReport)?;
        let body = ReportWriter::to_string(&snapshot.report)?;

        Ok(ReportDownload {
            filename: REPORT_FILENAME,
            body,
        })
    }
}
