// Outbound collaborators: the performance report provider and the language model

mod error;
mod groq;
pub mod mock;
mod pagespeed;
mod settings;
mod sse;
mod stream;

pub use error::{Error, Result};
pub use groq::GroqClient;
pub use pagespeed::{PageSpeedClient, validate_response};
pub use settings::{DEFAULT_MODEL, GROQ_ENDPOINT, PAGESPEED_ENDPOINT, ProviderSettings};
pub use sse::{SseDecoder, SseEvent};
pub use stream::{ChunkSender, ChunkStream};

use async_trait::async_trait;
use pulse_core::Strategy;
use pulse_core::conversation::Prompt;
use pulse_core::report::RawReport;

/// Source of raw Lighthouse reports
#[async_trait]
pub trait ReportProvider: Send + Sync {
    async fn fetch_report(&self, url: &str, strategy: Strategy) -> Result<RawReport>;
}

/// Hosted language model
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Wait for the whole answer
    async fn complete(&self, prompt: &Prompt) -> Result<String>;

    /// Answer as a stream of text increments
    async fn stream(&self, prompt: &Prompt) -> Result<ChunkStream>;
}
