use crate::settings::ProviderSettings;
use crate::sse::{SseDecoder, SseEvent};
use crate::stream::{ChunkSender, ChunkStream};
use crate::{Error, LanguageModel, Result};
use async_trait::async_trait;
use futures::StreamExt;
use pulse_core::conversation::{Message, Prompt};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "Groq";

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq chat-completions client (OpenAI-compatible wire format)
#[derive(Clone)]
pub struct GroqClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GroqClient {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        // No overall timeout: a streamed answer is bounded by chunk arrival
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: settings.groq_api_key.clone(),
            model: settings.model.clone(),
            endpoint: settings.groq_endpoint.clone(),
        })
    }

    async fn send(&self, prompt: &Prompt, stream: bool) -> Result<reqwest::Response> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: prompt.messages(),
            stream,
        };

        tracing::debug!(
            "Sending {} messages to {} (stream={})",
            request.messages.len(),
            self.model,
            stream
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Groq returned {}: {}", status, message);
            return Err(Error::Request {
                provider: PROVIDER,
                status: Some(status.as_u16()),
                message,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl LanguageModel for GroqClient {
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let response = self.send(prompt, false).await?;

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| Error::Payload {
            provider: PROVIDER,
            message: format!("could not decode completion: {}", e),
        })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| Error::Payload {
                provider: PROVIDER,
                message: "completion contained no choices".to_string(),
            })
    }

    async fn stream(&self, prompt: &Prompt) -> Result<ChunkStream> {
        let response = self.send(prompt, true).await?;
        let (sender, stream) = ChunkStream::channel();

        tokio::spawn(pump(response, sender));

        Ok(stream)
    }
}

/// Forward decoded deltas until the model finishes, fails, or the consumer
/// hangs up. Returning drops the upstream response.
async fn pump(response: reqwest::Response, sender: ChunkSender) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();
    let mut forwarded = 0usize;

    while let Some(chunk) = body.next().await {
        let bytes = match chunk {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::error!("Stream from Groq broke after {} chunks: {}", forwarded, e);
                sender.fail(Error::transport(PROVIDER, e)).await;
                return;
            }
        };

        for event in decoder.push(&bytes) {
            match event {
                SseEvent::Delta(text) => {
                    if !sender.send(text).await {
                        tracing::debug!("Chat client disconnected, stopping stream");
                        return;
                    }
                    forwarded += 1;
                }
                SseEvent::Error(message) => {
                    sender
                        .fail(Error::Upstream {
                            provider: PROVIDER,
                            message,
                        })
                        .await;
                    return;
                }
                SseEvent::Done => {
                    tracing::debug!("Stream complete after {} chunks", forwarded);
                    return;
                }
            }
        }
    }
}
