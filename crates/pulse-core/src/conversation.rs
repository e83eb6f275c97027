//! Prompt assembly for the one-shot suggestion and the streamed chat.
//!
//! The system instruction asks the model to wrap its whole reply in a fenced
//! markdown block. That is a prompt-level contract only: nothing here checks
//! or strips the fence, model output is passed through as produced.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT_TEMPLATE: &str = r#"
You are an expert frontend performance analyst. Your name is "Pulse".
Your task is to analyze the provided Lighthouse report summary and answer the user's questions strictly based on it.
You are not allowed to answer queries unrelated to the provided website report.

All responses must be formatted **strictly** in Markdown and enclosed **within triple backticks (```markdown)**. Do not include anything before or after the markdown block.

Here is the Lighthouse report summary for the website being discussed:
{report_summary}
"#;

pub const INITIAL_SUGGESTION_QUERY: &str = "Based on the Lighthouse report summary, provide a brief, high-level overview \
of the website's performance. Start with a friendly greeting and highlight \
key areas for improvement in a concise, encouraging tone. Keep the entire response to less than 10 sentences.";

/// Role of a turn sent by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of an incoming conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Role in the model's chat-completion message list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Message in the shape chat-completion APIs accept
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl From<&ChatTurn> for Message {
    fn from(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            ChatRole::User => MessageRole::User,
            ChatRole::Assistant => MessageRole::Assistant,
        };
        Self {
            role,
            content: turn.content.clone(),
        }
    }
}

/// Fully assembled model input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// System instruction with the digest text substituted in
    pub system: String,
    /// Prior turns, oldest first
    pub history: Vec<Message>,
    pub query: String,
}

impl Prompt {
    /// Single-shot overview request with no history
    pub fn initial_suggestion(digest_text: &str) -> Result<Self> {
        Ok(Self {
            system: system_prompt(digest_text)?,
            history: Vec::new(),
            query: INITIAL_SUGGESTION_QUERY.to_string(),
        })
    }

    /// Chat request: the last turn is the new query, everything before it is
    /// history
    pub fn chat(turns: &[ChatTurn], digest_text: &str) -> Result<Self> {
        let system = system_prompt(digest_text)?;
        let (last, earlier) = turns.split_last().ok_or(Error::EmptyConversation)?;

        tracing::debug!("Assembled chat prompt with {} history messages", earlier.len());

        Ok(Self {
            system,
            history: earlier.iter().map(Message::from).collect(),
            query: last.content.clone(),
        })
    }

    /// System message, history, then the query as a user message
    pub fn messages(&self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(self.history.len() + 2);
        messages.push(Message {
            role: MessageRole::System,
            content: self.system.clone(),
        });
        messages.extend(self.history.iter().cloned());
        messages.push(Message {
            role: MessageRole::User,
            content: self.query.clone(),
        });
        messages
    }
}

fn system_prompt(digest_text: &str) -> Result<String> {
    if digest_text.trim().is_empty() {
        return Err(Error::NoAnalysis);
    }
    Ok(SYSTEM_PROMPT_TEMPLATE.replace("{report_summary}", digest_text))
}
