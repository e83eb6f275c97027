use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to read report file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse report: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid report: {0}")]
    InvalidReport(String),

    #[error("Conversation must contain at least one message")]
    EmptyConversation,

    #[error("Please analyze a website first before starting a chat.")]
    NoAnalysis,
}

pub type Result<T> = std::result::Result<T, Error>;
