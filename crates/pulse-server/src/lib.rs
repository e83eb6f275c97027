// HTTP surface for report analysis and performance chat

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod service;
pub mod session;

pub use config::ServerConfig;
pub use error::{Error, Result};
pub use routes::router;
pub use server::PulseServer;
pub use service::{AnalysisRequest, AnalysisResponse, ChatRequest, PulseService, ReportDownload};
pub use session::{SESSION_HEADER, SessionKey, SessionStore};
