pub mod analysis;
pub mod conversation;
pub mod digest;
pub mod error;
pub mod report;

pub use error::{Error, Result};

/// PageSpeed analysis strategy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Mobile,
    #[default]
    Desktop,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Mobile => "mobile",
            Strategy::Desktop => "desktop",
        }
    }
}
