mod formatter;

pub use formatter::{EMPTY_DIGEST_TEXT, format_digest};

use serde::{Deserialize, Serialize};

/// Size-bounded summary of a full report. Built once per analyzed URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    /// Performance category score scaled to 0-100; rounded only when rendered
    pub overall_score: Option<f64>,
    pub core_metrics: Vec<CoreMetric>,
    pub opportunities: Vec<Opportunity>,
    pub diagnostics: Diagnostics,
}

impl Digest {
    pub fn is_empty(&self) -> bool {
        self.overall_score.is_none()
            && self.core_metrics.is_empty()
            && self.opportunities.is_empty()
            && self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreMetric {
    pub title: String,
    pub value: String,
}

/// An audit with measurable or itemized savings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opportunity {
    pub title: String,
    pub description: String,
    /// Audit display value, empty when the audit has none
    pub savings: String,
    /// Pre-rendered item lines
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub critical_chain_summary: Option<String>,
    pub resource_summary: Option<String>,
}

impl Diagnostics {
    pub fn is_empty(&self) -> bool {
        self.critical_chain_summary.is_none() && self.resource_summary.is_none()
    }
}
