mod insights;
mod metrics;
mod renderers;

pub use insights::{CORE_METRIC_IDS, InsightExtractor};
pub use metrics::{DISPLAY_METRIC_IDS, MetricExtractor, humanize_id};
pub use renderers::{ItemRenderer, renderer_for};

use crate::digest::{Digest, format_digest};
use crate::report::{Node, RawReport};
use serde::{Deserialize, Serialize};

/// A metric ready for immediate display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMetric {
    pub title: String,
    pub value: String,
}

/// Everything derived from one report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportAnalysis {
    pub performance_score: u8,
    pub metrics: Vec<DisplayMetric>,
    pub digest: Digest,
    pub digest_text: String,
}

pub trait Extractor {
    type Output;

    fn extract(&self, report: &RawReport) -> crate::Result<Self::Output>;
}

/// Performance category score scaled to 0-100, rounded; 0 when absent
pub fn performance_score(report: &RawReport) -> u8 {
    Node::new(report)
        .path(&["lighthouseResult", "categories", "performance", "score"])
        .as_f64()
        .map(|score| (score * 100.0).round().clamp(0.0, 100.0) as u8)
        .unwrap_or(0)
}

/// Run every extractor over a report and render the digest text for `url`
pub fn analyze_report(report: &RawReport, url: &str) -> crate::Result<ReportAnalysis> {
    tracing::debug!("Analyzing report for {}", url);

    let digest = InsightExtractor::default().extract(report)?;
    let metrics = MetricExtractor.extract(report)?;
    let digest_text = format_digest(&digest, url);
    let performance_score = performance_score(report);

    tracing::info!(
        "Report analysis complete: score={}, {} opportunities",
        performance_score,
        digest.opportunities.len()
    );

    Ok(ReportAnalysis {
        performance_score,
        metrics,
        digest,
        digest_text,
    })
}
