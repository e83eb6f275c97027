use super::metrics::humanize_id;
use super::renderers::renderer_for;
use super::Extractor;
use crate::digest::{CoreMetric, Diagnostics, Digest, Opportunity};
use crate::report::{Node, RawReport};
use crate::{Error, Result};

/// Metrics included in the digest, in digest order
pub const CORE_METRIC_IDS: [&str; 6] = [
    "largest-contentful-paint",
    "total-blocking-time",
    "cumulative-layout-shift",
    "first-contentful-paint",
    "speed-index",
    "interactive",
];

const RESOURCE_TYPES: [&str; 5] = ["total", "script", "image", "font", "third-party"];

/// Builds the structured digest the language model works from
pub struct InsightExtractor {
    metric_ids: &'static [&'static str],
}

impl InsightExtractor {
    pub fn new(metric_ids: &'static [&'static str]) -> Self {
        Self { metric_ids }
    }
}

impl Default for InsightExtractor {
    fn default() -> Self {
        Self::new(&CORE_METRIC_IDS)
    }
}

impl Extractor for InsightExtractor {
    type Output = Digest;

    fn extract(&self, report: &RawReport) -> Result<Self::Output> {
        tracing::debug!("Extracting digest insights");

        if !report.is_object() {
            return Err(Error::InvalidReport(
                "Input data must be a JSON object".to_string(),
            ));
        }

        let lighthouse = Node::new(report).get("lighthouseResult");
        if lighthouse.as_object().is_none_or(|o| o.is_empty()) {
            tracing::warn!("Report has no lighthouseResult, digest will be empty");
            return Ok(Digest::default());
        }

        let categories = lighthouse.get("categories");
        if categories.as_object().is_none() {
            tracing::warn!("Report has no category tree, digest will be empty");
            return Ok(Digest::default());
        }

        let audits = lighthouse.get("audits");

        let digest = Digest {
            overall_score: categories.path(&["performance", "score"]).as_f64().map(|s| s * 100.0),
            core_metrics: self.core_metrics(audits),
            opportunities: opportunities(audits),
            diagnostics: Diagnostics {
                critical_chain_summary: critical_chain_summary(audits),
                resource_summary: resource_summary(audits),
            },
        };

        tracing::info!(
            "Digest extracted: {} metrics, {} opportunities",
            digest.core_metrics.len(),
            digest.opportunities.len()
        );

        Ok(digest)
    }
}

impl InsightExtractor {
    fn core_metrics(&self, audits: Node<'_>) -> Vec<CoreMetric> {
        self.metric_ids
            .iter()
            .filter_map(|id| {
                let audit = audits.get(id);
                audit.as_object().filter(|o| !o.is_empty())?;
                Some(CoreMetric {
                    title: audit
                        .str("title")
                        .map(str::to_string)
                        .unwrap_or_else(|| humanize_id(id)),
                    value: audit.str("displayValue").unwrap_or("N/A").to_string(),
                })
            })
            .collect()
    }
}

/// Opportunity audits in report order, not ranked by impact
fn opportunities(audits: Node<'_>) -> Vec<Opportunity> {
    audits
        .entries()
        .filter_map(|(id, audit)| {
            let details = audit.get("details");
            if details.str("type") != Some("opportunity") {
                return None;
            }

            let savings_ms = details.f64("overallSavingsMs").unwrap_or(0.0);
            if savings_ms <= 0.0 && !details.get("items").has_items() {
                return None;
            }

            let items = match renderer_for(id) {
                Some(render) => details.get("items").items().filter_map(render).collect(),
                None => Vec::new(),
            };

            Some(Opportunity {
                title: audit.str("title").unwrap_or(id).to_string(),
                description: audit.str("description").unwrap_or_default().to_string(),
                savings: audit.str("displayValue").unwrap_or_default().to_string(),
                items,
            })
        })
        .collect()
}

fn critical_chain_summary(audits: Node<'_>) -> Option<String> {
    let chain = audits.path(&["critical-request-chains", "details", "longestChain"]);
    if chain.as_object().is_none_or(|o| o.is_empty()) {
        return None;
    }

    let length = chain.get("length").display()?;
    let duration = chain.f64("duration")?;
    Some(format!(
        "Longest chain: {} requests, taking {:.0}ms.",
        length, duration
    ))
}

fn resource_summary(audits: Node<'_>) -> Option<String> {
    let items = audits.path(&["resource-summary", "details", "items"]);
    if !items.has_items() {
        return None;
    }

    let lines: Vec<String> = items
        .items()
        .filter(|item| {
            item.str("resourceType")
                .is_some_and(|t| RESOURCE_TYPES.contains(&t))
        })
        .map(|item| {
            let label = item
                .str("label")
                .or_else(|| item.str("resourceType"))
                .unwrap_or_default();
            let requests = item.get("requestCount").display().unwrap_or_else(|| "0".to_string());
            let size_kb = item.f64("transferSize").unwrap_or(0.0) / 1024.0;
            format!("  - {}: {} requests, {:.0} KB", label, requests, size_kb)
        })
        .collect();

    Some(lines.join("\n"))
}
