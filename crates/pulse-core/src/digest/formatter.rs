//! Renders a [`Digest`] into the text block handed to the language model.
//!
//! The layout below is what the chat prompt is tuned against; changing any
//! heading or line shape changes answer quality and should be treated as a
//! breaking change.

use super::Digest;

pub const EMPTY_DIGEST_TEXT: &str = "No performance data could be extracted.";

pub fn format_digest(digest: &Digest, url: &str) -> String {
    if digest.is_empty() {
        return EMPTY_DIGEST_TEXT.to_string();
    }

    let mut lines = vec![format!("--- Performance Summary Report for URL: {} ---", url)];

    if let Some(score) = digest.overall_score {
        lines.push(format!("Overall Score: {:.0}/100", score));
    }

    lines.push(String::new());
    lines.push("--- Core Metrics ---".to_string());
    for metric in &digest.core_metrics {
        lines.push(format!("- {}: {}", metric.title, metric.value));
    }

    lines.push(String::new());
    lines.push("--- Top Opportunities for Improvement ---".to_string());
    if digest.opportunities.is_empty() {
        lines.push("No significant opportunities were identified.".to_string());
    } else {
        for opportunity in &digest.opportunities {
            let savings = if opportunity.savings.is_empty() {
                "Action required"
            } else {
                opportunity.savings.as_str()
            };
            lines.push(String::new());
            lines.push(format!("- {} ({})", opportunity.title, savings));
            lines.extend(opportunity.items.iter().cloned());
        }
    }

    lines.push(String::new());
    lines.push("--- Key Diagnostics ---".to_string());
    let diagnostics = &digest.diagnostics;
    if diagnostics.is_empty() {
        lines.push("No key diagnostics available.".to_string());
    } else {
        if let Some(chains) = &diagnostics.critical_chain_summary {
            lines.push(format!("- Critical Request Chains: {}", chains));
        }
        if let Some(resources) = &diagnostics.resource_summary {
            lines.push(format!("- Resource Breakdown:\n{}", resources));
        }
    }

    lines.join("\n")
}
