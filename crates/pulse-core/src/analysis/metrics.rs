use super::{DisplayMetric, Extractor};
use crate::Result;
use crate::report::{RawReport, audits};

/// Metrics shown to the user right after an analysis, in display order
pub const DISPLAY_METRIC_IDS: [&str; 6] = [
    "first-contentful-paint",
    "speed-index",
    "largest-contentful-paint",
    "interactive",
    "total-blocking-time",
    "cumulative-layout-shift",
];

/// Pulls the fixed display metrics out of a report.
///
/// Never fails: an absent audit yields a humanized title and `N/A`, so the
/// output always has exactly six entries.
pub struct MetricExtractor;

impl Extractor for MetricExtractor {
    type Output = Vec<DisplayMetric>;

    fn extract(&self, report: &RawReport) -> Result<Self::Output> {
        tracing::debug!("Extracting display metrics");

        let audits = audits(report);

        let metrics = DISPLAY_METRIC_IDS
            .iter()
            .map(|id| {
                let audit = audits.get(id);
                DisplayMetric {
                    title: audit
                        .str("title")
                        .map(str::to_string)
                        .unwrap_or_else(|| humanize_id(id)),
                    value: audit.str("displayValue").unwrap_or("N/A").to_string(),
                }
            })
            .collect();

        Ok(metrics)
    }
}

/// "largest-contentful-paint" -> "Largest Contentful Paint"
pub fn humanize_id(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
