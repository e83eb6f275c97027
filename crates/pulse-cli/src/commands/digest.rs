use super::{print_metrics_pretty, print_metrics_table};
use crate::OutputFormat;
use anyhow::{Context, Result};
use pulse_core::analysis::{ReportAnalysis, analyze_report};
use pulse_core::report::{Node, RawReport, ReportReader};
use std::path::Path;

const UNKNOWN_URL: &str = "unknown";

/// Digest of a report saved on disk
#[derive(Debug)]
pub struct ReportDigest {
    pub url: String,
    pub analysis: ReportAnalysis,
}

/// Read a saved report and run it through the same pipeline as a live
/// analysis. Without `url`, the page address recorded in the report is used.
pub fn digest_report(file: &Path, url: Option<&str>) -> Result<ReportDigest> {
    tracing::debug!("Digesting report file: {}", file.display());

    let report = ReportReader::from_file(file)
        .with_context(|| format!("Failed to load report {}", file.display()))?;

    let url = url
        .map(str::to_string)
        .or_else(|| report_url(&report))
        .unwrap_or_else(|| UNKNOWN_URL.to_string());

    let analysis = analyze_report(&report, &url)?;

    Ok(ReportDigest { url, analysis })
}

fn report_url(report: &RawReport) -> Option<String> {
    let root = Node::new(report);
    let lighthouse = root.get("lighthouseResult");

    lighthouse
        .str("finalUrl")
        .or_else(|| lighthouse.str("requestedUrl"))
        .or_else(|| root.str("id"))
        .map(str::to_string)
}

pub fn execute(file: &Path, url: Option<&str>, format: OutputFormat) -> Result<()> {
    tracing::info!("Digesting report file: {}", file.display());

    let digest = digest_report(file, url)?;

    match format {
        OutputFormat::Json => output_json(&digest)?,
        OutputFormat::Table => print_metrics_table(digest.analysis.performance_score, &digest.analysis.metrics),
        OutputFormat::Pretty => output_pretty(&digest),
    }

    Ok(())
}

fn output_pretty(digest: &ReportDigest) {
    use console::style;

    println!("\n{}", style("Lighthouse Report Digest").bold().cyan());
    println!("{}", style("========================").cyan());
    println!("  URL: {}", digest.url);

    print_metrics_pretty(digest.analysis.performance_score, &digest.analysis.metrics);

    println!("\n{}", style("Digest:").bold());
    println!("{}", digest.analysis.digest_text);
}

fn output_json(digest: &ReportDigest) -> Result<()> {
    let output = serde_json::json!({
        "url": digest.url,
        "performance_score": digest.analysis.performance_score,
        "metrics": digest.analysis.metrics,
        "digest": digest.analysis.digest,
        "digest_text": digest.analysis.digest_text,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
