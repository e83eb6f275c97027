use super::{ProviderArgs, print_metrics_pretty, print_metrics_table};
use crate::OutputFormat;
use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use pulse_core::Strategy;
use pulse_core::report::ReportWriter;
use pulse_server::{AnalysisRequest, AnalysisResponse, PulseService, SessionKey};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;

/// Outcome of a one-shot analysis
#[derive(Debug, Serialize)]
pub struct SiteAnalysis {
    pub url: String,
    pub strategy: Strategy,
    #[serde(flatten)]
    pub response: AnalysisResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

/// Only absolute http(s) URLs are worth a PageSpeed run
pub fn validate_url(raw: &str) -> Result<String> {
    let parsed = url::Url::parse(raw).with_context(|| format!("Invalid URL: {}", raw))?;

    match parsed.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        scheme => bail!("Unsupported URL scheme '{}': expected http or https", scheme),
    }
}

/// Analyze one page through the service, optionally saving the raw report
pub async fn analyze_site(
    service: &PulseService,
    url: &str,
    strategy: Strategy,
    output: Option<&Path>,
    include_digest: bool,
) -> Result<SiteAnalysis> {
    let key = SessionKey::default();
    let request = AnalysisRequest {
        url: url.to_string(),
        strategy,
    };

    let response = service.analyze(&key, &request).await?;

    if let Some(path) = output
        && let Some(snapshot) = service.sessions().current_report(&key).await
    {
        ReportWriter::to_file(&snapshot.report, path)?;
        tracing::info!("Saved report to {}", path.display());
    }

    let digest = if include_digest {
        service.sessions().current_digest(&key).await
    } else {
        None
    };

    Ok(SiteAnalysis {
        url: url.to_string(),
        strategy,
        response,
        digest,
    })
}

pub fn execute(
    url: &str,
    strategy: Strategy,
    output: Option<&Path>,
    show_digest: bool,
    providers: &ProviderArgs,
    format: OutputFormat,
) -> Result<()> {
    let url = validate_url(url)?;
    let settings = providers.settings()?;
    let service = PulseService::from_settings(&settings)?;

    tracing::info!("Analyzing {} with model {}", url, settings.model);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}")?);
    spinner.set_message(format!("Running PageSpeed analysis for {}...", url));
    spinner.enable_steady_tick(Duration::from_millis(100));

    let runtime = tokio::runtime::Runtime::new()?;
    let result = runtime.block_on(analyze_site(&service, &url, strategy, output, show_digest));
    spinner.finish_and_clear();
    let analysis = result?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&analysis)?),
        OutputFormat::Table => {
            print_metrics_table(analysis.response.performance_score, &analysis.response.metrics)
        }
        OutputFormat::Pretty => output_pretty(&analysis, output),
    }

    Ok(())
}

fn output_pretty(analysis: &SiteAnalysis, output: Option<&Path>) {
    use console::style;

    println!("\n{}", style("Performance Analysis").bold().cyan());
    println!("{}", style("====================").cyan());
    println!("  URL:      {}", analysis.url);
    println!("  Strategy: {}", analysis.strategy.as_str());

    print_metrics_pretty(analysis.response.performance_score, &analysis.response.metrics);

    println!("\n{}", style("Suggestions:").bold());
    println!("{}", analysis.response.initial_suggestion);

    if let Some(digest) = &analysis.digest {
        println!("\n{}", style("Digest:").bold());
        println!("{}", digest);
    }

    if let Some(path) = output {
        println!("\n📝 Report written to: {}", path.display());
    }
}
