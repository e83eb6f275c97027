pub mod analyze;
pub mod completion;
pub mod digest;
pub mod serve;

use clap::Args;
use pulse_core::analysis::DisplayMetric;
use pulse_providers::ProviderSettings;

/// Credentials and model selection shared by every command that talks to
/// the providers
#[derive(Args, Debug, Clone)]
pub struct ProviderArgs {
    /// Google PageSpeed Insights API key
    #[arg(long, env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub pagespeed_api_key: Option<String>,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    /// Chat model name
    #[arg(long, env = "GROQ_MODEL")]
    pub model: Option<String>,
}

impl ProviderArgs {
    pub fn settings(&self) -> pulse_providers::Result<ProviderSettings> {
        let settings = ProviderSettings::new(self.pagespeed_api_key.clone(), self.groq_api_key.clone())?;

        Ok(match self.model.as_deref().map(str::trim) {
            Some(model) if !model.is_empty() => settings.with_model(model),
            _ => settings,
        })
    }
}

fn print_metrics_pretty(score: u8, metrics: &[DisplayMetric]) {
    use console::style;

    let score_style = match score {
        90..=100 => style(format!("{}/100", score)).green().bold(),
        50..=89 => style(format!("{}/100", score)).yellow().bold(),
        _ => style(format!("{}/100", score)).red().bold(),
    };

    println!("\n{}", style("Performance:").bold());
    println!("  Score: {}", score_style);

    println!("\n{}", style("Metrics:").bold());
    let width = metrics.iter().map(|m| m.title.len()).max().unwrap_or(0);
    for metric in metrics {
        println!("  {:<width$}  {}", metric.title, metric.value, width = width);
    }
}

fn print_metrics_table(score: u8, metrics: &[DisplayMetric]) {
    println!("Metric,Value");
    println!("Performance Score,{}", score);
    for metric in metrics {
        println!("{},{}", metric.title, metric.value);
    }
}
