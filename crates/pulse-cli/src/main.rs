use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use pulse_cli::commands::{self, ProviderArgs};
use pulse_cli::{OutputFormat, StrategyArg};
use pulse_server::config::{DEFAULT_HOST, DEFAULT_PORT};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pulse")]
#[command(author, version, about, long_about = None)]
#[command(
    about = "Lighthouse performance analysis with an AI assistant",
    long_about = "Pulse runs Google PageSpeed Insights against a page, condenses the Lighthouse \
                  report into a digest, and lets you chat with a language model about how to \
                  make the page faster."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "pretty")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "PULSE_HOST", default_value = DEFAULT_HOST)]
        host: String,

        /// Port to listen on
        #[arg(short, long, env = "PULSE_PORT", default_value_t = DEFAULT_PORT)]
        port: u16,

        #[command(flatten)]
        providers: ProviderArgs,
    },

    /// Analyze a live page and print metrics with an initial suggestion
    Analyze {
        /// Page to analyze
        #[arg(value_name = "URL")]
        url: String,

        /// Device profile to emulate
        #[arg(long, value_enum, default_value = "desktop")]
        strategy: StrategyArg,

        /// Save the raw Lighthouse report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Also print the digest handed to the model
        #[arg(long)]
        show_digest: bool,

        #[command(flatten)]
        providers: ProviderArgs,
    },

    /// Digest a saved Lighthouse report without calling any API
    Digest {
        /// Path to the report JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// URL to show in the digest header (defaults to the report's own)
        #[arg(long)]
        url: Option<String>,
    },

    /// Generate shell completion scripts
    #[command(long_about = "Generate shell completion scripts for pulse.

SUPPORTED SHELLS:
    bash, zsh, fish, powershell, elvish

INSTALLATION:
    Bash:  pulse completion --shell bash >> ~/.bashrc
    Zsh:   pulse completion --shell zsh > ~/.zfunc/_pulse
           (then add 'fpath=(~/.zfunc $fpath)' to ~/.zshrc)
    Fish:  pulse completion --shell fish > ~/.config/fish/completions/pulse.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(short, long, value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    // Secrets may come from .env; load it before clap reads the environment
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {}", e),
    }

    // Execute the command
    match cli.command {
        Commands::Serve {
            host,
            port,
            providers,
        } => commands::serve::execute(&host, port, &providers),
        Commands::Analyze {
            url,
            strategy,
            output,
            show_digest,
            providers,
        } => commands::analyze::execute(
            &url,
            strategy.into(),
            output.as_deref(),
            show_digest,
            &providers,
            cli.format,
        ),
        Commands::Digest { file, url } => commands::digest::execute(&file, url.as_deref(), cli.format),
        Commands::Completion { shell } => commands::completion::execute(shell, &mut Cli::command()),
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("pulse=debug,pulse_core=debug,pulse_providers=debug,pulse_server=debug,tower_http=debug")
    } else {
        EnvFilter::new("pulse=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}
