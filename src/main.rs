use clap::Parser;
use exn::ResultExt;
use pricebot_config::Config;
use pricebot_lookup::PriceLookup;
use pricebot_lookup::error::{ErrorKind, Result};
use pricebot_source::backend::FileSource;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Look up a card's market price in a saved marketplace results page.
#[derive(Parser, Debug)]
#[command(name = "pricebot", version, about)]
struct Cli {
    /// Card name to look up.
    query: String,
    /// Saved results page: HTML, or a JSON array of listings.
    #[arg(long, value_name = "PATH")]
    page: PathBuf,
    /// Who the reply is addressed to.
    #[arg(long)]
    user: Option<String>,
    /// Config file (defaults to `pricebot.toml` in the platform config directory).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Deadline for reading the page, overriding the configured one.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(cli: Cli) -> Result<String> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Construction)?;
    if let Some(timeout_ms) = cli.timeout_ms {
        config.lookup.fetch_timeout_ms = Some(timeout_ms);
    }
    let source = FileSource::new(cli.page).with_extractor(pricebot_lookup::extractor(&config.source)?);
    let lookup = PriceLookup::from_config(&config, Arc::new(source))?;
    Ok(lookup.lookup(&cli.query, cli.user.as_deref()).await)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();
    match run(cli).await {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::error!(error = ?err, "Could not set up the price lookup");
            ExitCode::FAILURE
        },
    }
}
