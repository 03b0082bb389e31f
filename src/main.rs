mod error;
mod extract;
mod keys;
mod pipeline;
mod project;
mod record;
mod store;

use clap::{Parser, Subcommand};

use pipeline::{ChainTrigger, Envelope, NoopTrigger};
use store::StoreConfig;

#[derive(Parser)]
#[command(
    name = "html_featurizer",
    about = "Two-stage pipeline: stored HTML -> record JSON -> feature CSV"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a structured record from the HTML at --key (no downstream trigger)
    Extract {
        /// Source key, e.g. raw/2024/page.html
        #[arg(short, long)]
        key: String,
    },
    /// Project a feature CSV from the record at --key
    Project {
        /// Source key, e.g. structured/2024/page.json
        #[arg(short, long)]
        key: String,
    },
    /// Run both stages for one document (extract, then project via the chain trigger)
    Run {
        /// Source key, e.g. raw/2024/page.html
        #[arg(short, long)]
        key: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    let store = StoreConfig::from_env()?.build()?;

    let envelope = match cli.command {
        Commands::Extract { key } => {
            pipeline::run_extractor(store, &NoopTrigger, &key).await
        }
        Commands::Project { key } => pipeline::run_projector(store, &key).await,
        Commands::Run { key } => {
            let trigger = ChainTrigger::new(store.clone());
            pipeline::run_extractor(store, &trigger, &key).await
        }
    };

    report(&envelope)
}

fn report(envelope: &Envelope) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(envelope)?);
    if envelope.is_success() {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
