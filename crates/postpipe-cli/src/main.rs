use clap::{Parser, Subcommand};
use postpipe_pipeline::{Pipeline, PipelineRequest};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "postpipe-cli")]
#[command(about = "Run the post pipeline and inspect stored results")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one pipeline pass and print the response as JSON.
    Run {
        /// Address passed to the notifier.
        #[arg(long)]
        email: Option<String>,
        /// Accepted for parity with the HTTP endpoint; not used.
        #[arg(long)]
        source: Option<String>,
    },
    /// Print the most recently stored results as JSON.
    Results {
        #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(i64).range(1..=200))]
        limit: i64,
    },
}

#[derive(Debug, Serialize)]
struct ResultOutput {
    id: i64,
    original: String,
    analysis: String,
    sentiment: String,
    timestamp: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenvy::dotenv().ok();
    let config = postpipe_core::load_app_config()?;
    // Logs go to stderr so stdout stays machine-readable JSON.
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, "parsed command");

    let pool_config = postpipe_db::PoolConfig::from_app_config(&config);
    let pool = postpipe_db::connect_pool(&config.database_url, pool_config).await?;

    match cli.command {
        Commands::Run { email, source } => {
            let pipeline = Pipeline::from_app_config(&config, pool.clone())?;
            let response = pipeline
                .run(&PipelineRequest {
                    email,
                    source: source.map(serde_json::Value::from),
                })
                .await;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Commands::Results { limit } => {
            let rows = postpipe_db::list_results(&pool, limit).await?;
            let output: Vec<ResultOutput> = rows
                .into_iter()
                .map(|row| ResultOutput {
                    id: row.id,
                    original: row.original,
                    analysis: row.analysis,
                    sentiment: row.sentiment,
                    timestamp: row.timestamp,
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    pool.close().await;
    Ok(())
}
