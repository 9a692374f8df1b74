use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use castgraph_common::Config;
use castgraph_pipeline::{JsonDirSink, Pipeline, TableSink};
use enrichment_oracle::LexiconOracle;
use warpcast_client::{load_casts_from_file, FeedQuery, WarpcastClient};

#[derive(Parser)]
#[command(name = "castgraph")]
#[command(about = "Build user, relationship and engagement tables from a Farcaster channel feed")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch (or load) casts, run the pipeline and write the tables (default)
    Run(RunArgs),

    /// List channels, most-followed first
    Channels {
        #[arg(short, long, default_value_t = 100)]
        limit: u32,
    },
}

#[derive(Args, Default)]
struct RunArgs {
    /// Read casts from a JSON file instead of the feed API
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Channel to read the follower feed from
    #[arg(long)]
    channel: Option<String>,

    #[arg(long)]
    follower_limit: Option<u32>,

    #[arg(long)]
    cast_limit: Option<u32>,

    #[arg(long)]
    total_cast_limit: Option<u32>,

    /// Directory for users.json, edges.json and engagement.json
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("castgraph=info".parse()?)
                .add_directive("warpcast_client=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    config.log_summary();

    match cli.command.unwrap_or_else(|| Commands::Run(RunArgs::default())) {
        Commands::Run(args) => run(config, args).await,
        Commands::Channels { limit } => list_channels(config, limit).await,
    }
}

async fn run(config: Config, args: RunArgs) -> Result<()> {
    let casts = match args.input {
        Some(path) => load_casts_from_file(&path)?,
        None => {
            let query = FeedQuery {
                channel_id: args.channel.unwrap_or(config.channel_id),
                follower_limit: args.follower_limit.unwrap_or(config.follower_limit),
                cast_limit: args.cast_limit.unwrap_or(config.cast_limit),
                total_cast_limit: args.total_cast_limit.unwrap_or(config.total_cast_limit),
            };
            WarpcastClient::new(config.warpley_base_url)
                .fetch_casts(&query)
                .await?
        }
    };
    info!(count = casts.len(), "Casts ready");

    let mut pipeline = Pipeline::new(Arc::new(LexiconOracle::new()));
    pipeline.run(casts).await?;
    let output = pipeline.finish();
    info!("{}", output.stats);

    let sink = JsonDirSink::new(args.output.unwrap_or(config.output_dir));
    sink.write_tables(&output)?;
    println!("Tables written to {}", sink.dir().display());

    Ok(())
}

async fn list_channels(config: Config, limit: u32) -> Result<()> {
    let channels = WarpcastClient::new(config.warpley_base_url)
        .list_channels(limit)
        .await?;
    for channel in channels {
        println!(
            "{}\t{}\t{}",
            channel.id,
            channel.follower_count.unwrap_or(0),
            channel.name.unwrap_or_default()
        );
    }
    Ok(())
}
