// SPDX-License-Identifier: MIT
//! cftrack CLI — assemble a judge profile from the terminal.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};

use cftrack::{ClientConfig, JudgeClient, ProfileAssembler};

#[derive(Parser)]
#[command(
    name = "cftrack",
    about = "Codeforces profile aggregation — cached fetch, fan-out, submission statistics",
    version
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Base URL of the judge API
    #[arg(long, env = "CFTRACK_API_BASE_URL")]
    api_base: Option<String>,

    /// Cache TTL in seconds
    #[arg(long, env = "CFTRACK_CACHE_TTL_SECS")]
    cache_ttl: Option<u64>,

    /// Maximum submissions to fetch (newest first)
    #[arg(long, env = "CFTRACK_SUBMISSION_LIMIT")]
    limit: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CFTRACK_LOG", default_value = "warn")]
    log: String,

    /// Emit logs as JSON instead of compact text
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble the full profile for a handle and print it as JSON
    Fetch { handle: String },
    /// Print only the aggregated submission statistics for a handle
    Stats { handle: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if args.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(args.log.clone())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(args.log.clone())
            .compact()
            .init();
    }

    let mut config = ClientConfig::from_env();
    if let Some(base) = args.api_base {
        config.api_base_url = base.trim_end_matches('/').to_string();
    }
    if let Some(secs) = args.cache_ttl {
        config.cache_ttl = Duration::from_secs(secs);
    }
    if let Some(limit) = args.limit {
        config.submission_limit = limit;
    }

    let client = Arc::new(JudgeClient::from_config(config)?);
    let assembler = ProfileAssembler::new(client);

    match args.command {
        Command::Fetch { handle } => {
            let profile = assembler.assemble(&handle).await?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        Command::Stats { handle } => {
            let profile = assembler.assemble(&handle).await?;
            println!("{}", serde_json::to_string_pretty(&profile.stats)?);
        }
    }

    Ok(())
}
