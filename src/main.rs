//! ScoutBot command line.
//!
//! ```bash
//! scoutbot ask "Which lefties have a changeup of 55 or better?" --show-sources
//! scoutbot search "plus arm shortstop" --top-k 4
//! scoutbot chat
//! scoutbot serve
//! ```

mod chat;
mod telemetry;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use scout_rag::{
    AskOptions, DEFAULT_ASK_TOP_K, DEFAULT_SEARCH_TOP_K, IndicatifProgress, ScoutBot, sources,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "scoutbot")]
#[command(about = "Answer questions about baseball scouting reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask one question and print the answer
    Ask {
        question: String,

        /// Passages retrieved from the index
        #[arg(short = 'k', long, default_value_t = DEFAULT_ASK_TOP_K)]
        top_k: usize,

        /// Print the retrieved passages after the answer
        #[arg(short, long)]
        show_sources: bool,
    },

    /// Print the passages most similar to a query
    Search {
        query: String,

        #[arg(short = 'k', long, default_value_t = DEFAULT_SEARCH_TOP_K)]
        top_k: usize,
    },

    /// Interactive chat session
    Chat {
        #[arg(short = 'k', long, default_value_t = DEFAULT_ASK_TOP_K)]
        top_k: usize,
    },

    /// Serve the HTTP API
    Serve {
        #[arg(long, env = "API_ADDRESS", default_value = "127.0.0.1:8080")]
        addr: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine; the process environment still applies.
    dotenvy::dotenv().ok();
    telemetry::init()?;

    let cli = Cli::parse();

    let bot = match ScoutBot::from_env().await {
        Ok(bot) => bot,
        Err(e) if e.is_config() => {
            error!(error = %e, "invalid configuration");
            return Err(e).context("ScoutBot is not configured");
        }
        Err(e) => return Err(e).context("ScoutBot failed to start"),
    };

    match cli.command {
        Commands::Ask {
            question,
            top_k,
            show_sources,
        } => {
            let opts = AskOptions {
                top_k,
                show_sources,
            };
            let prog = IndicatifProgress::spinner();
            let qa = bot.ask_with_progress(&question, opts, &prog).await?;

            if show_sources {
                println!("\n{}\n{}\n", "Answer:".bold(), qa.answer);
                println!("{}", "### Sources".bold());
                for line in &qa.sources {
                    println!("{line}");
                }
            } else {
                println!("{}", qa.answer);
            }
        }

        Commands::Search { query, top_k } => {
            let hits = bot.similarity_search(&query, Some(top_k)).await?;
            if hits.is_empty() {
                println!("{}", "no matches".dimmed());
            }
            for line in sources::fmt_sources(&hits) {
                println!("{line}");
            }
        }

        Commands::Chat { top_k } => {
            let opts = AskOptions {
                top_k,
                ..AskOptions::default()
            };
            chat::run(&bot, opts).await?;
        }

        Commands::Serve { addr } => {
            info!(%addr, "starting HTTP API");
            api::start(Arc::new(bot), &addr).await?;
        }
    }

    Ok(())
}
