use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "ledgerpull")]
#[command(about = "Ledger commodity price updater", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch missing quotes and merge them into the price history
    Pull {
        /// Path to the ledger declaring commodities
        #[arg(short, long)]
        ledger: Option<PathBuf>,

        /// Path to the stock price history file
        #[arg(long)]
        stock_prices: Option<PathBuf>,

        /// Path to the currency price history file
        #[arg(long)]
        currency_prices: Option<PathBuf>,

        /// Days of history to fetch for entities without records
        #[arg(long)]
        lookback_days: Option<i64>,

        /// Pause between provider calls in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },
    /// Show current price history status
    Status,
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Pull {
            ledger,
            stock_prices,
            currency_prices,
            lookback_days,
            delay_ms,
        } => {
            commands::pull::run(ledger, stock_prices, currency_prices, lookback_days, delay_ms);
        }
        Commands::Status => {
            commands::status::run();
        }
    }
}
