use clap::{Parser, Subcommand};

mod commands;

use commands::{MatchArgs, ScanArgs, StakesArgs, WatchArgs};

#[derive(Parser)]
#[command(name = "oddsarb")]
#[command(about = "Cross-bookmaker odds matching and arbitrage scanner", long_about = None)]
struct Cli {
    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan two quote files once and print opportunities
    Scan(ScanArgs),
    /// Split a stake across two odds for equal payout
    Stakes(StakesArgs),
    /// Show how a team label scores against a candidate list
    Match(MatchArgs),
    /// Rescan live quote files on an interval, reporting new opportunities
    Watch(WatchArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            // stdout is reserved for results
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Scan(args) => commands::run_scan(args)?,
        Commands::Stakes(args) => commands::run_stakes(args)?,
        Commands::Match(args) => commands::run_match(args)?,
        Commands::Watch(args) => commands::run_watch(args).await?,
    }

    Ok(())
}
