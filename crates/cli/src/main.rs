use clap::{Parser, Subcommand};

mod commands;
mod runner;

use commands::{EvaluateArgs, RunArgs, StrategiesArgs};

#[derive(Parser)]
#[command(name = "newsblend")]
#[command(about = "News-blended BUY/HOLD signal engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and store signals for the configured symbols
    Run(RunArgs),
    /// List the combination strategies
    Strategies(StrategiesArgs),
    /// Score candle and news CSV files without a database
    Evaluate(EvaluateArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run(args) => commands::run_signals(args).await?,
        Commands::Strategies(args) => commands::run_strategies(args).await?,
        Commands::Evaluate(args) => commands::run_evaluate(args)?,
    }

    Ok(())
}
