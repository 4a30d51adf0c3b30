use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod session;

#[derive(Parser)]
#[command(name = "break-scheduler", version, about = "Break Scheduler CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Timer control
    Timer {
        #[command(subcommand)]
        action: commands::timer::TimerAction,
    },
    /// Work/break configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // stdout carries JSON; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("break_scheduler=warn,break_scheduler_core=warn")
        }))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Timer { action } => commands::timer::run(action).await,
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
