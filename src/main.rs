use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use piper::cli::{self, Args, Commands};
use piper::{shell, status};

fn init_tracing() {
    let filter = EnvFilter::try_from_env("PIPER_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let mut config = cli::load_config(&args)?;

    match args.command {
        Commands::Chat { message } => cli::handle_chat(&config, &message),
        Commands::Shell => shell::handle_shell(config).await,
        Commands::Status => status::handle_status(&config),
        Commands::Display { command } => cli::handle_display(&mut config, command),
        Commands::Identity { command } => cli::handle_identity(&config, command),
    }
}
