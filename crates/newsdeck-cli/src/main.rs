//! newsdeck CLI - cached news, weather, and blog dashboard
//!
//! This is the main entry point for the newsdeck command-line interface.
//! Command implementations live in separate modules under `commands`.

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;
    execute_command(cli).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::News { category } => commands::show_news(category, cli.format).await,
        Commands::Search { query } => {
            commands::search_news(query.join(" "), cli.format).await
        },
        Commands::Read {
            index,
            category,
            search,
            sentences,
        } => commands::read_article(index, category, search, sentences).await,
        Commands::Weather { location, units } => {
            commands::show_weather(location, units, cli.format).await
        },
        Commands::Blog { command } => commands::manage_blog(command, cli.format),
    }
}
