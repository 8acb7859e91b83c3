//! Entry point of the marketplace back-office API server

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use marketplace_api::{config::ApiConfig, schema::export_schema_sdl, start_server};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// marketplace-api: GraphQL back-office API for the vehicle marketplace
#[derive(Debug, Parser)]
#[command(name = "marketplace-api", about = "GraphQL back-office API for the vehicle marketplace", version)]
struct Args {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Optional path to a configuration file
    #[arg(short = 'c', long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run migrations and serve the GraphQL API (default)
    Serve,

    /// Export the GraphQL schema in SDL format
    ExportSchema {
        /// Output file path (defaults to stdout)
        #[arg(short = 'o', long = "output", value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Precedence: RUST_LOG env > -v flag > default info
    let env_filter = if std::env::var(EnvFilter::DEFAULT_ENV).is_ok() {
        EnvFilter::from_default_env()
    } else {
        match args.verbose {
            0 => EnvFilter::new("info"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    fmt().with_env_filter(env_filter).with_target(true).compact().init();

    match args.command.unwrap_or(Command::Serve) {
        Command::ExportSchema { output } => {
            let sdl = export_schema_sdl();
            match output {
                Some(path) => {
                    std::fs::write(&path, sdl)?;
                    info!(path = %path.display(), "GraphQL schema exported");
                }
                None => println!("{sdl}"),
            }
        }
        Command::Serve => {
            info!(
                verbosity = args.verbose,
                config = args.config.as_ref().map(|p| p.display().to_string()).as_deref(),
                "marketplace-api starting"
            );

            let config = ApiConfig::load(args.config.as_deref())?;
            start_server(config).await?;
        }
    }

    Ok(())
}
