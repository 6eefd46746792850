use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use musesearch::{router, Container};

#[derive(Parser)]
#[command(name = "musesearch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the conversational search API over HTTP.
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Secrets may live in a local .env; a missing file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve { addr } => {
            // Fails fast here when a required API key is absent.
            let container = Arc::new(Container::from_env()?);

            let listener = tokio::net::TcpListener::bind(addr).await?;
            info!("Listening on {addr}");
            axum::serve(listener, router(container)).await?;
        }
    }

    Ok(())
}
