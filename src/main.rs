//! CLI entry point for startrail

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "startrail")]
#[command(version)]
#[command(about = "A static blog generator backed by a headless CMS", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate static files from the content repository
    #[command(alias = "g")]
    Generate,

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },

    /// Clean the public folder
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "startrail=debug,info"
    } else {
        "startrail=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Generate => {
            let app = startrail::Startrail::new(&base_dir)?;
            tracing::info!("Generating static files...");
            app.generate().await?;
            println!("Generated successfully!");
        }

        Commands::Server { port, ip, open } => {
            let app = startrail::Startrail::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating static files...");
            app.generate().await?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            startrail::server::start(&app, &ip, port, open).await?;
        }

        Commands::Clean => {
            let app = startrail::Startrail::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            app.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("startrail version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
