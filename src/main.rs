//! CLI entry point for bloglet

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bloglet")]
#[command(version)]
#[command(about = "A small personal blog front-end for static markdown posts", long_about = None)]
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
    /// Start the preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },

    /// List catalog posts
    List,

    /// Validate the catalog against the assets directory
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "bloglet=debug,info"
    } else {
        "bloglet=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Serve { port, ip } => {
            let blog = bloglet::Blog::new(&base_dir)?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            bloglet::server::start(&blog, &ip, port).await?;
        }

        Commands::List => {
            let blog = bloglet::Blog::new(&base_dir)?;
            blog.list()?;
        }

        Commands::Check => {
            let blog = bloglet::Blog::new(&base_dir)?;
            blog.check()?;
        }
    }

    Ok(())
}
