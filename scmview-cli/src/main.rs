use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod shell;

use commands::{browse, cat, log, ls, serve, widgets};

#[derive(Parser)]
#[command(name = "scmview")]
#[command(version, about = "Browse SCM repositories and changesets", long_about = None)]
struct Cli {
    /// Config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// REST root of the SCM backend, overrides the config file
    #[arg(short, long, global = true)]
    backend: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web console
    Serve {
        /// Address to listen on
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Browse a repository interactively
    Browse {
        /// Repository ID
        repository: String,

        /// Directory to start in
        #[arg(short, long, default_value = "")]
        path: String,

        /// Revision to browse (defaults to latest)
        #[arg(short, long)]
        revision: Option<String>,
    },

    /// List a directory
    Ls {
        /// Repository ID
        repository: String,

        /// Directory to list (defaults to root)
        #[arg(default_value = "")]
        path: String,

        /// Revision to list (defaults to latest)
        #[arg(short, long)]
        revision: Option<String>,

        /// Print the widget HTML instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Print a file
    Cat {
        /// Repository ID
        repository: String,

        /// File path
        path: String,

        /// Revision to read (defaults to latest)
        #[arg(short, long)]
        revision: Option<String>,
    },

    /// Show changesets
    Log {
        /// Repository ID
        repository: String,

        /// Index of the first changeset
        #[arg(short, long, default_value = "0")]
        start: usize,

        /// Number of changesets to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print the widget HTML instead of text
        #[arg(long)]
        html: bool,
    },

    /// List the registered widget types
    Widgets,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Commands::Widgets = cli.command {
        return widgets::run();
    }

    let config = commands::load_config(cli.config, cli.backend)?;

    match cli.command {
        Commands::Serve { listen } => {
            serve::run(config, listen).await?;
        }
        Commands::Browse {
            repository,
            path,
            revision,
        } => {
            browse::run(config, repository, path, revision).await?;
        }
        Commands::Ls {
            repository,
            path,
            revision,
            html,
        } => {
            ls::run(config, repository, path, revision, html).await?;
        }
        Commands::Cat {
            repository,
            path,
            revision,
        } => {
            cat::run(config, repository, path, revision).await?;
        }
        Commands::Log {
            repository,
            start,
            limit,
            html,
        } => {
            log::run(config, repository, start, limit, html).await?;
        }
        Commands::Widgets => widgets::run()?,
    }

    Ok(())
}
