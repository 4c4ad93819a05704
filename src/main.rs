//! CLI entry point for folio-rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_rs::commands::{self, ContentKind};
use folio_rs::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Markdown-backed posts and projects for a portfolio site", long_about = None)]
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
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post or project
    New {
        /// What to create
        #[arg(value_enum)]
        kind: ContentKind,

        /// Title of the new entry
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,

        /// Comma-separated tags
        #[arg(short, long, value_delimiter = ',')]
        tags: Vec<String>,
    },

    /// List posts or projects, newest first
    #[command(alias = "ls")]
    List {
        #[arg(value_enum, default_value = "post")]
        kind: ContentKind,

        /// Only entries with this tag; repeat to require several (projects)
        #[arg(short, long)]
        tag: Vec<String>,
    },

    /// Print the tag index of a collection
    Tags {
        #[arg(value_enum, default_value = "post")]
        kind: ContentKind,
    },

    /// Show one post or project
    Show {
        #[arg(value_enum)]
        kind: ContentKind,

        slug: String,

        /// Render the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// Serve posts and projects as JSON
    #[command(alias = "s")]
    Server {
        /// Port to listen on (overrides folio.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides folio.yml)
        #[arg(short, long)]
        ip: Option<String>,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio_rs=debug,info"
    } else {
        "folio_rs=info"
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
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing site in {:?}", target_dir);
            commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            kind,
            title,
            slug,
            tags,
        } => {
            let folio = Folio::new(&base_dir)?;
            let path = commands::new::create(&folio, kind, &title, slug.as_deref(), &tags)?;
            println!("Created: {:?}", path);
        }

        Commands::List { kind, tag } => {
            let folio = Folio::new(&base_dir)?;
            commands::list::run(&folio, kind, &tag)?;
        }

        Commands::Tags { kind } => {
            let folio = Folio::new(&base_dir)?;
            commands::list::run_tags(&folio, kind)?;
        }

        Commands::Show { kind, slug, html } => {
            let folio = Folio::new(&base_dir)?;
            commands::show::run(&folio, kind, &slug, html)?;
        }

        Commands::Server { port, ip } => {
            let folio = Folio::new(&base_dir)?;
            let ip = ip.unwrap_or_else(|| folio.config.server.ip.clone());
            let port = port.unwrap_or(folio.config.server.port);

            tracing::info!("Starting server at http://{}:{}", ip, port);
            folio_rs::server::start(&folio, &ip, port).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
