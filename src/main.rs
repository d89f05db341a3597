//! CLI entry point for lugsite

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lugsite::content::ContentType;

#[derive(Parser)]
#[command(name = "lugsite")]
#[command(version)]
#[command(about = "Static site generator for a Linux user group website", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    /// Defaults to `generate`
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new site
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new content file
    New {
        /// Content type (events, people, projects, pages, news)
        r#type: ContentType,

        /// Title of the new item
        title: String,

        /// File name without extension (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Remove the output folder
    Clean,

    /// List the items of a content type
    List {
        /// Content type (events, people, projects, pages, news)
        #[arg(default_value = "events")]
        r#type: ContentType,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "lugsite=debug,info"
    } else {
        "lugsite=info"
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
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command.unwrap_or(Commands::Generate { watch: false }) {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            lugsite::commands::init::init_site(&target_dir)?;
            println!("Initialized site in {:?}", target_dir);
        }

        Commands::New {
            r#type,
            title,
            slug,
        } => {
            let site = lugsite::Site::new(&base_dir)?;
            let path = lugsite::commands::new::run(&site, r#type, &title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch } => {
            let site = lugsite::Site::new(&base_dir)?;
            tracing::info!("Generating static files...");
            site.generate()?;
            println!("Generated successfully!");

            if watch {
                lugsite::commands::generate::watch(&site)?;
            }
        }

        Commands::Clean => {
            let site = lugsite::Site::new(&base_dir)?;
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let site = lugsite::Site::new(&base_dir)?;
            lugsite::commands::list::run(&site, r#type)?;
        }

        Commands::Version => {
            println!("lugsite version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
