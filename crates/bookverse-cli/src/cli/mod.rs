//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

mod commands;

#[derive(Parser)]
#[command(name = "bookverse")]
#[command(version)]
#[command(about = "Terminal client for the BookVerse catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in and persist the session token
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account and sign in
    Register {
        /// Account email
        #[arg(long)]
        email: String,

        /// Display name
        #[arg(long)]
        name: String,

        /// Password (prompted on stdin when omitted)
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and discard the persisted token
    Logout,

    /// Show the current session identity
    Whoami,

    /// Browse and manage the catalog
    Books {
        #[command(subcommand)]
        command: BooksCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum BooksCommands {
    /// List books (filters apply client-side)
    List {
        /// Only this category (exact match)
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive search over title and author
        #[arg(long)]
        search: Option<String>,

        /// Only featured books
        #[arg(long)]
        featured: bool,
    },

    /// Show one book in detail
    Show {
        /// Book id
        id: String,
    },

    /// List the categories currently in use
    Categories,

    /// Create a book (admin)
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        category: String,
        /// Feature this book in the showcase rail
        #[arg(long)]
        featured: bool,
        /// Call-to-action label
        #[arg(long, default_value = "Buy Now")]
        cta: String,
        /// Local cover image file to upload
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,
    },

    /// Update a book; omitted fields keep their current value (admin)
    Edit {
        /// Book id
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        author: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
        /// Set the featured flag explicitly (true/false)
        #[arg(long)]
        featured: Option<bool>,
        /// Call-to-action label
        #[arg(long)]
        cta: Option<String>,
        /// Local cover image file to upload
        #[arg(long, value_name = "PATH")]
        cover: Option<PathBuf>,
    },

    /// Delete a book (admin)
    Delete {
        /// Book id
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Create the config file with defaults
    Init,
    /// Print the resolved configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        None => commands::tui().await,
        Some(Commands::Login { email, password }) => {
            bookverse_core::logging::init_cli();
            commands::auth::login(&email, password).await
        }
        Some(Commands::Register {
            email,
            name,
            password,
        }) => {
            bookverse_core::logging::init_cli();
            commands::auth::register(&email, &name, password).await
        }
        Some(Commands::Logout) => {
            bookverse_core::logging::init_cli();
            commands::auth::logout()
        }
        Some(Commands::Whoami) => {
            bookverse_core::logging::init_cli();
            commands::auth::whoami().await
        }
        Some(Commands::Books { command }) => {
            bookverse_core::logging::init_cli();
            commands::books::dispatch(command).await
        }
        Some(Commands::Config { command }) => {
            bookverse_core::logging::init_cli();
            commands::config::dispatch(&command)
        }
    }
}
