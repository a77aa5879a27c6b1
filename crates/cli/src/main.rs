//! Storedesk CLI - back-office operations from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Dashboard counters
//! desk stats
//!
//! # Products
//! desk products list --search mug --status active
//! desk products create --name "Mug" --price 12.50 --stock 4 --image mug.png
//! desk products update 7 --stock 0 --status inactive
//! desk products delete 7
//!
//! # Comment moderation
//! desk comments list --status reported
//! desk comments reports 12
//! desk comments delete 12
//!
//! # Messages
//! desk messages list
//! desk messages reply 3 --text "Thanks, it ships Monday."
//!
//! # Customers
//! desk customers list --search gmail
//! desk customers export -o customers-list.pdf
//! ```
//!
//! # Environment Variables
//!
//! - `BACKEND_URL` - Shop API origin (overridden by `--backend-url`)
//! - `BACKEND_API_TOKEN` - Bearer token (optional)
//! - `BACKEND_TIMEOUT_SECS` - Per-request timeout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "desk")]
#[command(author, version, about = "Storedesk back-office CLI")]
struct Cli {
    /// Shop backend origin
    #[arg(long, global = true, env = "BACKEND_URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show customer, product and order counts
    Stats,
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Moderate comments
    Comments {
        #[command(subcommand)]
        action: CommentAction,
    },
    /// Read and answer contact messages
    Messages {
        #[command(subcommand)]
        action: MessageAction,
    },
    /// List and export customers
    Customers {
        #[command(subcommand)]
        action: CustomerAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Match against name and description
        #[arg(short, long, default_value = "")]
        search: String,
        /// `all`, `active` or `inactive`
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Create a product
    Create {
        #[command(flatten)]
        fields: commands::products::ProductFields,
    },
    /// Update fields of an existing product
    Update {
        id: i32,
        #[command(flatten)]
        fields: commands::products::ProductFields,
    },
    /// Delete a product
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum CommentAction {
    /// List comments with their moderation status
    List {
        /// Match against comment text and author handle
        #[arg(short, long, default_value = "")]
        search: String,
        /// `all`, `reported` or `clean`
        #[arg(long, default_value = "all")]
        status: String,
    },
    /// Show the reports filed against a comment
    Reports { id: i32 },
    /// Delete a comment
    Delete { id: i32 },
}

#[derive(Subcommand)]
enum MessageAction {
    /// List messages
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Reply to a message
    Reply {
        id: i32,
        /// Reply body
        #[arg(short, long)]
        text: String,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// List customers
    List {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Write the customer list as a PDF
    Export {
        /// Output file
        #[arg(short, long, default_value = storedesk_admin::export::EXPORT_FILE_NAME)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pages = commands::connect(cli.backend_url.as_deref())?;

    match cli.command {
        Commands::Stats => commands::stats::show(&pages).await,
        Commands::Products { action } => match action {
            ProductAction::List { search, status } => {
                commands::products::list(&pages, &search, &status).await?;
            }
            ProductAction::Create { fields } => commands::products::create(&pages, fields).await?,
            ProductAction::Update { id, fields } => {
                commands::products::update(&pages, id.into(), fields).await?;
            }
            ProductAction::Delete { id } => commands::products::delete(&pages, id.into()).await?,
        },
        Commands::Comments { action } => match action {
            CommentAction::List { search, status } => {
                commands::comments::list(&pages, &search, &status).await?;
            }
            CommentAction::Reports { id } => commands::comments::reports(&pages, id.into()).await?,
            CommentAction::Delete { id } => commands::comments::delete(&pages, id.into()).await?,
        },
        Commands::Messages { action } => match action {
            MessageAction::List { search } => commands::messages::list(&pages, &search).await?,
            MessageAction::Reply { id, text } => {
                commands::messages::reply(&pages, id.into(), &text).await?;
            }
        },
        Commands::Customers { action } => match action {
            CustomerAction::List { search } => commands::customers::list(&pages, &search).await?,
            CustomerAction::Export { output } => {
                commands::customers::export(&pages, &output).await?;
            }
        },
    }
    Ok(())
}
