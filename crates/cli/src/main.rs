//! FreshFold CLI - customer, admin, and courier views over the FreshFold
//! backend plus the locally persisted order history.
//!
//! # Usage
//!
//! ```bash
//! # Place a wash & fold order and submit it to the backend
//! ff-cli order place --service "Wash & Fold" --total 24.99 --item-count 12 --submit
//!
//! # Track an order through the pipeline
//! ff-cli order track ORD-1700000000000
//!
//! # Render the customer dashboard
//! ff-cli dashboard
//!
//! # Courier view of in-flight pickups/deliveries
//! ff-cli admin deliveries
//! ```
//!
//! # Environment Variables
//!
//! - `FRESHFOLD_API_BASE_URL` - Base URL of the FreshFold REST API
//! - `FRESHFOLD_USER_EMAIL` - Email used for per-customer endpoints
//! - `FRESHFOLD_DATA_DIR` - Directory for locally persisted state

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal tables are the product of this binary.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;
mod render;

use commands::{AdminAction, MlAction, NotificationAction, OrderAction, ProfileAction};

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(author, version, about = "FreshFold laundry client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local order history and submit orders
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Render the customer dashboard
    Dashboard,
    /// Show or update the customer profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Notification inbox
    Notifications {
        #[command(subcommand)]
        action: NotificationAction,
    },
    /// Segmentation and recommendation service
    Ml {
        #[command(subcommand)]
        action: MlAction,
    },
    /// Admin and courier views
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to warnings so tables stay readable
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fresh_fold_cli=warn,fresh_fold_client=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let context = commands::Context::from_env()?;

    match cli.command {
        Commands::Order { action } => commands::orders::run(&context, action).await?,
        Commands::Dashboard => commands::dashboard::run(&context).await?,
        Commands::Profile { action } => commands::profile::run(&context, action).await?,
        Commands::Notifications { action } => {
            commands::notifications::run(&context, action).await?;
        }
        Commands::Ml { action } => commands::ml::run(&context, action).await?,
        Commands::Admin { action } => commands::admin::run(&context, action).await?,
    }

    Ok(())
}
