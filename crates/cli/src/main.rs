//! Apple Cart CLI - drive the cart controller against a page file.
//!
//! Each invocation is one page load followed by at most one click, with the
//! cart kept in a file-backed storage for the chosen origin, so consecutive
//! invocations behave like navigating the storefront.
//!
//! # Usage
//!
//! ```bash
//! # List the products a page declares
//! apple-cart --page site/iphone.html products
//!
//! # Add a product from that page, then look at the cart from another page
//! apple-cart --page site/iphone.html add iphone-15
//! apple-cart --page site/index.html view
//!
//! # Remove one unit, then check out
//! apple-cart --page site/index.html remove iphone-15
//! apple-cart --page site/index.html checkout
//! ```
//!
//! # Environment Variables
//!
//! - `CART_STORAGE_KEY`, `CART_ORIGIN`, `CART_STORAGE_DIR` - see the storefront config
//! - `RUST_LOG` - log filter (default: `apple_cart_storefront=info,apple_cart_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::session::Click;

#[derive(Parser)]
#[command(name = "apple-cart")]
#[command(author, version, about = "Apple Cart storefront session tools")]
struct Cli {
    /// HTML page to load
    #[arg(short, long)]
    page: PathBuf,

    /// Directory holding per-origin storage (overrides `CART_STORAGE_DIR`)
    #[arg(long)]
    storage_dir: Option<PathBuf>,

    /// Origin whose storage holds the cart (overrides `CART_ORIGIN`)
    #[arg(long)]
    origin: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load the page and show the cart regions
    Show,
    /// List products declared on the page
    Products,
    /// Click a product's add-to-cart trigger
    Add {
        /// Product ID (`data-id` of the trigger)
        id: String,
    },
    /// Click a cart line's remove trigger
    Remove {
        /// Product ID of the line
        id: String,
    },
    /// Click the checkout control
    Checkout,
    /// Click the view-cart trigger
    View,
    /// Click the modal close trigger
    Close,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "apple_cart_storefront=info,apple_cart_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = apple_cart_storefront::CartConfig::from_env()?;
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }
    if let Some(origin) = cli.origin {
        config.origin = origin;
    }

    let html = std::fs::read_to_string(&cli.page)
        .map_err(|e| format!("cannot read page {}: {e}", cli.page.display()))?;

    let click = match cli.command {
        Commands::Products => return commands::products::list(&html),
        Commands::Show => None,
        Commands::Add { id } => Some(Click::Add(id)),
        Commands::Remove { id } => Some(Click::Remove(id)),
        Commands::Checkout => Some(Click::Checkout),
        Commands::View => Some(Click::View),
        Commands::Close => Some(Click::Close),
    };

    commands::session::run(&html, &config, click)
}
