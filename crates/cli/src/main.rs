//! Warung CLI - load a catalog, manage the cart, check out.
//!
//! # Usage
//!
//! ```bash
//! # Load the catalog from a feed file or URL
//! warung catalog load products.csv
//! warung catalog load https://shop.example/products.json
//!
//! # Browse it
//! warung catalog list --search gula --sort low
//! warung catalog categories
//!
//! # Manage the cart (persisted under WARUNG_DATA_DIR)
//! warung cart add p1
//! warung cart show
//!
//! # Hand off the order
//! warung checkout message
//! warung checkout pay
//! ```
//!
//! # Commands
//!
//! - `catalog` - Load and browse the product catalog
//! - `cart` - Mutate and inspect the durable cart
//! - `checkout` - Turn the reconciled cart into an order handoff

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "warung")]
#[command(author, version, about = "Warung storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and browse the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Mutate and inspect the durable cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Turn the reconciled cart into an order handoff
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Load the catalog from a feed file or URL
    Load {
        /// Feed file path, or an http(s) URL
        source: String,
    },
    /// List products, filtered and sorted
    List {
        /// Case-insensitive substring matched against name or category
        #[arg(short, long, default_value = "")]
        search: String,

        /// Exact category, or "all"
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Only products with stock remaining
        #[arg(long)]
        in_stock: bool,

        /// Sort mode: low, high, az, popular
        #[arg(long, default_value = "popular")]
        sort: String,
    },
    /// List the category options derived from the catalog
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove one unit of a product (removes the entry at zero)
    Decrement {
        /// Product id
        id: String,
    },
    /// Remove a product entirely
    Remove {
        /// Product id
        id: String,
    },
    /// Empty the cart
    Clear,
    /// Show the cart reconciled against the loaded catalog
    Show,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Compose the WhatsApp order message and deep link
    Message,
    /// Create a payment session and compose the message with its reference
    Pay,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Load { source } => commands::catalog::load(&source).await?,
            CatalogAction::List {
                search,
                category,
                in_stock,
                sort,
            } => commands::catalog::list(&search, &category, in_stock, &sort)?,
            CatalogAction::Categories => commands::catalog::categories()?,
        },
        Commands::Cart { action } => match action {
            CartAction::Add { id } => commands::cart::add(&id)?,
            CartAction::Decrement { id } => commands::cart::decrement(&id)?,
            CartAction::Remove { id } => commands::cart::remove(&id)?,
            CartAction::Clear => commands::cart::clear()?,
            CartAction::Show => commands::cart::show()?,
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Message => commands::checkout::message()?,
            CheckoutAction::Pay => commands::checkout::pay().await?,
        },
    }
    Ok(())
}
