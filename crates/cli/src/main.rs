//! KitchenMart CLI - inspect and edit the persisted cart and wishlist.
//!
//! Reads the same environment as the storefront server, so it operates on
//! the server's data directory unless `STOREFRONT_DATA_DIR` says otherwise.
//!
//! # Usage
//!
//! ```bash
//! # Print the cart with line totals and subtotal
//! km-cli show cart
//!
//! # Run a storefront action as if its button were pressed
//! km-cli dispatch add-to-cart --id knife-set --title "Knife Set" --price "KSh 1,200"
//! km-cli dispatch empty-cart-btn --confirmed
//!
//! # Print the WhatsApp order link for the current cart
//! km-cli checkout-url
//!
//! # Forget the wishlist
//! km-cli clear wishlist
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand, ValueEnum};
use kitchenmart_storefront::config::StorefrontConfig;

mod commands;

#[derive(Parser)]
#[command(name = "km-cli")]
#[command(author, version, about = "KitchenMart CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the persisted cart or wishlist
    Show {
        #[arg(value_enum)]
        collection: Collection,
    },
    /// Run a storefront action against the persisted state
    Dispatch {
        /// Action name (`add-to-cart`, `like-btn`, `quantity-increase`, ...)
        action: String,

        /// Product id
        #[arg(long)]
        id: Option<String>,

        /// Product title, as shown on its card
        #[arg(long)]
        title: Option<String>,

        /// Product price, as shown on its card (e.g. "KSh 1,200")
        #[arg(long)]
        price: Option<String>,

        /// Product image URL
        #[arg(long)]
        image: Option<String>,

        /// Confirm a destructive action
        #[arg(long)]
        confirmed: bool,
    },
    /// Print the order message and hand-off link for the current cart
    CheckoutUrl,
    /// Remove everything from the cart, the wishlist, or both
    Clear {
        #[arg(value_enum, default_value = "all")]
        collection: ClearTarget,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Collection {
    Cart,
    Wishlist,
}

#[derive(Clone, Copy, ValueEnum)]
enum ClearTarget {
    Cart,
    Wishlist,
    All,
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    match cli.command {
        Commands::Show { collection } => match collection {
            Collection::Cart => commands::show::cart(&config)?,
            Collection::Wishlist => commands::show::wishlist(&config)?,
        },
        Commands::Dispatch {
            action,
            id,
            title,
            price,
            image,
            confirmed,
        } => {
            let input = commands::dispatch::input(id.as_deref(), title, price, image, confirmed)?;
            commands::dispatch::run(&config, &action, &input)?;
        }
        Commands::CheckoutUrl => commands::checkout::url(&config)?,
        Commands::Clear { collection } => {
            let (cart, wishlist) = match collection {
                ClearTarget::Cart => (true, false),
                ClearTarget::Wishlist => (false, true),
                ClearTarget::All => (true, true),
            };
            commands::clear::run(&config, cart, wishlist)?;
        }
    }
    Ok(())
}
