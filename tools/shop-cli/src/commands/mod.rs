//! CLI command implementations.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod deals;
pub mod orders;
pub mod products;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Only this category (slug).
    #[arg(long)]
    pub category: Option<String>,

    /// Only this brand (slug).
    #[arg(long)]
    pub brand: Option<String>,

    /// Minimum current price.
    #[arg(long)]
    pub min_price: Option<String>,

    /// Maximum current price.
    #[arg(long)]
    pub max_price: Option<String>,

    /// Search text.
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort order: featured, price-low, price-high, rating.
    #[arg(long, default_value = "featured")]
    pub sort: String,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug.
    pub slug: String,

    /// Also list related products.
    #[arg(long)]
    pub related: bool,
}

/// Arguments for the deals command.
#[derive(Args)]
pub struct DealsArgs {
    /// Skip the discounted product list.
    #[arg(long)]
    pub no_products: bool,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

/// Cart subcommands.
#[derive(Subcommand)]
pub enum CartCommand {
    /// Show the cart (default).
    Show,

    /// Add a product by slug.
    Add {
        /// Product slug.
        slug: String,

        /// Quantity to add.
        #[arg(short, long, default_value_t = 1)]
        quantity: i64,
    },

    /// Set a line's quantity; zero or less removes it.
    Set {
        /// Product id.
        id: String,

        /// New quantity.
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },

    /// Increase a line's quantity by one.
    Inc {
        /// Product id.
        id: String,
    },

    /// Decrease a line's quantity by one.
    Dec {
        /// Product id.
        id: String,
    },

    /// Remove a line.
    Remove {
        /// Product id.
        id: String,
    },

    /// Empty the cart.
    Clear {
        /// Skip confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },

    /// Move a line to the saved-for-later list.
    SaveForLater {
        /// Product id.
        id: String,
    },
}

/// Arguments for the login command.
#[derive(Args)]
pub struct LoginArgs {
    /// Account email (prompted when omitted).
    #[arg(short, long)]
    pub email: Option<String>,

    /// Read the password from this environment variable instead of prompting.
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,
}

/// Arguments for the register command.
#[derive(Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,
}

/// Arguments for the checkout command.
#[derive(Args)]
pub struct CheckoutArgs {
    /// Shipping address id (default: the preselected one).
    #[arg(long)]
    pub address: Option<String>,

    /// Billing address id, when different from shipping.
    #[arg(long)]
    pub billing_address: Option<String>,

    /// Shipping method: standard or express.
    #[arg(long)]
    pub shipping: Option<String>,

    /// Payment method: credit_card or paypal.
    #[arg(long)]
    pub payment: Option<String>,

    /// Coupon code.
    #[arg(long)]
    pub coupon: Option<String>,

    /// Card number.
    #[arg(long)]
    pub card_number: Option<String>,

    /// Name on card.
    #[arg(long)]
    pub card_name: Option<String>,

    /// Card expiry (MM/YY).
    #[arg(long)]
    pub card_expiry: Option<String>,

    /// Card CVC.
    #[arg(long)]
    pub card_cvc: Option<String>,

    /// Do not prompt; use flags and defaults.
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the orders command.
#[derive(Args)]
pub struct OrdersArgs {
    /// Show a single order by number.
    pub number: Option<String>,

    /// Page number.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Orders per page.
    #[arg(long, default_value_t = 10)]
    pub page_size: u32,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Write a default shop.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
}
