//! Shop CLI - a terminal storefront.
//!
//! Commands:
//! - `shop products` / `shop product <slug>` - Browse the catalog
//! - `shop categories` / `shop brands` - List taxonomies
//! - `shop deals` - Featured deals and discounted products
//! - `shop cart ...` - Manage the persisted cart
//! - `shop login` / `shop register` / `shop logout` / `shop whoami` - Account
//! - `shop checkout` - Shipping, payment and review
//! - `shop orders` - Order history
//! - `shop config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::{
    CartArgs, CheckoutArgs, ConfigArgs, DealsArgs, LoginArgs, OrdersArgs, ProductArgs,
    ProductsArgs, RegisterArgs,
};

/// Shop CLI - browse the catalog, fill a cart and check out
#[derive(Parser)]
#[command(name = "shop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// List categories
    Categories,

    /// List brands
    Brands,

    /// Show featured deals
    Deals(DealsArgs),

    /// Manage the cart
    Cart(CartArgs),

    /// Sign in
    Login(LoginArgs),

    /// Create an account
    Register(RegisterArgs),

    /// Sign out
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Check out the cart
    Checkout(CheckoutArgs),

    /// List past orders
    Orders(OrdersArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

fn init_tracing(default_level: &str, verbose: bool, json: bool) {
    let fallback = if verbose { "debug" } else { default_level };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup output formatting
    let output = output::Output::new(cli.verbose, cli.json);

    // Load config; the log level comes from it
    let loaded = match context::LoadedConfig::find(cli.config.as_deref()) {
        Ok(loaded) => loaded,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    init_tracing(&loaded.config.log.level, cli.verbose, cli.json);

    let ctx = match context::Context::open(loaded, output.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            output.error(&format!("{:#}", e));
            std::process::exit(1);
        }
    };

    // Execute command
    let result = match cli.command {
        Commands::Products(args) => commands::products::list(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Categories => commands::products::categories(&ctx).await,
        Commands::Brands => commands::products::brands(&ctx).await,
        Commands::Deals(args) => commands::deals::run(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Login(args) => commands::account::login(args, &ctx).await,
        Commands::Register(args) => commands::account::register(args, &ctx).await,
        Commands::Logout => commands::account::logout(&ctx).await,
        Commands::Whoami => commands::account::whoami(&ctx).await,
        Commands::Checkout(args) => commands::checkout::run(args, &ctx).await,
        Commands::Orders(args) => commands::orders::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
