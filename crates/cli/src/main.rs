//! Storefront Mobile CLI - drive the cart store from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Add a product to the current cart
//! sm-cli cart add --id 1 --title "Fjallraven Backpack" --price 109.95 \
//!     --image https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg
//!
//! # Show cart contents and total
//! sm-cli cart show
//!
//! # Change quantity (0 or less removes the line)
//! sm-cli cart set-qty 1 3
//!
//! # Sign in as a user; the cart switches to that user's saved cart
//! sm-cli login --id 1 --name "Leanne Graham" --username Bret --email Sincere@april.biz
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and edit the cart of the current identity
//! - `login` / `logout` / `whoami` - Manage the signed-in user
//!
//! Configuration is read from the environment; see
//! [`storefront_mobile_cart::config`].

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use sentry::integrations::tracing as sentry_tracing;
use storefront_mobile_cart::CartConfig;
use storefront_mobile_core::ProductId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "sm-cli")]
#[command(author, version, about = "Storefront mobile cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and edit the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in as a user
    Login {
        /// User ID
        #[arg(long)]
        id: i64,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Username
        #[arg(short, long)]
        username: String,

        /// Email address
        #[arg(short, long)]
        email: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
}

#[derive(Subcommand)]
enum CartAction {
    /// List lines and the total
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID (number or string)
        #[arg(long)]
        id: ProductId,

        /// Product title
        #[arg(short, long)]
        title: String,

        /// Unit price
        #[arg(short, long)]
        price: Decimal,

        /// Image URI
        #[arg(short, long, default_value = "")]
        image: String,
    },
    /// Remove a line
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set the quantity of a line (below 1 removes it)
    SetQty {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = CartConfig::from_env().expect("Failed to load configuration");

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "sm_cli=info,storefront_mobile_cart=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    if let Err(e) = run(cli, &config).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let client = commands::Client::open(config).await?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&client),
            CartAction::Add {
                id,
                title,
                price,
                image,
            } => commands::cart::add(&client, id, title, price, image).await,
            CartAction::Remove { id } => commands::cart::remove(&client, &id).await,
            CartAction::SetQty { id, quantity } => {
                commands::cart::set_quantity(&client, &id, quantity).await;
            }
        },
        Commands::Login {
            id,
            name,
            username,
            email,
        } => commands::session::login(&client, id, name, username, &email).await?,
        Commands::Logout => commands::session::logout(&client).await,
        Commands::Whoami => commands::session::whoami(&client),
    }

    client.cart.flush().await;
    Ok(())
}
