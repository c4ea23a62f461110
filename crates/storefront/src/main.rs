//! # Storefront CLI
//!
//! Runs one store action against the configured backend and prints the resulting state as JSON.
//!
//! ```bash
//! storefront catalog --page 2 --in-stock --ordering price
//! storefront login -e alice@example.com -p secret-pass
//! storefront cart-add 12
//! storefront order "1 Main Street, Springfield"
//! RUST_LOG=storefront=debug storefront cart
//! ```
//!
//! The access token of the last login is kept in `STOREFRONT_STORAGE_PATH`, so commands that
//! need a signed-in user work across invocations.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::json;
use std::error::Error;
use std::process::ExitCode;
use store_framework::tracing::setup_tracing;
use store_framework::StoreHandle;
use storefront::config::StorefrontConfig;
use storefront::lifecycle::Storefront;
use storefront::model::{
    AccessToken, CartItemId, Credentials, ProductFilters, ProductId, ProductOrdering, Registration,
};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about = "Shop from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List one page of products
    Catalog {
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[command(flatten)]
        filters: FilterArgs,
    },
    /// List the product categories
    Categories,
    /// Search products by name or description
    Search { query: String },
    /// List the products of a category
    Category { slug: String },
    /// Show one product
    Product { id: u64 },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,

        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(short, long)]
        password: String,

        #[arg(long)]
        phone: Option<String>,

        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        date_of_birth: Option<NaiveDate>,
    },
    /// Sign in
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Show the signed-in user's profile
    Profile,
    /// Show the cart
    Cart,
    /// Add one unit of a product to the cart
    CartAdd { product_id: u64 },
    /// Set the quantity of a cart item
    CartUpdate { item_id: u64, quantity: u32 },
    /// Remove an item from the cart
    CartRemove { item_id: u64 },
    /// Empty the cart
    CartClear,
    /// Show the order history
    Orders,
    /// Order the contents of the cart
    Order { shipping_address: String },
    /// Sign out and forget the stored token
    Logout,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    min_price: Option<Decimal>,

    #[arg(long)]
    max_price: Option<Decimal>,

    /// Only products with stock left
    #[arg(long)]
    in_stock: bool,

    /// `price`, `-price`, `created_at` or `-created_at`
    #[arg(long)]
    ordering: Option<ProductOrdering>,
}

impl From<FilterArgs> for ProductFilters {
    fn from(args: FilterArgs) -> Self {
        Self {
            min_price: args.min_price,
            max_price: args.max_price,
            in_stock: args.in_stock,
            ordering: args.ordering,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    setup_tracing();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = StorefrontConfig::from_env()?;
    let shop = Storefront::from_config(&config)?;

    let outcome = execute(&shop, cli.command).await;

    // Pending relay work (e.g. the cart fetch after login) finishes before exit.
    shop.shutdown().await?;
    outcome
}

async fn execute(shop: &Storefront, command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Catalog { page, filters } => {
            let filters = ProductFilters::from(filters);
            let filtered = filters != ProductFilters::default();
            if filtered {
                shop.catalog.set_filters(filters).await?;
            }
            if !filtered || page != 1 {
                shop.catalog.fetch_page(page).await?;
            }
            print_json(&shop.catalog.snapshot())
        }
        Command::Categories => {
            let categories = shop.catalog.fetch_categories().await?;
            print_json(&categories)
        }
        Command::Search { query } => {
            shop.catalog.search(&query).await?;
            print_json(&shop.catalog.snapshot())
        }
        Command::Category { slug } => {
            shop.catalog.set_active_category(Some(slug)).await?;
            print_json(&shop.catalog.snapshot())
        }
        Command::Product { id } => {
            let product = shop.catalog.fetch_product(ProductId(id)).await?;
            print_json(&product)
        }
        Command::Register {
            email,
            first_name,
            last_name,
            password,
            phone,
            date_of_birth,
        } => {
            let password = SecretString::from(password);
            let profile = shop
                .session
                .register(Registration {
                    email,
                    first_name,
                    last_name,
                    phone,
                    date_of_birth,
                    password_confirm: password.clone(),
                    password,
                })
                .await?;
            print_json(&profile)
        }
        Command::Login { email, password } => {
            let profile = shop.session.login(Credentials::new(email, password)).await?;
            info!(user = %profile.id, "Signed in");
            print_json(&profile)
        }
        Command::Profile => {
            let profile = shop.session.fetch_profile().await?;
            print_json(&profile)
        }
        Command::Cart => {
            shop.cart.fetch(token(shop)?).await?;
            print_json(&shop.cart.snapshot())
        }
        Command::CartAdd { product_id } => {
            shop.cart.add(ProductId(product_id), token(shop)?).await?;
            print_json(&shop.cart.snapshot())
        }
        Command::CartUpdate { item_id, quantity } => {
            shop.cart
                .update_quantity(CartItemId(item_id), quantity, token(shop)?)
                .await?;
            print_json(&shop.cart.snapshot())
        }
        Command::CartRemove { item_id } => {
            shop.cart
                .remove_item(CartItemId(item_id), token(shop)?)
                .await?;
            print_json(&shop.cart.snapshot())
        }
        Command::CartClear => {
            // The clear request names the cart owner, so load the cart first.
            let token = token(shop)?;
            shop.cart.fetch(token.clone()).await?;
            shop.cart.clear(token).await?;
            print_json(&shop.cart.snapshot())
        }
        Command::Orders => {
            shop.orders.fetch_orders(token(shop)?).await?;
            print_json(&shop.orders.snapshot())
        }
        Command::Order { shipping_address } => {
            let order = shop
                .orders
                .create_order(&shipping_address, token(shop)?)
                .await?;
            print_json(&order)
        }
        Command::Logout => {
            shop.session.logout().await?;
            print_json(&json!({ "is_logged_in": false }))
        }
    }
}

fn token(shop: &Storefront) -> Result<AccessToken, Box<dyn Error>> {
    shop.session
        .token()
        .ok_or_else(|| "Not signed in, run `storefront login` first".into())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
