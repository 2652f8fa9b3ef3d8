use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eboutic::{Basket, BasketClient, Config, FileJar, SyncedBasket, CSRF_COOKIE};

#[derive(Parser)]
#[command(name = "eboutic", about = "Basket client for the eboutic web shop")]
struct Cli {
    /// Override the cookie jar location from the config file
    #[arg(long, global = true)]
    cookie_file: Option<PathBuf>,

    /// Override the backend base URL from the config file
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the basket contents and total
    Show,
    /// Add one unit of a product to the local basket
    Add {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
    /// Remove one unit of a product from the local basket
    Remove { id: u32 },
    /// Empty the local basket
    Clear,
    /// Server-confirmed mutations
    #[command(subcommand)]
    Sync(SyncCommand),
}

#[derive(Subcommand)]
enum SyncCommand {
    /// Add one unit of a product, committing only on server confirmation
    Add {
        id: u32,
        #[arg(long)]
        name: String,
        #[arg(long)]
        price: f64,
    },
    /// Remove one unit of a product, committing only on server confirmation
    Remove { id: u32 },
    /// Empty both the server-side and the local basket
    Clear,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = Config::load().context("Load configuration")?;
    if let Some(cookie_file) = cli.cookie_file {
        config.cookie_file = cookie_file;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }

    let jar = FileJar::open(&config.cookie_file);
    let mut basket = Basket::initialize(Box::new(jar), None)
        .context("Initialize basket from cookie storage")?
        .with_cookie_max_age(config.cookie_max_age);

    match cli.command {
        Command::Show => print_basket(&basket),
        Command::Add { id, name, price } => {
            basket.add_from_catalog(id, &name, price)?;
            print_basket(&basket);
        }
        Command::Remove { id } => {
            basket.remove(id)?;
            print_basket(&basket);
        }
        Command::Clear => {
            basket.clear();
            print_basket(&basket);
        }
        Command::Sync(operation) => {
            let csrf_token = basket
                .jar()
                .get(CSRF_COOKIE)
                .context("No csrftoken cookie; log in through the web shop first")?;
            let client = BasketClient::new(&config.base_url, csrf_token);
            let mut synced = SyncedBasket::new(basket, client);
            match operation {
                SyncCommand::Add { id, name, price } => synced.add(id, &name, price).await?,
                SyncCommand::Remove { id } => synced.remove(id).await?,
                SyncCommand::Clear => synced.clear().await?,
            }
            print_basket(synced.basket());
        }
    }

    Ok(())
}

fn print_basket(basket: &Basket) {
    if basket.items().is_empty() {
        println!("Basket is empty");
        return;
    }
    for item in basket.items() {
        println!(
            "{:>3} x {:<30} {:>8.2}",
            item.quantity,
            item.name,
            item.subtotal()
        );
    }
    println!("Total: {:.2}", basket.total());
}
