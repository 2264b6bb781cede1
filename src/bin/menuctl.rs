use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use menu_admin::menu::{self, Category};
use menu_admin::notify::ConsoleNotifier;
use menu_admin::{
    Config, ImageFile, ImageHostClient, MenuItemDraft, MenuItemSubmissionWorkflow, PublicHttpClient,
    SecureHttpClient,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "menuctl", about = "Admin CLI for the restaurant menu", version)]
struct Cli {
    /// Override PUBLIC_API_URL
    #[arg(global = true, long)]
    public_url: Option<String>,

    /// Override SECURE_API_URL
    #[arg(global = true, long)]
    secure_url: Option<String>,

    /// Print the effective environment before running
    #[arg(global = true, long)]
    show_env: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Upload an image and add a new menu item
    Add {
        /// Recipe name
        #[arg(long)]
        name: String,
        /// Category value (see `menuctl categories`)
        #[arg(long)]
        category: Category,
        /// Price, e.g. 120 or 99.5
        #[arg(long)]
        price: String,
        /// Recipe details
        #[arg(long)]
        recipe: Option<String>,
        /// Image file to host
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Show the categories the form accepts
    Categories {
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// List the current menu (no credentials needed)
    List {
        /// Output raw JSON instead of pretty lines
        #[arg(long)]
        json: bool,
    },
    /// Host an image without creating a menu item
    Upload {
        #[arg(value_name = "PATH")]
        image: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    Config::dotenv_load();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    if cli.show_env {
        Config::print_env_vars();
    }

    if let Commands::Categories { json } = cli.command {
        for category in Category::ALL {
            if json {
                println!("{}", serde_json::json!({"value": category.as_str(), "label": category.label()}));
            } else {
                println!("{:<8} {}", category.as_str(), category.label());
            }
        }
        return Ok(());
    }

    let mut conf = match Config::new() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };
    if let Some(url) = cli.public_url {
        conf.public_api_url = url;
    }
    if let Some(url) = cli.secure_url {
        conf.secure_api_url = url;
    }

    let public = PublicHttpClient::new(conf.public_api_url.clone());

    match cli.command {
        Commands::Add { name, category, price, recipe, image } => {
            let image_host = image_host_or_exit(&conf, &public);
            let image = ImageFile::from_path(&image).await?;
            let mut draft = MenuItemDraft {
                name,
                category: Some(category),
                price,
                recipe,
                image: Some(image),
            };

            let backend = Arc::new(SecureHttpClient::new(conf.secure_api_url.clone(), conf.access_token.clone()));
            let workflow = MenuItemSubmissionWorkflow::new(image_host, backend, Arc::new(ConsoleNotifier));
            match workflow.submit(&mut draft).await {
                Ok(record) => {
                    println!("{}", serde_json::to_string_pretty(&record)?);
                    Ok(())
                }
                Err(_) => std::process::exit(1),
            }
        }
        Commands::List { json } => {
            let entries = menu::list_menu(&public).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            for entry in entries {
                if json {
                    println!("{}", serde_json::json!({
                        "id": entry.id,
                        "name": entry.name,
                        "category": entry.category,
                        "price": entry.price,
                        "recipe": entry.recipe,
                        "image": entry.image,
                    }));
                } else {
                    println!("{:<24} {:<10} {:>8.2}", entry.name, entry.category, entry.price);
                }
            }
            Ok(())
        }
        Commands::Upload { image } => {
            let image_host = image_host_or_exit(&conf, &public);
            let image = ImageFile::from_path(&image).await?;
            let hosted = image_host.upload(&image).await.map_err(|e| {
                eprintln!("Error: {}", e);
                e
            })?;
            println!("{}", hosted.display_url);
            if let Some(delete_url) = hosted.delete_url {
                eprintln!("delete: {}", delete_url);
            }
            Ok(())
        }
        Commands::Categories { .. } => Ok(()),
    }
}

/// Only `add` and `upload` talk to the image host, so only they need its key.
fn image_host_or_exit(conf: &Config, public: &PublicHttpClient) -> ImageHostClient {
    match conf.require_image_hosting_key() {
        Ok(key) => ImageHostClient::new(public.clone(), conf.image_hosting_url.clone(), key),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
