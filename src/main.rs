use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use matchpoint::api::state::AppState;
use matchpoint::config::AppConfig;
use matchpoint::models::User;
use matchpoint::storage::{JsonlStore, StorageConfig, UserRepository};

#[derive(Parser)]
#[command(name = "matchpoint")]
#[command(about = "Ping-pong match tracker with derived stats and leaderboards")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: String,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port number (overrides config)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Register a user (users are never created through the HTTP API)
    AddUser {
        /// User id, also shown as the player's name
        id: String,
    },

    /// List registered users
    ListUsers,
}

fn load_config(cli: &Cli) -> AppConfig {
    let path = PathBuf::from(&cli.config);
    let mut config = if path.exists() {
        match AppConfig::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", cli.config, e);
                std::process::exit(1);
            }
        }
    } else {
        AppConfig::default()
    };

    if let Some(ref data_dir) = cli.data_dir {
        config.data_dir = PathBuf::from(data_dir);
    }
    config
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = load_config(&cli);
    let store = Arc::new(JsonlStore::new(StorageConfig::new(config.data_dir.clone())));

    match cli.command {
        Commands::Serve { host, port } => {
            tracing::info!("Starting matchpoint v{}", env!("CARGO_PKG_VERSION"));

            let state = AppState::from_store(store);
            let app = matchpoint::api::build_router(state);

            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::AddUser { id } => {
            if store.get(&id).await?.is_some() {
                eprintln!("User \"{}\" already exists", id);
                std::process::exit(1);
            }
            store.insert(User::new(id.clone())).await?;
            println!("Added user \"{}\"", id);
        }
        Commands::ListUsers => {
            let users = store.list().await?;
            if users.is_empty() {
                println!("No users registered");
            } else {
                for user in users {
                    println!("{}", user.id);
                }
            }
        }
    }

    Ok(())
}
