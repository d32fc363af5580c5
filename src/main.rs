use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use prerender::config::{load_config, AppConfig};
use prerender::lifecycle::{signals, startup, Shutdown};
use prerender::markup::build_fragment;
use prerender::observability::{logging, metrics};
use prerender::render::{try_execute, HandlerRegistry};
use prerender::HttpServer;

#[derive(Parser)]
#[command(name = "prerender")]
#[command(about = "Pre-render client routes and serve them", long_about = None)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Pre-render and serve (default)
    Serve,
    /// Print the discovered route table as JSON
    Routes,
    /// Run one handler and print its fragment as JSON
    Render {
        /// Handler name
        handler: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    logging::init(&config.observability);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::Routes => {
            let table = startup::load_route_table(&config)?;
            println!("{}", serde_json::to_string_pretty(&table)?);
            Ok(())
        }
        Commands::Render { handler } => {
            let mut registry = HandlerRegistry::new();
            startup::load_bundle(&config, &mut registry)?;
            let tree = try_execute(&registry, &handler)?;
            println!("{}", serde_json::to_string_pretty(&build_fragment(&tree))?);
            Ok(())
        }
    }
}

async fn serve(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "prerender starting");

    let site = startup::prepare(&config, HandlerRegistry::new())?;

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        request_timeout_secs = config.timeouts.request_secs,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, site);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
