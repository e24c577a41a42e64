/// Song Info Finder - MP3 metadata lookup and tagging server
use clap::{Parser, Subcommand};
use songinfo_core::Reconciler;
use songinfo_metadata::LoftyTagStore;
use songinfo_server::{config::ServerConfig, create_router, state::AppState};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "songinfo-server")]
#[command(about = "Look up and fix MP3 metadata against the iTunes catalog", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "SONGINFO_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Print the tags of an audio file as JSON
    Inspect {
        /// Audio file to read
        path: PathBuf,
        /// Configuration file path
        #[arg(short, long, env = "SONGINFO_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "songinfo_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::Inspect { path, config } => {
            inspect(&path, config)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Song Info Finder");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);
    tracing::info!("Catalog: {}", config.catalog.base_url);

    let app_state = AppState::from_config(&config)?;
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn inspect(path: &std::path::Path, config_path: Option<PathBuf>) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    let reconciler = Reconciler::new(Arc::new(LoftyTagStore::new()))
        .with_allowed_extensions(config.search.allowed_extensions.clone());
    let record = reconciler.build_tag_record(path)?;

    println!("{}", serde_json::to_string_pretty(&record.view())?);
    Ok(())
}
