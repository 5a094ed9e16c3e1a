use std::sync::Arc;

use clap::{Parser, Subcommand};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gallery_kit::config::{init_config, Config, StorageBackend};
use gallery_kit::middleware::auth::{issue_token, Role};
use gallery_kit::routes::create_routes;
use gallery_kit::services::s3::S3FileStore;
use gallery_kit::services::storage::{FileStore, LocalFileStore};
use gallery_kit::state::AppState;

#[derive(Parser)]
#[command(name = "gallery-kit", about = "Art gallery catalog service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run pending migrations and serve the API (default)
    Serve,
    /// Run pending migrations and exit
    Migrate,
    /// Print a back-office bearer token
    Token {
        #[arg(long)]
        username: String,
        #[arg(long, default_value_t = 12)]
        hours: i64,
        #[arg(long, value_enum, default_value_t = TokenRole::Admin)]
        role: TokenRole,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum TokenRole {
    Admin,
    Su,
}

impl From<TokenRole> for Role {
    fn from(role: TokenRole) -> Self {
        match role {
            TokenRole::Admin => Role::Admin,
            TokenRole::Su => Role::Su,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gallery_kit=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = init_config()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Token { username, hours, role } => {
            let token = issue_token(&config.jwt_secret, &username, role.into(), hours)?;
            println!("{}", token);
        }
        Command::Migrate => {
            connect(config).await?;
            tracing::info!("Migrations applied");
        }
        Command::Serve => serve(config).await?,
    }

    Ok(())
}

async fn connect(config: &Config) -> Result<DatabaseConnection, Box<dyn std::error::Error>> {
    let db = Database::connect(config.database_url.as_str()).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

async fn serve(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let db = connect(config).await?;

    let files: Arc<dyn FileStore> = match config.storage_backend {
        StorageBackend::Local => {
            tracing::info!(root = %config.media_root.display(), "Using local media storage");
            Arc::new(LocalFileStore::new(&config.media_root, &config.media_url))
        }
        StorageBackend::S3 => {
            let s3 = S3FileStore::new(config).await;
            s3.ensure_bucket_exists().await?;
            Arc::new(s3)
        }
    };

    let state = AppState::from_config(db, files, config);
    let mut app = create_routes(state);
    if config.storage_backend == StorageBackend::Local && config.media_url.starts_with('/') {
        app = app.nest_service(&config.media_url, ServeDir::new(&config.media_root));
    }
    let app = app
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
