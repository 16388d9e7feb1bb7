use std::sync::Arc;

use clap::Parser;
use migration::{Migrator, MigratorTrait};
use poem::{listener::TcpListener, Route, Server};
use poem_openapi::OpenApiService;
use sea_orm::{Database, DatabaseConnection};

use microblog_backend::api::{
    HealthApi, MicropostsApi, RelationshipsApi, SessionsApi, UsersApi,
};
use microblog_backend::app_data::AppData;
use microblog_backend::cli::{seed, Cli, Commands};
use microblog_backend::config::{init_logging, AppConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    init_logging()?;

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let db = connect_and_migrate(&config).await?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Migrate => {
            // Migrations already ran above
            tracing::info!("Migrations completed");
            Ok(())
        }
        Commands::Seed(args) => {
            let app_data = AppData::new(db, &config);
            seed::seed_database(&app_data, &args).await
        }
        Commands::Serve => serve(db, &config).await,
    }
}

async fn connect_and_migrate(config: &AppConfig) -> Result<DatabaseConnection, Box<dyn std::error::Error>> {
    let db: DatabaseConnection = Database::connect(&config.database_url).await?;
    tracing::info!(database_url = %config.database_url, "Connected to database");

    Migrator::up(&db, None).await?;
    tracing::info!("Database migrations completed");

    Ok(db)
}

async fn serve(db: DatabaseConnection, config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let app_data = Arc::new(AppData::new(db, config));

    let api_service = OpenApiService::new(
        (
            HealthApi,
            SessionsApi::new(app_data.clone()),
            UsersApi::new(app_data.clone()),
            MicropostsApi::new(app_data.clone()),
            RelationshipsApi::new(app_data.clone()),
        ),
        "Microblog API",
        env!("CARGO_PKG_VERSION"),
    )
    .server(format!("http://{}/api", config.bind_addr));

    // Generate Swagger UI from OpenAPI service
    let ui = api_service.swagger_ui();

    // Compose routes: nest API service under /api and Swagger UI under /swagger
    let app = Route::new().nest("/api", api_service).nest("/swagger", ui);

    tracing::info!(bind_addr = %config.bind_addr, "Starting server");
    tracing::info!("Swagger UI available under /swagger");

    Server::new(TcpListener::bind(&config.bind_addr))
        .run(app)
        .await?;

    Ok(())
}
