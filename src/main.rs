use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use parking_system::config::{Config, StoreKind};
use parking_system::dao::{InMemoryStore, ParkingSpotDao, TicketDao};
use parking_system::services::ParkingService;
use parking_system::shell;
use parking_system::utils::error::AppResult;
use parking_system::utils::input_reader::StdinInputReader;

#[tokio::main]
async fn main() {
    dotenv().ok();
    init_tracing();

    if let Err(e) = run().await {
        e.log();
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // stdout belongs to the operator shell
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> AppResult<()> {
    let config = Config::from_env()?;
    let input = StdinInputReader::new();

    match config.store {
        StoreKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            tracing::info!("Successfully connected to database");

            sqlx::migrate!().run(&pool).await?;
            tracing::info!("Migrations run successfully");

            let service = ParkingService::new(
                input,
                ParkingSpotDao::new(pool.clone()),
                TicketDao::new(pool),
            )
            .with_recurring_threshold(config.recurring_threshold);
            shell::run(&service).await;
        }
        StoreKind::Memory => {
            tracing::warn!("Using in-memory store, records are lost on shutdown");
            let store = InMemoryStore::with_default_layout();
            let service = ParkingService::new(input, store.clone(), store)
                .with_recurring_threshold(config.recurring_threshold);
            shell::run(&service).await;
        }
    }

    Ok(())
}
