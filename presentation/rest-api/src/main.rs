use dotenvy::dotenv;

mod api {
    pub mod actor;
    pub mod error;
    pub mod tags;
    pub mod health {
        pub mod routes;
    }
    pub mod cart {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod order {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
    pub mod stock {
        pub mod dto;
        pub mod error_mapper;
        pub mod routes;
    }
}
mod config {
    pub mod app_config;
    pub mod cart_config;
    pub mod cors_config;
    pub mod database_config;
    pub mod server_config;
}
mod setup {
    pub mod dependency_injection;
    pub mod server;
    pub mod sweep_schedule;
}

use config::{app_config::AppConfig, database_config};
use setup::{dependency_injection::DependencyContainer, server::Server};

/// REST API entry point
///
/// Initializes logging and configuration, wires the use cases over Postgres
/// and starts the HTTP server together with the cart expiry schedule.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Initialize tracing with RUST_LOG env filter
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    // 3. Load configuration
    let config = AppConfig::from_env()?;

    // 4. Initialize database
    let pool = database_config::init_database().await?;

    // 5. Wire dependencies
    let container = DependencyContainer::new(pool, config.cart.expiry_policy()?);

    // 6. Run server
    Server::run(config, container).await
}
