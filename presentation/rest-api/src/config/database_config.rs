use anyhow::Context;
use persistence::db::{DatabaseConfig, create_postgres_pool, run_migrations};
use sqlx::PgPool;
use std::env;

/// Initialize database connection pool from environment variables
///
/// Environment variables:
/// - DATABASE_URL: PostgreSQL connection string (required)
/// - DATABASE_MAX_CONNECTIONS: pool size (default: 5)
/// - RUN_MIGRATIONS: apply pending migrations on startup (default: true)
/// - MIGRATIONS_PATH: migrations directory (default: "infrastructure/persistence/migrations")
///
/// # Errors
/// Returns error if DATABASE_URL is not set, the connection fails or a migration fails
pub async fn init_database() -> anyhow::Result<PgPool> {
    let db_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {raw}"))?,
        Err(_) => 5,
    };

    let pool = create_postgres_pool(&DatabaseConfig::new(db_url, max_connections)).await?;

    if migrations_enabled(env::var("RUN_MIGRATIONS").ok().as_deref()) {
        let path = env::var("MIGRATIONS_PATH")
            .unwrap_or_else(|_| "infrastructure/persistence/migrations".to_string());
        run_migrations(&pool, &path).await?;
    }

    Ok(pool)
}

fn migrations_enabled(flag: Option<&str>) -> bool {
    !matches!(
        flag.map(|f| f.trim().to_ascii_lowercase()).as_deref(),
        Some("false" | "0" | "no")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_run_migrations_unless_disabled() {
        assert!(migrations_enabled(None));
        assert!(migrations_enabled(Some("true")));
        assert!(!migrations_enabled(Some("FALSE")));
        assert!(!migrations_enabled(Some("0")));
    }
}
