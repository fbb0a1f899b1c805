use crate::config::DatabaseConfig;
use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool, Pool, Postgres};
use time::{Duration, OffsetDateTime};

#[derive(Clone)]
pub struct Database {
    pub(crate) pool: Pool<Postgres>,
}

/// Common methods for the primary database, extensions are implemented separately in every module.
impl Database {
    /// Opens database "connection".
    pub async fn create(pool: PgPool) -> anyhow::Result<Self> {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .with_context(|| "Failed to migrate database")?;

        Ok(Database { pool })
    }

    /// Connects to the database described by the config and runs migrations.
    pub async fn connect(config: &DatabaseConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.connection_url())
            .await
            .with_context(|| {
                format!(
                    "Failed to connect to `{}` database at {}:{}",
                    config.name, config.host, config.port
                )
            })?;

        Self::create(pool).await
    }

    /// Returns current UTC time, truncated to microseconds to match the database precision.
    pub fn utc_now() -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();
        now - Duration::nanoseconds(i64::from(now.nanosecond() % 1_000))
    }
}
