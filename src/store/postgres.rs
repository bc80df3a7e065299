//! PostgreSQL-backed vote store.
//!
//! # Schema
//! ```sql
//! CREATE TABLE votes (
//!     id         BIGSERIAL PRIMARY KEY,
//!     team       TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT now()
//! );
//! ```
//!
//! The table is created if missing at startup. There is no migration
//! tooling; schema changes are out of scope.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Row;

use super::{StoreError, VoteStore};
use crate::config::DatabaseConfig;
use crate::votes::TeamCount;

const CREATE_VOTES_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS votes (
        id BIGSERIAL PRIMARY KEY,
        team TEXT NOT NULL,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
"#;

pub struct PgVoteStore {
    pool: PgPool,
}

impl PgVoteStore {
    /// Build the pool without opening a connection.
    ///
    /// Only a malformed connection string fails here; reachability is
    /// checked separately through [`VoteStore::ping`].
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_lazy(&config.url)?;

        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_VOTES_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl VoteStore for PgVoteStore {
    async fn insert_vote(&self, team: &str) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO votes (team) VALUES ($1)")
            .bind(team)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn counts_by_team(&self) -> Result<Vec<TeamCount>, StoreError> {
        let rows = sqlx::query("SELECT team, COUNT(*) AS count FROM votes GROUP BY team")
            .fetch_all(&self.pool)
            .await?;

        let mut counts = Vec::with_capacity(rows.len());
        for row in rows {
            counts.push(TeamCount {
                team: row.try_get("team")?,
                count: row.try_get("count")?,
            });
        }
        Ok(counts)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
