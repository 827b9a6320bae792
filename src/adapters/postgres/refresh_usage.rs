//! PostgreSQL implementation of RefreshUsageTracker.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::CustomerId;
use crate::ports::{RefreshUsageTracker, RepositoryError};

/// PostgreSQL implementation of the RefreshUsageTracker port.
///
/// One row per customer; the upsert makes each completed cycle an atomic
/// increment even under concurrent completions.
pub struct PostgresRefreshUsageTracker {
    pool: PgPool,
}

impl PostgresRefreshUsageTracker {
    /// Creates a tracker on the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RefreshUsageTracker for PostgresRefreshUsageTracker {
    async fn record_completed_cycle(
        &self,
        customer_id: &CustomerId,
    ) -> Result<u64, RepositoryError> {
        let (count,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO refresh_usage (customer_id, completed_cycles, updated_at)
            VALUES ($1, 1, NOW())
            ON CONFLICT (customer_id)
            DO UPDATE SET completed_cycles = refresh_usage.completed_cycles + 1,
                          updated_at = NOW()
            RETURNING completed_cycles
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        Ok(count.max(0) as u64)
    }

    async fn completed_cycles(&self, customer_id: &CustomerId) -> Result<u64, RepositoryError> {
        let count: Option<(i64,)> = sqlx::query_as(
            r#"
            SELECT completed_cycles FROM refresh_usage WHERE customer_id = $1
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        Ok(count.map(|(c,)| c.max(0) as u64).unwrap_or(0))
    }
}
