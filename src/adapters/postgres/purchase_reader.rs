//! PostgreSQL implementation of PurchaseReader.
//!
//! The purchases table is written by the payment webhook flow outside this
//! crate; the engine only reads it.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::billing::{PurchaseRecord, PurchaseStatus};
use crate::domain::foundation::{CustomerId, Timestamp};
use crate::domain::report::ReportTier;
use crate::ports::{PurchaseReader, RepositoryError};

/// PostgreSQL implementation of the PurchaseReader port.
pub struct PostgresPurchaseReader {
    pool: PgPool,
}

impl PostgresPurchaseReader {
    /// Creates a reader on the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PurchaseRow {
    customer_id: String,
    tier: String,
    status: String,
    purchased_at: DateTime<Utc>,
}

impl TryFrom<PurchaseRow> for PurchaseRecord {
    type Error = RepositoryError;

    fn try_from(row: PurchaseRow) -> Result<Self, Self::Error> {
        let customer_id = CustomerId::new(row.customer_id)
            .map_err(|e| RepositoryError::corrupted(format!("invalid customer_id: {}", e)))?;
        let tier = ReportTier::ALL
            .into_iter()
            .find(|t| t.key() == row.tier)
            .ok_or_else(|| RepositoryError::corrupted(format!("invalid tier value: {}", row.tier)))?;
        let status = parse_status(&row.status)?;

        Ok(PurchaseRecord {
            customer_id,
            tier,
            status,
            purchased_at: Timestamp::from_datetime(row.purchased_at),
        })
    }
}

fn parse_status(s: &str) -> Result<PurchaseStatus, RepositoryError> {
    match s {
        "paid" => Ok(PurchaseStatus::Paid),
        "pending" => Ok(PurchaseStatus::Pending),
        "failed" => Ok(PurchaseStatus::Failed),
        "refunded" => Ok(PurchaseStatus::Refunded),
        _ => Err(RepositoryError::corrupted(format!(
            "invalid status value: {}",
            s
        ))),
    }
}

#[async_trait]
impl PurchaseReader for PostgresPurchaseReader {
    async fn history(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Vec<PurchaseRecord>, RepositoryError> {
        let rows: Vec<PurchaseRow> = sqlx::query_as(
            r#"
            SELECT customer_id, tier, status, purchased_at
            FROM purchases
            WHERE customer_id = $1
            ORDER BY purchased_at DESC
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        rows.into_iter().map(PurchaseRecord::try_from).collect()
    }
}
