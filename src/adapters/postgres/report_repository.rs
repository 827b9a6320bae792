//! PostgreSQL implementation of ReportRepository.
//!
//! Scalar fields live in typed columns; the structured score, insight, and
//! section content is stored as JSONB.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{CustomerId, ReportId, Timestamp};
use crate::domain::pillar::{BrandStage, PillarPriority, PillarScores};
use crate::domain::report::{
    PillarInsights, Report, ReportTier, ScoreSnapshot, TierSections,
};
use crate::ports::{ReportRepository, RepositoryError};

/// PostgreSQL implementation of the ReportRepository port.
///
/// Uses sqlx for type-safe database operations with connection pooling.
pub struct PostgresReportRepository {
    pool: PgPool,
}

impl PostgresReportRepository {
    /// Creates a repository on the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a report.
#[derive(Debug, sqlx::FromRow)]
struct ReportRow {
    id: Uuid,
    customer_id: Option<String>,
    owner_email: Option<String>,
    tier: String,
    stage: String,
    scores: serde_json::Value,
    priority: serde_json::Value,
    insights: serde_json::Value,
    recommendations: serde_json::Value,
    context_coverage: i16,
    sections: serde_json::Value,
    score_history: serde_json::Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    finalized_at: Option<DateTime<Utc>>,
}

impl TryFrom<ReportRow> for Report {
    type Error = RepositoryError;

    fn try_from(row: ReportRow) -> Result<Self, Self::Error> {
        let tier = parse_tier(&row.tier)?;
        let stage = parse_stage(&row.stage)?;
        let customer_id = row
            .customer_id
            .map(CustomerId::new)
            .transpose()
            .map_err(|e| RepositoryError::corrupted(format!("invalid customer_id: {}", e)))?;

        let scores: PillarScores = from_json(row.scores, "scores")?;
        let priority: PillarPriority = from_json(row.priority, "priority")?;
        let insights: PillarInsights = from_json(row.insights, "insights")?;
        let recommendations: Vec<String> = from_json(row.recommendations, "recommendations")?;
        let sections: TierSections = from_json(row.sections, "sections")?;
        let score_history: Vec<ScoreSnapshot> = from_json(row.score_history, "score_history")?;

        Ok(Report {
            id: ReportId::from_uuid(row.id),
            customer_id,
            owner_email: row.owner_email,
            tier,
            scores,
            stage,
            priority,
            insights,
            recommendations,
            context_coverage: row.context_coverage.clamp(0, 100) as u8,
            sections,
            score_history,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
            finalized_at: row.finalized_at.map(Timestamp::from_datetime),
        })
    }
}

fn parse_tier(s: &str) -> Result<ReportTier, RepositoryError> {
    ReportTier::ALL
        .into_iter()
        .find(|t| t.key() == s)
        .ok_or_else(|| RepositoryError::corrupted(format!("invalid tier value: {}", s)))
}

fn parse_stage(s: &str) -> Result<BrandStage, RepositoryError> {
    match s {
        "early" => Ok(BrandStage::Early),
        "scaling" => Ok(BrandStage::Scaling),
        "established" => Ok(BrandStage::Established),
        _ => Err(RepositoryError::corrupted(format!(
            "invalid stage value: {}",
            s
        ))),
    }
}

fn from_json<T: serde::de::DeserializeOwned>(
    value: serde_json::Value,
    field: &str,
) -> Result<T, RepositoryError> {
    serde_json::from_value(value)
        .map_err(|e| RepositoryError::corrupted(format!("invalid {}: {}", field, e)))
}

fn to_json<T: serde::Serialize>(value: &T, field: &str) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(value)
        .map_err(|e| RepositoryError::corrupted(format!("unserializable {}: {}", field, e)))
}

fn stage_to_string(stage: BrandStage) -> &'static str {
    match stage {
        BrandStage::Early => "early",
        BrandStage::Scaling => "scaling",
        BrandStage::Established => "established",
    }
}

#[async_trait]
impl ReportRepository for PostgresReportRepository {
    async fn find_by_id(&self, id: &ReportId) -> Result<Option<Report>, RepositoryError> {
        let row: Option<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, owner_email, tier, stage, scores, priority,
                   insights, recommendations, context_coverage, sections,
                   score_history, created_at, updated_at, finalized_at
            FROM reports
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        row.map(Report::try_from).transpose()
    }

    async fn find_latest_by_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<Option<Report>, RepositoryError> {
        let row: Option<ReportRow> = sqlx::query_as(
            r#"
            SELECT id, customer_id, owner_email, tier, stage, scores, priority,
                   insights, recommendations, context_coverage, sections,
                   score_history, created_at, updated_at, finalized_at
            FROM reports
            WHERE customer_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(customer_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        row.map(Report::try_from).transpose()
    }

    async fn insert(&self, report: &Report) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO reports (
                id, customer_id, owner_email, tier, stage, scores, priority,
                insights, recommendations, context_coverage, sections,
                score_history, created_at, updated_at, finalized_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.customer_id.as_ref().map(|c| c.as_str()))
        .bind(&report.owner_email)
        .bind(report.tier.key())
        .bind(stage_to_string(report.stage))
        .bind(to_json(&report.scores, "scores")?)
        .bind(to_json(&report.priority, "priority")?)
        .bind(to_json(&report.insights, "insights")?)
        .bind(to_json(&report.recommendations, "recommendations")?)
        .bind(report.context_coverage as i16)
        .bind(to_json(&report.sections, "sections")?)
        .bind(to_json(&report.score_history, "score_history")?)
        .bind(report.created_at.as_datetime())
        .bind(report.updated_at.as_datetime())
        .bind(report.finalized_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        Ok(())
    }

    async fn save(&self, report: &Report) -> Result<(), RepositoryError> {
        sqlx::query(
            r#"
            UPDATE reports SET
                customer_id = $2, owner_email = $3, tier = $4, stage = $5,
                scores = $6, priority = $7, insights = $8, recommendations = $9,
                context_coverage = $10, sections = $11, score_history = $12,
                updated_at = $13, finalized_at = $14
            WHERE id = $1
            "#,
        )
        .bind(report.id.as_uuid())
        .bind(report.customer_id.as_ref().map(|c| c.as_str()))
        .bind(&report.owner_email)
        .bind(report.tier.key())
        .bind(stage_to_string(report.stage))
        .bind(to_json(&report.scores, "scores")?)
        .bind(to_json(&report.priority, "priority")?)
        .bind(to_json(&report.insights, "insights")?)
        .bind(to_json(&report.recommendations, "recommendations")?)
        .bind(report.context_coverage as i16)
        .bind(to_json(&report.sections, "sections")?)
        .bind(to_json(&report.score_history, "score_history")?)
        .bind(report.updated_at.as_datetime())
        .bind(report.finalized_at.map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        Ok(())
    }

    async fn finalize_if_unfinalized(
        &self,
        id: &ReportId,
        finalized_at: Timestamp,
    ) -> Result<bool, RepositoryError> {
        // Conditional write: two racing finalizers both succeed, and exactly
        // one of them observes rows_affected == 1.
        let result = sqlx::query(
            r#"
            UPDATE reports
            SET finalized_at = $2, updated_at = $2
            WHERE id = $1 AND finalized_at IS NULL
            "#,
        )
        .bind(id.as_uuid())
        .bind(finalized_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::unavailable(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_and_stage_round_trip_through_their_keys() {
        for tier in ReportTier::ALL {
            assert_eq!(parse_tier(tier.key()).unwrap(), tier);
        }
        for stage in [
            BrandStage::Early,
            BrandStage::Scaling,
            BrandStage::Established,
        ] {
            assert_eq!(parse_stage(stage_to_string(stage)).unwrap(), stage);
        }
    }

    #[test]
    fn unknown_tier_value_is_corrupted_data() {
        let err = parse_tier("platinum").unwrap_err();
        assert!(matches!(err, RepositoryError::Corrupted(_)));
    }
}
