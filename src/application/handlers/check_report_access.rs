//! CheckReportAccessHandler - Composes the rate limiter, ownership check,
//! and tier-proof validation into one guarded report read.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::domain::access::{check_access, AccessReason, TierProof, TierTokenError, TierTokenSigner};
use crate::domain::foundation::{ErrorCode, ReportId};
use crate::domain::report::{Report, ReportTier};
use crate::ports::{AccessAttemptLimiter, ReportRepository};

/// Command to read a report through the access controller.
#[derive(Debug, Clone)]
pub struct CheckReportAccessCommand {
    pub report_id: ReportId,
    /// Requester identity, when the link carries one.
    pub requester_email: Option<String>,
    /// Bearer tier-proof token, when the flow is tier-gated.
    pub tier_proof: Option<String>,
    /// Minimum tier the proof must cover, for tier-gated flows.
    pub required_tier: Option<ReportTier>,
}

/// A granted read, with why it was granted.
#[derive(Debug, Clone)]
pub struct ReportAccessGrant {
    pub report: Report,
    pub reason: AccessReason,
    pub proof: Option<TierProof>,
}

/// Why an access check failed. Every variant fails closed.
#[derive(Debug, Clone, Error)]
pub enum AccessCheckError {
    #[error("report {0} not found")]
    NotFound(ReportId),

    #[error("too many access attempts")]
    RateLimited,

    #[error("requester email does not match the report owner")]
    Denied,

    #[error("tier proof rejected: {0}")]
    InvalidProof(#[from] TierTokenError),

    #[error("proof covers {proven} but {required} is required")]
    TierMismatch {
        required: ReportTier,
        proven: ReportTier,
    },

    #[error("report store unavailable: {0}")]
    Store(String),
}

impl AccessCheckError {
    /// Stable code for wire serialization.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccessCheckError::NotFound(_) => ErrorCode::ReportNotFound,
            AccessCheckError::RateLimited => ErrorCode::RateLimited,
            AccessCheckError::Denied => ErrorCode::AccessDenied,
            AccessCheckError::InvalidProof(TierTokenError::Expired) => ErrorCode::ExpiredTierProof,
            AccessCheckError::InvalidProof(_) => ErrorCode::InvalidTierProof,
            AccessCheckError::TierMismatch { .. } => ErrorCode::TierMismatch,
            AccessCheckError::Store(_) => ErrorCode::DatabaseError,
        }
    }
}

/// Handler for guarded report reads.
pub struct CheckReportAccessHandler {
    repository: Arc<dyn ReportRepository>,
    limiter: Arc<dyn AccessAttemptLimiter>,
    signer: Arc<TierTokenSigner>,
}

impl CheckReportAccessHandler {
    pub fn new(
        repository: Arc<dyn ReportRepository>,
        limiter: Arc<dyn AccessAttemptLimiter>,
        signer: Arc<TierTokenSigner>,
    ) -> Self {
        Self {
            repository,
            limiter,
            signer,
        }
    }

    pub async fn handle(
        &self,
        cmd: CheckReportAccessCommand,
    ) -> Result<ReportAccessGrant, AccessCheckError> {
        // 1. Count the attempt. An unavailable limiter must not take report
        //    access down with it, so that failure is logged and waved through.
        match self.limiter.register_attempt(&cmd.report_id).await {
            Ok(outcome) if !outcome.allowed => {
                warn!(
                    report_id = %cmd.report_id,
                    attempts = outcome.attempts,
                    limit = outcome.limit,
                    "access attempt limit exceeded"
                );
                return Err(AccessCheckError::RateLimited);
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    report_id = %cmd.report_id,
                    error = %err,
                    "attempt limiter unavailable; proceeding unthrottled"
                );
            }
        }

        // 2. Load the report.
        let report = self
            .repository
            .find_by_id(&cmd.report_id)
            .await
            .map_err(|err| AccessCheckError::Store(err.to_string()))?
            .ok_or(AccessCheckError::NotFound(cmd.report_id))?;

        // 3. Ownership check.
        let decision = check_access(cmd.requester_email.as_deref(), report.owner_email.as_deref());
        if !decision.allowed {
            info!(report_id = %cmd.report_id, "access denied by ownership check");
            return Err(AccessCheckError::Denied);
        }

        // 4. Tier gate. A required tier with no proof at all is rejected the
        //    same way as a bad signature; both fail closed.
        let proof = match (cmd.required_tier, cmd.tier_proof.as_deref()) {
            (None, _) => None,
            (Some(_), None) => return Err(TierTokenError::Malformed.into()),
            (Some(required), Some(token)) => {
                let proof = self.signer.validate(token)?;
                if proof.tier.rank() < required.rank() {
                    return Err(AccessCheckError::TierMismatch {
                        required,
                        proven: proof.tier,
                    });
                }
                Some(proof)
            }
        };

        Ok(ReportAccessGrant {
            report,
            reason: decision.reason,
            proof,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{
        seeded_report_with, AllowAllLimiter, DenyingLimiter, InMemoryReportRepository,
    };

    const SECRET: &str = "access-handler-test-secret";

    fn signer() -> Arc<TierTokenSigner> {
        Arc::new(TierTokenSigner::new(SECRET))
    }

    async fn handler_with_owner(
        owner_email: Option<&str>,
    ) -> (CheckReportAccessHandler, ReportId) {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report_with(
            &repository,
            ReportTier::Blueprint,
            None,
            owner_email.map(str::to_string),
        )
        .await;
        let handler =
            CheckReportAccessHandler::new(repository, Arc::new(AllowAllLimiter), signer());
        (handler, report.id)
    }

    #[tokio::test]
    async fn id_possession_alone_grants_read() {
        let (handler, report_id) = handler_with_owner(Some("owner@x.com")).await;

        let grant = handler
            .handle(CheckReportAccessCommand {
                report_id,
                requester_email: None,
                tier_proof: None,
                required_tier: None,
            })
            .await
            .unwrap();

        assert_eq!(grant.reason, AccessReason::UuidOnly);
    }

    #[tokio::test]
    async fn wrong_email_is_denied() {
        let (handler, report_id) = handler_with_owner(Some("owner@x.com")).await;

        let err = handler
            .handle(CheckReportAccessCommand {
                report_id,
                requester_email: Some("intruder@x.com".into()),
                tier_proof: None,
                required_tier: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccessCheckError::Denied));
    }

    #[tokio::test]
    async fn valid_proof_at_required_tier_passes_the_gate() {
        let (handler, report_id) = handler_with_owner(Some("owner@x.com")).await;
        let token = TierTokenSigner::new(SECRET).issue(ReportTier::Blueprint, "owner@x.com");

        let grant = handler
            .handle(CheckReportAccessCommand {
                report_id,
                requester_email: Some("OWNER@x.com".into()),
                tier_proof: Some(token),
                required_tier: Some(ReportTier::Blueprint),
            })
            .await
            .unwrap();

        assert_eq!(grant.reason, AccessReason::OwnerMatch);
        assert_eq!(grant.proof.unwrap().tier, ReportTier::Blueprint);
    }

    #[tokio::test]
    async fn proof_below_required_tier_is_a_mismatch() {
        let (handler, report_id) = handler_with_owner(None).await;
        let token = TierTokenSigner::new(SECRET).issue(ReportTier::Snapshot, "buyer@x.com");

        let err = handler
            .handle(CheckReportAccessCommand {
                report_id,
                requester_email: None,
                tier_proof: Some(token),
                required_tier: Some(ReportTier::Blueprint),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccessCheckError::TierMismatch { .. }));
    }

    #[tokio::test]
    async fn missing_proof_for_gated_flow_fails_closed() {
        let (handler, report_id) = handler_with_owner(None).await;

        let err = handler
            .handle(CheckReportAccessCommand {
                report_id,
                requester_email: None,
                tier_proof: None,
                required_tier: Some(ReportTier::SnapshotPlus),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccessCheckError::InvalidProof(_)));
    }

    #[tokio::test]
    async fn exceeded_attempt_limit_blocks_before_the_read() {
        let repository = Arc::new(InMemoryReportRepository::new());
        let report = seeded_report_with(&repository, ReportTier::Snapshot, None, None).await;
        let handler =
            CheckReportAccessHandler::new(repository, Arc::new(DenyingLimiter), signer());

        let err = handler
            .handle(CheckReportAccessCommand {
                report_id: report.id,
                requester_email: None,
                tier_proof: None,
                required_tier: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AccessCheckError::RateLimited));
    }

    #[test]
    fn expired_proofs_get_their_own_code() {
        let expired = AccessCheckError::InvalidProof(TierTokenError::Expired);
        assert_eq!(expired.code(), ErrorCode::ExpiredTierProof);
        assert_eq!(AccessCheckError::RateLimited.code(), ErrorCode::RateLimited);
    }
}
