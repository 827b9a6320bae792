//! Report ownership check.
//!
//! Possession of the unguessable report identifier alone grants read access,
//! preserving links that carry no identity. Supplying a wrong email is
//! stricter than supplying none: a valid identifier with a mismatched email
//! is denied outright.

use serde::{Deserialize, Serialize};

/// Why an access decision came out the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessReason {
    /// Allowed on possession of the report identifier alone.
    UuidOnly,
    /// Allowed because the requester email matches the stored owner.
    OwnerMatch,
    /// Denied: an email was supplied and it does not match the owner.
    Denied,
}

/// The outcome of an ownership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessDecision {
    pub allowed: bool,
    pub reason: AccessReason,
}

impl AccessDecision {
    fn allow(reason: AccessReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    fn deny() -> Self {
        Self {
            allowed: false,
            reason: AccessReason::Denied,
        }
    }
}

/// Decides whether a request may read a report.
///
/// No requester email: allowed by identifier possession. No stored owner
/// email: any requester passes, also as identifier-only access. Otherwise
/// the requester email must equal the owner email case-insensitively.
pub fn check_access(requester_email: Option<&str>, owner_email: Option<&str>) -> AccessDecision {
    let requester = requester_email.map(str::trim).filter(|e| !e.is_empty());
    let owner = owner_email.map(str::trim).filter(|e| !e.is_empty());

    match (requester, owner) {
        (None, _) => AccessDecision::allow(AccessReason::UuidOnly),
        (Some(_), None) => AccessDecision::allow(AccessReason::UuidOnly),
        (Some(requester), Some(owner)) => {
            if requester.eq_ignore_ascii_case(owner) {
                AccessDecision::allow(AccessReason::OwnerMatch)
            } else {
                AccessDecision::deny()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_requester_email_passes_on_id_alone() {
        let decision = check_access(None, Some("owner@x.com"));
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::UuidOnly);
    }

    #[test]
    fn matching_email_is_case_insensitive() {
        let decision = check_access(Some("A@x.com"), Some("a@x.com"));
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::OwnerMatch);
    }

    #[test]
    fn wrong_email_is_denied_despite_valid_id() {
        let decision = check_access(Some("B@x.com"), Some("a@x.com"));
        assert!(!decision.allowed);
        assert_eq!(decision.reason, AccessReason::Denied);
    }

    #[test]
    fn missing_owner_email_lets_any_requester_through() {
        let decision = check_access(Some("anyone@x.com"), None);
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::UuidOnly);
    }

    #[test]
    fn blank_emails_are_treated_as_absent() {
        let decision = check_access(Some("  "), Some("a@x.com"));
        assert!(decision.allowed);
        assert_eq!(decision.reason, AccessReason::UuidOnly);
    }
}
