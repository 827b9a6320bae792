//! Signed tier-proof tokens.
//!
//! A tier-proof token lets a just-purchased customer into a tier-gated flow
//! without a full login system. It is a bearer capability, not an identity:
//! whoever holds it may act on it until it expires. Expiry is deliberately
//! generous (24 hours) to tolerate checkout-redirect delays.
//!
//! Format: `base64url(JSON claims) + "." + base64url(HMAC-SHA256(secret, payload_b64))`.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::domain::foundation::Timestamp;
use crate::domain::report::ReportTier;

/// Maximum token age before validation rejects it.
pub const MAX_TOKEN_AGE_MS: i64 = 24 * 60 * 60 * 1000;

/// Validated proof that a tier was purchased by the holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierProof {
    pub tier: ReportTier,
    pub email: String,
}

/// Validation failures. All of them fail closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TierTokenError {
    #[error("token is malformed")]
    Malformed,

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    tier: ReportTier,
    email: String,
    issued_at_ms: i64,
}

/// Issues and validates tier-proof tokens with a shared HMAC secret.
pub struct TierTokenSigner {
    secret: String,
}

impl TierTokenSigner {
    /// Creates a signer with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issues a token for a tier purchase, stamped with the current time.
    pub fn issue(&self, tier: ReportTier, email: &str) -> String {
        self.issue_at(tier, email, Timestamp::now())
    }

    /// Issues a token with an explicit issue time.
    pub fn issue_at(&self, tier: ReportTier, email: &str, issued_at: Timestamp) -> String {
        let claims = TokenClaims {
            tier,
            email: email.to_string(),
            issued_at_ms: issued_at.as_unix_millis(),
        };
        // Claims serialization cannot fail for this struct.
        let json = serde_json::to_vec(&claims).unwrap_or_default();
        let payload = URL_SAFE_NO_PAD.encode(json);
        let signature = URL_SAFE_NO_PAD.encode(self.compute_mac(payload.as_bytes()));
        format!("{}.{}", payload, signature)
    }

    /// Validates a token against the current time.
    pub fn validate(&self, token: &str) -> Result<TierProof, TierTokenError> {
        self.validate_at(token, Timestamp::now())
    }

    /// Validates a token against an explicit "now".
    ///
    /// The signature is checked before the payload is decoded, using a
    /// constant-time comparison so validation leaks no timing information
    /// about the expected signature.
    pub fn validate_at(&self, token: &str, now: Timestamp) -> Result<TierProof, TierTokenError> {
        let (payload, signature_b64) = token.split_once('.').ok_or(TierTokenError::Malformed)?;
        let provided = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TierTokenError::Malformed)?;

        let expected = self.compute_mac(payload.as_bytes());
        if !constant_time_compare(&expected, &provided) {
            return Err(TierTokenError::InvalidSignature);
        }

        let json = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TierTokenError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&json).map_err(|_| TierTokenError::Malformed)?;

        if now.as_unix_millis() - claims.issued_at_ms > MAX_TOKEN_AGE_MS {
            return Err(TierTokenError::Expired);
        }

        Ok(TierProof {
            tier: claims.tier,
            email: claims.email,
        })
    }

    fn compute_mac(&self, payload: &[u8]) -> Vec<u8> {
        let mut mac =
            Hmac::<Sha256>::new_from_slice(self.secret.as_bytes()).expect("HMAC accepts any key");
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
