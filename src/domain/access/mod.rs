//! Report access control: ownership checks and tier-proof tokens.

mod ownership;
mod tier_token;

pub use ownership::{check_access, AccessDecision, AccessReason};
pub use tier_token::{TierProof, TierTokenError, TierTokenSigner, MAX_TOKEN_AGE_MS};
