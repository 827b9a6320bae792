//! Brand Compass - Tiered Brand Diagnostic Engine
//!
//! This crate implements the scoring, entitlement, and access-control core of
//! a tiered brand diagnostic product: intake answers are scored into five
//! pillar scores, the weakest pillar is surfaced as the customer's primary
//! opportunity, and progressively richer report tiers are built by merging
//! forward already-computed content rather than rescoring.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
