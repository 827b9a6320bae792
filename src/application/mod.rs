//! Application layer: command handlers and the AI insight augmenter.

pub mod handlers;
pub mod insight_augmenter;

pub use insight_augmenter::InsightAugmenter;
