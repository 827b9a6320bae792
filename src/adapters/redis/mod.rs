//! Redis adapters.

mod access_limiter;

pub use access_limiter::RedisAccessLimiter;
