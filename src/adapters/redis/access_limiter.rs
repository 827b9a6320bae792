//! Redis-backed access attempt limiter.
//!
//! Uses a fixed-window counter with Redis INCR + EXPIRE, keyed by report
//! identifier, so attempt counts survive restarts and hold across instances.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::ReportId;
use crate::ports::{AccessAttemptLimiter, AttemptOutcome, LimiterError};

/// Redis-backed limiter for report access attempts.
///
/// Fixed-window counting:
/// 1. INCR the per-report key
/// 2. If the count is 1, EXPIRE the key for the window duration
/// 3. If the count exceeds the limit, the attempt is disallowed
///
/// Window boundaries can briefly admit slightly more than the limit; for
/// abuse throttling that slack is acceptable.
#[derive(Clone)]
pub struct RedisAccessLimiter {
    conn: MultiplexedConnection,
    limit: u32,
    window_secs: u32,
}

impl RedisAccessLimiter {
    /// Creates a limiter with the given per-window attempt limit.
    pub fn new(conn: MultiplexedConnection, limit: u32, window_secs: u32) -> Self {
        Self {
            conn,
            limit,
            window_secs,
        }
    }

    fn key_for(&self, report_id: &ReportId) -> String {
        format!("report_access:{}", report_id)
    }
}

#[async_trait]
impl AccessAttemptLimiter for RedisAccessLimiter {
    async fn register_attempt(
        &self,
        report_id: &ReportId,
    ) -> Result<AttemptOutcome, LimiterError> {
        let key = self.key_for(report_id);
        let mut conn = self.conn.clone();

        let count: i64 = conn
            .incr(&key, 1_i64)
            .await
            .map_err(|e: redis::RedisError| LimiterError::Unavailable(e.to_string()))?;

        // First attempt in the window starts its TTL.
        if count == 1 {
            conn.expire::<_, ()>(&key, self.window_secs as i64)
                .await
                .map_err(|e: redis::RedisError| LimiterError::Unavailable(e.to_string()))?;
        }

        let attempts = count.clamp(0, u32::MAX as i64) as u32;
        Ok(AttemptOutcome {
            allowed: attempts <= self.limit,
            attempts,
            limit: self.limit,
        })
    }
}

impl std::fmt::Debug for RedisAccessLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisAccessLimiter")
            .field("limit", &self.limit)
            .field("window_secs", &self.window_secs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    // Redis integration tests require a running Redis instance and are run
    // separately from unit tests:
    //
    // #[tokio::test]
    // #[ignore] // Run with: cargo test -- --ignored
    // async fn counts_attempts_within_a_window() {
    //     let client = redis::Client::open("redis://127.0.0.1/").unwrap();
    //     let conn = client.get_multiplexed_tokio_connection().await.unwrap();
    //     let limiter = RedisAccessLimiter::new(conn, 30, 60);
    //     // ... test code
    // }
}
