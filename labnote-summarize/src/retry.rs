//! Bounded linear backoff around a generator call

use std::time::Duration;

use crate::generator::{GenerationRequest, TextGenerator};
use crate::{Result, SummarizeError};

/// Attempts and backoff for one generation call
///
/// After failed attempt `n` the caller sleeps `min(step * n, cap)` before
/// trying again. No sleep follows the final attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub step: Duration,
    pub cap: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::with_attempts(3)
    }
}

impl RetryPolicy {
    pub fn with_attempts(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            step: Duration::from_secs(2),
            cap: Duration::from_secs(6),
        }
    }

    /// Backoff after failed attempt number `attempt` (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt).min(self.cap)
    }
}

/// Call `generator` until it returns non-empty text or attempts run out
pub async fn generate_with_retry<G>(
    generator: &G,
    request: &GenerationRequest,
    policy: &RetryPolicy,
) -> Result<String>
where
    G: TextGenerator + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut last_err = SummarizeError::EmptyResponse;

    for attempt in 1..=attempts {
        match generator.generate(request).await {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    if attempt > 1 {
                        tracing::debug!(attempt, "Generation succeeded after retry");
                    }
                    return Ok(text.to_string());
                }
                last_err = SummarizeError::EmptyResponse;
            }
            Err(e) => last_err = e,
        }

        if attempt < attempts {
            let delay = policy.delay_after(attempt);
            tracing::warn!(
                attempt,
                attempts,
                backoff_ms = delay.as_millis() as u64,
                "Generation failed: {}; retrying",
                last_err
            );
            tokio::time::sleep(delay).await;
        }
    }

    tracing::error!(attempts, "Generation failed: {}", last_err);
    Err(SummarizeError::RetriesExhausted {
        retries: attempts,
        last: Box::new(last_err),
    })
}
