//! # Extractor
//!
//! Turns a free-text order message into an [`ExtractedOrder`] by asking the
//! completion service to fill in a JSON schema.
//!
//! Each attempt is one `generate` call followed by cleansing
//! ([`cleanse::json_candidate`]) and JSON parsing. Only rate-limit errors are
//! retried, after a fixed delay, up to [`RetryPolicy::max_attempts`] calls in
//! total. A parse failure or any other service error ends extraction on the
//! spot.
//!
//! The extractor does not check `items`; converting the result into an
//! [`Order`](crate::model::Order) is the caller's validation step.

pub mod cleanse;
pub mod error;
pub mod prompt;

pub use error::*;

use crate::model::ExtractedOrder;
use crate::services::{CompletionError, CompletionService};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// How often and how patiently to retry a rate-limited completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total number of calls, the first one included.
    pub max_attempts: u32,
    /// Fixed wait between a rate-limited call and the next one.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Longest an extraction can take when every call runs for `per_call`.
    pub fn worst_case(&self, per_call: Duration) -> Duration {
        let attempts = self.max_attempts.max(1);
        per_call
            .saturating_mul(attempts)
            .saturating_add(self.delay.saturating_mul(attempts - 1))
    }
}

/// Message-to-order extraction over an injected completion service.
#[derive(Clone)]
pub struct Extractor {
    completion: Arc<dyn CompletionService>,
    retry: RetryPolicy,
}

impl Extractor {
    pub fn new(completion: Arc<dyn CompletionService>, retry: RetryPolicy) -> Self {
        Self { completion, retry }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Extracts an order from `message`, retrying on rate limits.
    #[instrument(skip(self, message), fields(message_len = message.len()))]
    pub async fn extract(&self, message: &str) -> Result<ExtractedOrder, ExtractError> {
        let prompt = prompt::build_prompt(message);
        let max_attempts = self.retry.max_attempts.max(1);

        let mut attempt = 0;
        loop {
            attempt += 1;
            debug!(attempt, "Requesting completion");
            match self.attempt(&prompt).await {
                Ok(order) => {
                    info!(attempt, "Order extracted");
                    return Ok(order);
                }
                Err(ExtractError::RateLimited(reason)) => {
                    if attempt >= max_attempts {
                        warn!(attempt, %reason, "Rate limited, no attempts left");
                        return Err(ExtractError::Exhausted { attempts: attempt });
                    }
                    warn!(attempt, %reason, delay = ?self.retry.delay, "Rate limited, retrying");
                    tokio::time::sleep(self.retry.delay).await;
                }
                Err(e) => {
                    warn!(attempt, error = %e, "Extraction failed");
                    return Err(e);
                }
            }
        }
    }

    async fn attempt(&self, prompt: &str) -> Result<ExtractedOrder, ExtractError> {
        let text = self.completion.generate(prompt).await.map_err(|e| match e {
            CompletionError::RateLimited(reason) => ExtractError::RateLimited(reason),
            CompletionError::Failed(reason) => ExtractError::Failed(reason),
        })?;
        debug!(%text, "Completion received");

        let candidate = cleanse::json_candidate(&text);
        serde_json::from_str(candidate)
            .map_err(|e| ExtractError::Failed(format!("completion is not order JSON: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PaymentMode;
    use crate::services::mock::MockCompletion;
    use serde_json::json;

    fn extractor(mock: &MockCompletion) -> Extractor {
        Extractor::new(mock.service(), RetryPolicy::default())
    }

    fn assert_waited(started: tokio::time::Instant, expected: Duration) {
        let waited = started.elapsed();
        assert!(
            waited >= expected && waited < expected + Duration::from_millis(50),
            "waited {waited:?}, expected {expected:?}"
        );
    }

    fn rate_limited() -> CompletionError {
        CompletionError::RateLimited("429 Too Many Requests".to_string())
    }

    #[tokio::test]
    async fn test_fenced_response_is_parsed() {
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_ok(
            "```json\n{\"customer_name\": \"Ravi\", \"payment_mode\": \"UPI\", \"items\": [{\"item\": \"Chicken\", \"quantity\": 2, \"unit\": \"kg\", \"price\": 240, \"total_price\": 480}]}\n```",
        );

        let order = extractor(&mock).extract("2kg chicken, Ravi, UPI").await.unwrap();

        assert_eq!(order.customer_name, "Ravi");
        assert_eq!(order.payment_mode, PaymentMode::Upi);
        assert_eq!(order.items[0]["item"], json!("Chicken"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_plain_response_equals_parsed_json() {
        let body = r#"{"customer_name": "Asha", "payment_mode": "Card", "items": [{"item": "Fish", "quantity": 1, "unit": "kg", "price": 350, "total_price": 350}]}"#;
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_ok(body);

        let order = extractor(&mock).extract("1kg fish").await.unwrap();

        let expected: ExtractedOrder = serde_json::from_str(body).unwrap();
        assert_eq!(order, expected);
    }

    #[tokio::test]
    async fn test_prompt_embeds_message() {
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_ok(r#"{"items": []}"#);

        extractor(&mock).extract("half kg mutton").await.unwrap();

        assert!(mock.prompts()[0].contains("half kg mutton"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_three_rate_limits_exhaust_retries() {
        let mut mock = MockCompletion::new();
        for _ in 0..3 {
            mock.expect_generate().return_err(rate_limited());
        }

        let started = tokio::time::Instant::now();
        let result = extractor(&mock).extract("2kg chicken").await;

        assert_eq!(result, Err(ExtractError::Exhausted { attempts: 3 }));
        assert_eq!(mock.calls(), 3);
        assert_waited(started, Duration::from_secs(10));
        mock.verify();
    }

    #[tokio::test(start_paused = true)]
    async fn test_rate_limit_then_success() {
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_err(rate_limited());
        mock.expect_generate().return_ok(r#"{"customer_name": "A", "items": []}"#);

        let started = tokio::time::Instant::now();
        let order = extractor(&mock).extract("eggs").await.unwrap();

        assert_eq!(order.customer_name, "A");
        assert_eq!(mock.calls(), 2);
        assert_waited(started, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_error_fails_immediately() {
        let mut mock = MockCompletion::new();
        mock.expect_generate()
            .return_err(CompletionError::Failed("500 Internal".to_string()));

        let started = tokio::time::Instant::now();
        let result = extractor(&mock).extract("eggs").await;

        assert!(matches!(result, Err(ExtractError::Failed(msg)) if msg.contains("500")));
        assert_eq!(mock.calls(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_malformed_json_is_not_retried() {
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_ok("I could not find an order in that message.");

        let result = extractor(&mock).extract("hello").await;

        assert!(matches!(result, Err(ExtractError::Failed(_))));
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_policy_limits_attempts() {
        let mut mock = MockCompletion::new();
        mock.expect_generate().return_err(rate_limited());
        mock.expect_generate().return_err(rate_limited());
        let extractor = Extractor::new(
            mock.service(),
            RetryPolicy {
                max_attempts: 2,
                delay: Duration::from_millis(250),
            },
        );

        let started = tokio::time::Instant::now();
        let result = extractor.extract("fish").await;

        assert_eq!(result, Err(ExtractError::Exhausted { attempts: 2 }));
        assert_waited(started, Duration::from_millis(250));
    }

    #[test]
    fn test_worst_case_covers_every_call_and_delay() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.worst_case(Duration::from_secs(60)), Duration::from_secs(190));

        let single = RetryPolicy {
            max_attempts: 0,
            delay: Duration::from_secs(5),
        };
        assert_eq!(single.worst_case(Duration::from_secs(60)), Duration::from_secs(60));
    }
}
