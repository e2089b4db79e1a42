use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Exponential-backoff retry for batch-level I/O calls.
///
/// One initial attempt plus up to `max_retries` re-attempts, with the delay
/// doubling (by default) before each. Classification of what is worth
/// retrying is the caller's: `run` takes an explicit `is_transient`
/// predicate instead of retrying every error kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_backoff_factor")]
    pub backoff_factor: u32,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_ms() -> u64 {
    150
}

fn default_backoff_factor() -> u32 {
    2
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_factor: default_backoff_factor(),
        }
    }
}

impl RetryPolicy {
    /// Run `op`, retrying transient failures with exponential backoff.
    /// The last error is re-raised once attempts are exhausted or the
    /// failure is not transient.
    pub async fn run<T, E, F, Fut>(
        &self,
        label: &str,
        is_transient: impl Fn(&E) -> bool,
        mut op: F,
    ) -> Result<T, E>
    where
        E: std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut delay = Duration::from_millis(self.initial_delay_ms);
        let mut attempt: u32 = 0;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    attempt += 1;
                    if attempt > self.max_retries {
                        log::warn!("{} failed, retries exhausted: {}", label, err);
                        return Err(err);
                    }
                    if !is_transient(&err) {
                        log::warn!("{} failed with non-transient error: {}", label, err);
                        return Err(err);
                    }
                    log::warn!(
                        "{} failed (attempt {} of {}), retrying in {:?}: {}",
                        label,
                        attempt,
                        self.max_retries + 1,
                        delay,
                        err
                    );
                    tokio::time::sleep(delay).await;
                    delay *= self.backoff_factor;
                }
            }
        }
    }
}
