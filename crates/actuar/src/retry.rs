//! Bounded retry for transiently failing backend calls.

use std::thread;
use std::time::Duration;

use crate::result::{UiError, UiResult};

/// Retry budget with linear backoff.
///
/// Attempt `n` (1-based) sleeps `base_delay * n` before the next try, so a
/// 3-attempt budget at 150ms waits 150ms then 300ms between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Policy with an attempt budget and a backoff unit.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Budget for element reads that can hit transient detachment after
    /// navigation or DOM replacement.
    #[must_use]
    pub const fn stale_reads() -> Self {
        Self::new(3, Duration::from_millis(150))
    }

    /// The attempt budget.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `op`, retrying while `transient` classifies the error retryable.
    ///
    /// # Errors
    ///
    /// The final error from `op` once attempts are exhausted, or the first
    /// error `transient` rejects.
    pub fn run<T, F, P>(&self, mut op: F, transient: P) -> UiResult<T>
    where
        F: FnMut() -> UiResult<T>,
        P: Fn(&UiError) -> bool,
    {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && transient(&err) => {
                    tracing::debug!(attempt, error = %err, "transient failure, retrying");
                    thread::sleep(self.base_delay * attempt);
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stale() -> UiError {
        UiError::Stale {
            op: "read",
            selector: "#x".to_string(),
        }
    }

    mod budget_tests {
        use super::*;

        #[test]
        fn first_success_returns_immediately() {
            let policy = RetryPolicy::new(3, Duration::from_millis(1));
            let mut calls = 0;
            let result = policy.run(
                || {
                    calls += 1;
                    Ok(42)
                },
                UiError::is_stale,
            );
            assert_eq!(result.unwrap(), 42);
            assert_eq!(calls, 1);
        }

        #[test]
        fn recovers_within_budget() {
            let policy = RetryPolicy::new(3, Duration::from_millis(1));
            let mut calls = 0;
            let result = policy.run(
                || {
                    calls += 1;
                    if calls < 3 {
                        Err(stale())
                    } else {
                        Ok("text".to_string())
                    }
                },
                UiError::is_stale,
            );
            assert_eq!(result.unwrap(), "text");
            assert_eq!(calls, 3);
        }

        #[test]
        fn exhausted_budget_surfaces_the_last_error() {
            let policy = RetryPolicy::new(3, Duration::from_millis(1));
            let mut calls = 0;
            let result: UiResult<()> = policy.run(
                || {
                    calls += 1;
                    Err(stale())
                },
                UiError::is_stale,
            );
            assert!(result.unwrap_err().is_stale());
            assert_eq!(calls, 3);
        }
    }

    mod classification_tests {
        use super::*;

        #[test]
        fn non_transient_errors_fail_fast() {
            let policy = RetryPolicy::new(3, Duration::from_millis(1));
            let mut calls = 0;
            let result: UiResult<()> = policy.run(
                || {
                    calls += 1;
                    Err(UiError::NotFound {
                        op: "get_text",
                        selector: "#x".to_string(),
                    })
                },
                UiError::is_stale,
            );
            assert!(result.unwrap_err().is_not_found());
            assert_eq!(calls, 1);
        }

        #[test]
        fn stale_reads_budget_matches_the_read_policy() {
            let policy = RetryPolicy::stale_reads();
            assert_eq!(policy.max_attempts(), 3);
            assert_eq!(policy, RetryPolicy::new(3, Duration::from_millis(150)));
        }
    }
}
