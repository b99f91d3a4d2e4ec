use crate::error::{DriveError, Result};
use backon::{BlockingRetryable, ConstantBuilder};
use diagnostics::*;
use std::cell::Cell;
use std::time::Duration;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

/// Fixed-delay retry settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first failed attempt
    pub retries: u32,
    /// Pause before each retry
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: DEFAULT_RETRIES,
            delay: DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(retries: u32, delay: Duration) -> Self {
        Self { retries, delay }
    }

    pub fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.delay)
            .with_max_times(self.retries as usize)
    }

    /// Run `op` with a fresh budget until it succeeds, fails with a
    /// non-retryable error, or the budget runs out.
    ///
    /// The budget belongs to this call. An operation made of several
    /// requests (a paginated listing) shares it by resuming inside `op`
    /// from where the last attempt stopped.
    pub fn retry<T, F>(&self, operation: &str, mut op: F) -> Result<T>
    where
        F: FnMut() -> Result<T>,
    {
        let attempts = Cell::new(0u32);
        let retries = self.retries;

        let outcome = (|| {
            attempts.set(attempts.get() + 1);
            op()
        })
        .retry(self.backoff())
        .sleep(std::thread::sleep)
        .when(DriveError::is_retryable)
        .notify(|err: &DriveError, _delay: Duration| {
            let remaining = retries.saturating_sub(attempts.get());
            let error = err.to_string();
            warn!(
                "{operation} failed, retrying ({remaining} retries left): {error}",
                operation: operation,
                remaining: remaining,
                error: error
            );
        })
        .call();

        match outcome {
            Ok(value) => Ok(value),
            Err(err) if err.is_retryable() => Err(DriveError::RetryBudgetExhausted {
                operation: operation.to_string(),
                attempts: attempts.get(),
                source: Box::new(err),
            }),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn quick(retries: u32) -> RetryPolicy {
        RetryPolicy::new(retries, Duration::ZERO)
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.retries, 3);
        assert_eq!(policy.delay, Duration::from_secs(3));
    }

    #[test]
    fn test_succeeds_after_failures() {
        let mut calls = 0;
        let result = quick(3).retry("list files", || {
            calls += 1;
            if calls <= 2 {
                Err(DriveError::transient("HTTP 503"))
            } else {
                Ok(calls)
            }
        });
        assert_eq!(result.expect("third attempt succeeds"), 3);
    }

    #[test]
    fn test_exhaustion_reports_attempts() {
        let mut calls = 0;
        let result: Result<()> = quick(3).retry("list files", || {
            calls += 1;
            Err(DriveError::transient("HTTP 401"))
        });
        assert_eq!(calls, 4);
        match result {
            Err(DriveError::RetryBudgetExhausted {
                operation,
                attempts,
                source,
            }) => {
                assert_eq!(operation, "list files");
                assert_eq!(attempts, 4);
                assert!(matches!(*source, DriveError::Transient { .. }));
            }
            other => panic!("expected exhaustion, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_retries_is_one_attempt() {
        let mut calls = 0;
        let result: Result<()> = quick(0).retry("resolve", || {
            calls += 1;
            Err(DriveError::not_found("p1"))
        });
        assert_eq!(calls, 1);
        assert!(matches!(
            result,
            Err(DriveError::RetryBudgetExhausted { attempts: 1, .. })
        ));
    }

    #[test]
    fn test_non_retryable_fails_fast() {
        let mut calls = 0;
        let result: Result<()> = quick(3).retry("resolve", || {
            calls += 1;
            Err(DriveError::config("broken"))
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(DriveError::Config { .. })));
    }

    #[test]
    fn test_budget_shared_by_resuming_op() {
        // Two steps, each failing twice: four failures exceed three retries
        let mut step = 0;
        let mut failures = [2, 2];
        let result = quick(3).retry("list files", || {
            while step < failures.len() {
                if failures[step] > 0 {
                    failures[step] -= 1;
                    return Err(DriveError::transient("timeout"));
                }
                step += 1;
            }
            Ok(())
        });
        assert!(matches!(
            result,
            Err(DriveError::RetryBudgetExhausted { attempts: 4, .. })
        ));
        assert_eq!(step, 1);
    }

    #[test]
    fn test_fresh_budget_per_call() {
        let policy = quick(1);
        for _ in 0..2 {
            let mut failed = false;
            policy
                .retry("resolve", || {
                    if failed {
                        Ok(())
                    } else {
                        failed = true;
                        Err(DriveError::transient("x"))
                    }
                })
                .expect("one retry is enough");
        }
    }

    #[test]
    fn test_delay_between_attempts() {
        let policy = RetryPolicy::new(2, Duration::from_millis(20));
        let start = Instant::now();
        let _ = policy.retry("list files", || -> Result<()> { Err(DriveError::transient("x")) });
        assert!(start.elapsed() >= Duration::from_millis(40));
    }
}
