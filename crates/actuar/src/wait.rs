//! Blocking poll loop behind the visibility waits.

use std::thread;
use std::time::{Duration, Instant};

use crate::result::UiResult;

/// Default budget for visibility waits.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5_000;

/// Default interval between condition polls.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;

/// Poll `condition` until it reports true or `timeout` elapses.
///
/// The condition is checked once immediately, so a zero timeout still
/// observes the current state. Returns `Ok(false)` when the budget ran out
/// with the condition unmet; callers turn that into their timeout error.
///
/// # Errors
///
/// The first hard error from `condition` aborts the wait.
pub fn poll_until<F>(timeout: Duration, interval: Duration, mut condition: F) -> UiResult<bool>
where
    F: FnMut() -> UiResult<bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if condition()? {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
        thread::sleep(interval);
    }
}
