//! Handler results and delayed follow-ups.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Delay before a successful handler's follow-up runs
pub const FOLLOW_UP_DELAY: Duration = Duration::from_millis(1000);

/// What a dashboard handler did
#[derive(Debug)]
pub enum Outcome {
    /// The request was issued and its reply rendered
    Done,

    /// The backend answered `ok:false`; its reply was rendered
    Refused,

    /// A required field was empty; the user was prompted and nothing was sent
    Blocked,

    /// The user declined a confirmation; nothing was sent
    Cancelled,

    /// The request succeeded and a delayed follow-up is pending
    Scheduled(FollowUp),

    /// No handler matched the gesture
    Ignored,
}

impl Outcome {
    /// Returns true if a backend request was issued
    #[must_use]
    pub const fn issued_request(&self) -> bool {
        matches!(self, Self::Done | Self::Refused | Self::Scheduled(_))
    }

    /// Wait for a pending follow-up, if any
    pub async fn settle(self) {
        if let Self::Scheduled(follow_up) = self {
            follow_up.wait().await;
        }
    }
}

/// A spawned task that runs after [`FOLLOW_UP_DELAY`].
///
/// Dropping the handle does not cancel the task.
#[derive(Debug)]
pub struct FollowUp {
    handle: JoinHandle<()>,
}

impl FollowUp {
    pub(crate) fn after<F>(delay: Duration, task: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
        });
        Self { handle }
    }

    /// Wait for the follow-up to finish
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            warn!(error = %e, "dashboard follow-up task failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_sent_requests_count() {
        assert!(Outcome::Done.issued_request());
        assert!(Outcome::Refused.issued_request());
        assert!(!Outcome::Blocked.issued_request());
        assert!(!Outcome::Cancelled.issued_request());
        assert!(!Outcome::Ignored.issued_request());
    }

    #[test]
    fn test_settle_without_follow_up_returns_at_once() {
        tokio_test::block_on(Outcome::Blocked.settle());
    }

    #[tokio::test(start_paused = true)]
    async fn test_follow_up_waits_for_delay() {
        let started = tokio::time::Instant::now();
        let outcome = Outcome::Scheduled(FollowUp::after(FOLLOW_UP_DELAY, async {}));

        assert!(outcome.issued_request());
        outcome.settle().await;
        assert!(started.elapsed() >= FOLLOW_UP_DELAY);
    }
}
